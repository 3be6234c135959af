//! Placeholder image rendering.
//!
//! When no stock photo provider is configured (or all of them fail) the
//! image stage still needs one frame per segment. The placeholder is a flat
//! slate-blue card with a soft vertical gradient; the segment's prompt is
//! written to a sidecar text file by the caller.

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, Rgb, RgbImage};

use crate::error::{MediaError, MediaResult};

/// Base placeholder color.
const BASE: [u8; 3] = [73, 109, 137];

/// Render a placeholder image as JPEG bytes.
pub fn render_placeholder(width: u32, height: u32) -> MediaResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(MediaError::ImageRender(format!(
            "invalid placeholder dimensions {}x{}",
            width, height
        )));
    }

    let img = RgbImage::from_fn(width, height, |_, y| {
        // Darken toward the bottom of the frame
        let shade = (y as f32 / height as f32 * 40.0) as u8;
        Rgb([
            BASE[0].saturating_sub(shade),
            BASE[1].saturating_sub(shade),
            BASE[2].saturating_sub(shade),
        ])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, 90);
    encoder
        .encode(img.as_raw(), width, height, ColorType::Rgb8)
        .map_err(|e| MediaError::ImageRender(e.to_string()))?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_placeholder_dimensions() {
        let bytes = render_placeholder(1280, 720).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 1280);
        assert_eq!(decoded.height(), 720);
    }

    #[test]
    fn test_render_placeholder_rejects_zero() {
        assert!(matches!(
            render_placeholder(0, 720),
            Err(MediaError::ImageRender(_))
        ));
    }
}
