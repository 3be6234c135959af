//! MIME type lookup and upload folder routing.

use std::path::Path;

/// Drive subfolder categories, in creation order.
pub const FOLDER_CATEGORIES: [&str; 5] = ["scripts", "audio", "images", "videos", "data"];

/// MIME type for a file, by extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("py") => "text/x-python",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("xml") => "application/xml",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("mp4") => "video/mp4",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Upload subfolder for a file, by extension. Unknown extensions land in
/// "data".
pub fn category_for(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("py") | Some("txt") | Some("md") => "scripts",
        Some("mp3") | Some("wav") | Some("m4a") => "audio",
        Some("jpg") | Some("jpeg") | Some("png") | Some("gif") => "images",
        Some("mp4") | Some("avi") | Some("mov") => "videos",
        _ => "data",
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_type_detection() {
        let cases = [
            ("test.mp4", "video/mp4"),
            ("test.jpg", "image/jpeg"),
            ("test.JPG", "image/jpeg"),
            ("test.png", "image/png"),
            ("test.mp3", "audio/mpeg"),
            ("test.txt", "text/plain"),
            ("test.py", "text/x-python"),
            ("test.json", "application/json"),
            ("test.unknown", "application/octet-stream"),
            ("noextension", "application/octet-stream"),
        ];

        for (name, expected) in cases {
            assert_eq!(mime_type_for(&PathBuf::from(name)), expected, "{}", name);
        }
    }

    #[test]
    fn test_folder_determination() {
        let cases = [
            ("test.mp3", "audio"),
            ("test.jpg", "images"),
            ("test.mp4", "videos"),
            ("test.py", "scripts"),
            ("test.txt", "scripts"),
            ("test.json", "data"),
            ("test.unknown", "data"),
        ];

        for (name, expected) in cases {
            assert_eq!(category_for(&PathBuf::from(name)), expected, "{}", name);
        }
    }
}
