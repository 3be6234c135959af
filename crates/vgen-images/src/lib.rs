//! Stock photo acquisition.
//!
//! One image per segment: Unsplash first, Pexels second, and the caller
//! falls back to a rendered placeholder when neither is configured or both
//! come up empty.

pub mod error;
pub mod fetcher;
pub mod pexels;
pub mod unsplash;

pub use error::{ImageError, ImageResult};
pub use fetcher::{enhance_prompt, ImageFetcher};
pub use pexels::PexelsClient;
pub use unsplash::UnsplashClient;
