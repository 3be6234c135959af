//! Google service REST clients.
//!
//! Drive v3 (project folder + file uploads), Sheets v4 (pipeline tracking),
//! and Cloud Text-to-Speech (narration synthesis), all authenticated with a
//! service account via `gcp_auth` and a shared token cache.

pub mod auth;
pub mod drive;
pub mod error;
pub mod mime;
pub mod retry;
pub mod sheets;
pub mod tts;

pub use auth::{service_account_from_env, TokenCache, DRIVE_SCOPE, SHEETS_SCOPE, TTS_SCOPE};
pub use drive::DriveClient;
pub use error::{GoogleError, GoogleResult};
pub use mime::{category_for, mime_type_for, FOLDER_CATEGORIES};
pub use retry::{with_retry, RetryConfig};
pub use sheets::SheetsTracker;
pub use tts::TtsClient;
