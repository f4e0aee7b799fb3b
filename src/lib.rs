//! tweetkit - a Twitter REST API client
//!
//! This library builds authenticated requests against the Twitter v2 API and
//! the v1.1 chunked media upload endpoint.
//!
//! # Features
//!
//! - Chunked media upload (INIT / APPEND / FINALIZE) with progress reporting
//! - OAuth 1.0a user-context signing and app-only bearer authentication
//! - Mute and unmute users, list muted users
//! - User tweets, mentions and home timelines with field selection
//!
//! # Example
//!
//! ```no_run
//! use tweetkit::{Authentication, MimeType, TwitterApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = Authentication::user_access_tokens(
//!         "consumer-key",
//!         "consumer-secret",
//!         "access-token",
//!         "access-token-secret",
//!     );
//!     let api = TwitterApi::new(auth)?;
//!
//!     let bytes = std::fs::read("clip.mp4")?;
//!     let media = api.upload(&bytes, MimeType::Mp4).await?;
//!     println!("uploaded {}", media.media_id_string);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{Authentication, AuthenticationKind, ClientOptions, TwitterApi};
pub use config::Config;
pub use error::{Error, Result};
pub use media::{MediaUploadResponse, MediaUploadSession, MimeType};
