//! Error types for the tweetkit client.

use thiserror::Error;

use crate::api::auth::AuthenticationKind;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Authentication errors
    #[error("This request requires {needs} authentication")]
    WrongAuthenticationType { needs: AuthenticationKind },

    #[error("OAuth user tokens are not available for this request")]
    OAuthToken,

    #[error("OAuth signing failed: {0}")]
    OAuth(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    // API errors
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("'{field}' must be between {min} and {max} (got {actual})")]
    RangeOutOfBounds {
        field: String,
        min: u32,
        max: u32,
        actual: u32,
    },

    // Media upload errors
    #[error("Media payload is empty")]
    EmptyMedia,

    #[error("Media upload failed with HTTP {status}")]
    UploadFailed { status: u16 },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes used by the command-line binary.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const UPLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
