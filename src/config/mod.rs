//! Configuration module for tweetkit.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation
//! - Timeline selection for the CLI

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{ApiConfig, Config, CredentialsConfig};
pub use modes::TimelineKind;
pub use validation::{parse_user_id, validate_config, validate_user_id};
