//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use crate::media::MAX_CHUNK_SIZE;
use regex::Regex;
use url::Url;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let c = &config.credentials;
    for (field, value) in [
        ("consumer_key", &c.consumer_key),
        ("consumer_secret", &c.consumer_secret),
        ("access_token", &c.access_token),
        ("access_token_secret", &c.access_token_secret),
        ("bearer_token", &c.bearer_token),
    ] {
        if let Some(value) = value {
            validate_credential(field, value)?;
        }
    }

    validate_url("api.base_url", &config.api.base_url)?;
    validate_url("api.upload_url", &config.api.upload_url)?;

    if config.api.timeout_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "api.timeout_seconds".to_string(),
            message: "Timeout must be at least one second".to_string(),
        });
    }

    if config.api.chunk_size == 0 || config.api.chunk_size > MAX_CHUNK_SIZE {
        return Err(Error::ConfigValidation {
            field: "api.chunk_size".to_string(),
            message: format!(
                "Chunk size must be between 1 and {} bytes (got {})",
                MAX_CHUNK_SIZE, config.api.chunk_size
            ),
        });
    }

    // Surfaces MissingConfig for incomplete credential sets.
    config.authentication()?;

    Ok(())
}

/// Reject placeholder credential values.
pub fn validate_credential(field: &str, value: &str) -> Result<()> {
    let lower = value.to_lowercase();
    if lower.contains("replaceme") || lower.starts_with("your_") {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!(
                "{} appears to be a placeholder. Please provide your actual credentials.",
                field
            ),
        });
    }

    if value.chars().any(char::is_whitespace) {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("{} must not contain whitespace", field),
        });
    }

    Ok(())
}

/// Validate an endpoint URL.
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("Invalid URL '{}': {}", value, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("Unsupported URL scheme '{}'", scheme),
        }),
    }
}

/// Validate a numeric user id and return it trimmed.
pub fn parse_user_id(input: &str) -> Result<String> {
    let input = input.trim();
    validate_user_id(input)?;
    Ok(input.to_string())
}

/// Check that `id` is 1-19 ASCII digits, as used in request paths.
pub fn validate_user_id(id: &str) -> Result<()> {
    let id_pattern = Regex::new(r"^\d{1,19}$").map_err(|e| Error::Config(e.to_string()))?;
    if id_pattern.is_match(id) {
        return Ok(());
    }

    Err(Error::ConfigValidation {
        field: "user_id".to_string(),
        message: format!("Invalid user id: '{}'. Must be 1-19 digits.", id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::CredentialsConfig;

    fn valid_config() -> Config {
        Config {
            credentials: CredentialsConfig {
                bearer_token: Some("AAAAbearer".into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_placeholder_credential() {
        let mut config = valid_config();
        config.credentials.bearer_token = Some("REPLACEME".into());
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { field, .. }) if field == "bearer_token"
        ));
    }

    #[test]
    fn test_missing_credentials() {
        assert!(matches!(
            validate_config(&Config::default()),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_chunk_size_bounds() {
        let mut config = valid_config();
        config.api.chunk_size = MAX_CHUNK_SIZE + 1;
        assert!(validate_config(&config).is_err());

        config.api.chunk_size = 0;
        assert!(validate_config(&config).is_err());

        config.api.chunk_size = 1024;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("u", "https://api.twitter.com").is_ok());
        assert!(validate_url("u", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("u", "ftp://example.com").is_err());
        assert!(validate_url("u", "not a url").is_err());
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id(" 2244994945 ").unwrap(), "2244994945");
        assert!(parse_user_id("").is_err());
        assert!(parse_user_id("@jack").is_err());
        assert!(parse_user_id("12345678901234567890").is_err());
    }

    #[test]
    fn test_validate_user_id_is_strict() {
        assert!(validate_user_id("2244994945").is_ok());
        assert!(validate_user_id(" 12").is_err());
        assert!(validate_user_id("1/../x").is_err());
        assert!(validate_user_id("..").is_err());
    }
}
