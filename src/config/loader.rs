//! Configuration structures and loading logic.

use crate::api::auth::Authentication;
use crate::api::client::{ClientOptions, API_BASE, TIMEOUT_SECS, UPLOAD_URL};
use crate::error::{Error, Result};
use crate::media::MAX_CHUNK_SIZE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

/// API credentials.
///
/// The four OAuth 1.0a values enable user context; a bearer token alone
/// enables app-only requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Consumer (API) key.
    pub consumer_key: Option<String>,

    /// Consumer (API) secret.
    pub consumer_secret: Option<String>,

    /// User access token.
    pub access_token: Option<String>,

    /// User access token secret.
    pub access_token_secret: Option<String>,

    /// App-only bearer token.
    pub bearer_token: Option<String>,
}

/// Endpoint and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the v2 API.
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Chunked media upload endpoint.
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum decoded bytes per APPEND segment.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            upload_url: default_upload_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_api_base_url() -> String {
    API_BASE.to_string()
}

fn default_upload_url() -> String {
    UPLOAD_URL.to_string()
}

fn default_user_agent() -> String {
    format!("tweetkit/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u64 {
    TIMEOUT_SECS
}

fn default_chunk_size() -> usize {
    MAX_CHUNK_SIZE
}

/// Treat empty strings as unset.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Platform config location, e.g. `~/.config/tweetkit/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tweetkit").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Pick the credential mode from the configured values.
    ///
    /// User access tokens win over a bearer token when both are present.
    pub fn authentication(&self) -> Result<Authentication> {
        let c = &self.credentials;
        let user_values = [
            ("consumer_key", present(&c.consumer_key)),
            ("consumer_secret", present(&c.consumer_secret)),
            ("access_token", present(&c.access_token)),
            ("access_token_secret", present(&c.access_token_secret)),
        ];

        if let [(_, Some(key)), (_, Some(secret)), (_, Some(token)), (_, Some(token_secret))] =
            user_values
        {
            return Ok(Authentication::user_access_tokens(
                key,
                secret,
                token,
                token_secret,
            ));
        }

        if let Some(bearer) = present(&c.bearer_token) {
            return Ok(Authentication::app_only(bearer));
        }

        let missing: Vec<&str> = user_values
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        if missing.len() == user_values.len() {
            Err(Error::MissingConfig(
                "credentials (OAuth user tokens or bearer_token)".to_string(),
            ))
        } else {
            Err(Error::MissingConfig(format!(
                "credentials: {}",
                missing.join(", ")
            )))
        }
    }

    /// Client settings derived from the `[api]` section.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_base_url: self.api.base_url.clone(),
            upload_url: self.api.upload_url.clone(),
            user_agent: self.api.user_agent.clone(),
            timeout: Duration::from_secs(self.api.timeout_seconds),
            chunk_size: self.api.chunk_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::AuthenticationKind;
    use std::io::Write;

    fn user_credentials() -> CredentialsConfig {
        CredentialsConfig {
            consumer_key: Some("ck".into()),
            consumer_secret: Some("cs".into()),
            access_token: Some("at".into()),
            access_token_secret: Some("ats".into()),
            bearer_token: None,
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[credentials]
consumer_key = "ck"
consumer_secret = "cs"
access_token = "at"
access_token_secret = "ats"

[api]
timeout_seconds = 5
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.timeout_seconds, 5);
        assert_eq!(config.api.base_url, API_BASE);
        assert_eq!(config.api.chunk_size, MAX_CHUNK_SIZE);
        assert_eq!(
            config.authentication().unwrap().kind(),
            AuthenticationKind::UserAccessTokens
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            credentials: user_credentials(),
            ..Default::default()
        };

        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.credentials.access_token.as_deref(), Some("at"));
    }

    #[test]
    fn test_bearer_only_is_app_only() {
        let config = Config {
            credentials: CredentialsConfig {
                bearer_token: Some("bearer".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.authentication().unwrap(),
            Authentication::app_only("bearer")
        );
    }

    #[test]
    fn test_user_tokens_preferred_over_bearer() {
        let mut credentials = user_credentials();
        credentials.bearer_token = Some("bearer".into());
        let config = Config {
            credentials,
            ..Default::default()
        };
        assert_eq!(
            config.authentication().unwrap().kind(),
            AuthenticationKind::UserAccessTokens
        );
    }

    #[test]
    fn test_partial_user_tokens_name_missing_fields() {
        let mut credentials = user_credentials();
        credentials.access_token_secret = Some("  ".into());
        let config = Config {
            credentials,
            ..Default::default()
        };

        match config.authentication() {
            Err(Error::MissingConfig(message)) => {
                assert!(message.contains("access_token_secret"));
                assert!(!message.contains("consumer_key"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_no_credentials() {
        assert!(matches!(
            Config::default().authentication(),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_client_options() {
        let mut config = Config::default();
        config.api.timeout_seconds = 12;
        config.api.chunk_size = 1024;

        let options = config.client_options();
        assert_eq!(options.timeout, Duration::from_secs(12));
        assert_eq!(options.chunk_size, 1024);
        assert_eq!(options.upload_url, UPLOAD_URL);
    }
}
