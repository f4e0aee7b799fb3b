//! Credentials and OAuth 1.0a request signing.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::RngCore;
use sha1::Sha1;

use crate::error::{Error, Result};

/// Everything except the RFC 3986 unreserved set: ALPHA / DIGIT / "-" / "." / "_" / "~".
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Which kind of credentials a request needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationKind {
    /// Bearer token without a user.
    AppOnly,
    /// Consumer pair plus user access token pair.
    UserAccessTokens,
}

impl fmt::Display for AuthenticationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthenticationKind::AppOnly => write!(f, "app-only"),
            AuthenticationKind::UserAccessTokens => write!(f, "user access token"),
        }
    }
}

/// Consumer (application) key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub key: String,
    pub secret: String,
}

/// User access token pair.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub token: String,
    pub secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Credentials the client authenticates with.
#[derive(Clone, PartialEq, Eq)]
pub enum Authentication {
    /// App-only bearer token.
    AppOnly { bearer_token: String },
    /// OAuth 1.0a user context.
    UserAccessTokens {
        client: ClientCredentials,
        user: UserCredentials,
    },
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authentication::AppOnly { .. } => f
                .debug_struct("AppOnly")
                .field("bearer_token", &"<redacted>")
                .finish(),
            Authentication::UserAccessTokens { client, user } => f
                .debug_struct("UserAccessTokens")
                .field("client", client)
                .field("user", user)
                .finish(),
        }
    }
}

impl Authentication {
    /// Build user-context credentials from the four OAuth 1.0a values.
    pub fn user_access_tokens(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Authentication::UserAccessTokens {
            client: ClientCredentials {
                key: consumer_key.into(),
                secret: consumer_secret.into(),
            },
            user: UserCredentials {
                token: access_token.into(),
                secret: access_token_secret.into(),
            },
        }
    }

    /// Build app-only credentials from a bearer token.
    pub fn app_only(bearer_token: impl Into<String>) -> Self {
        Authentication::AppOnly {
            bearer_token: bearer_token.into(),
        }
    }

    pub fn kind(&self) -> AuthenticationKind {
        match self {
            Authentication::AppOnly { .. } => AuthenticationKind::AppOnly,
            Authentication::UserAccessTokens { .. } => AuthenticationKind::UserAccessTokens,
        }
    }
}

/// Percent-encode a string according to RFC 3986.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Generate a 32-character hex nonce.
pub fn generate_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn current_timestamp() -> Result<String> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .map_err(|e| Error::OAuth(format!("Failed to get timestamp: {}", e)))
}

/// Build the signature base string: `METHOD&encoded-url&encoded-params`.
///
/// Parameters are percent-encoded, then sorted by key and value.
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

/// Compute HMAC-SHA1 and return the base64-encoded digest.
fn hmac_sha1(key: &str, data: &str) -> Result<String> {
    let mut mac =
        Hmac::<Sha1>::new_from_slice(key.as_bytes()).map_err(|e| Error::OAuth(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Generate the OAuth 1.0a `Authorization` header value for a request.
///
/// `url` must not contain a query string; query and form parameters go in
/// `params` so they take part in the signature.
pub fn authorization_header(
    method: &str,
    url: &str,
    params: &[(String, String)],
    client: &ClientCredentials,
    user: &UserCredentials,
) -> Result<String> {
    authorization_header_with(
        method,
        url,
        params,
        client,
        user,
        &generate_nonce(),
        &current_timestamp()?,
    )
}

pub(crate) fn authorization_header_with(
    method: &str,
    url: &str,
    params: &[(String, String)],
    client: &ClientCredentials,
    user: &UserCredentials,
    nonce: &str,
    timestamp: &str,
) -> Result<String> {
    let mut oauth_params = vec![
        ("oauth_consumer_key".to_string(), client.key.clone()),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), user.token.clone()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ];

    let mut all_params = oauth_params.clone();
    all_params.extend(params.iter().cloned());

    let base_string = signature_base_string(method, url, &all_params);
    let signing_key = format!(
        "{}&{}",
        percent_encode(&client.secret),
        percent_encode(&user.secret)
    );
    let signature = hmac_sha1(&signing_key, &base_string)?;

    oauth_params.push(("oauth_signature".to_string(), signature));

    let header = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", header))
}
