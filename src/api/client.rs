//! Twitter API HTTP client.

use std::time::Duration;

use chrono::Utc;
use reqwest::{header, Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::auth::{authorization_header, Authentication, ClientCredentials, UserCredentials};
use crate::api::routes::Route;
use crate::api::types::ProblemResponse;
use crate::config::{validate_user_id, Config};
use crate::error::{Error, Result};
use crate::media::MAX_CHUNK_SIZE;

/// Twitter v2 API base URL.
pub const API_BASE: &str = "https://api.twitter.com";

/// Chunked media upload endpoint.
pub const UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";

/// Default request timeout.
pub const TIMEOUT_SECS: u64 = 30;

/// Retry delay reported when a 429 carries no reset header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Connection settings for [`TwitterApi`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_base_url: String,
    pub upload_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Maximum decoded size of one APPEND segment.
    pub chunk_size: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE.to_string(),
            upload_url: UPLOAD_URL.to_string(),
            user_agent: format!("tweetkit/{}", env!("CARGO_PKG_VERSION")),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            chunk_size: MAX_CHUNK_SIZE,
        }
    }
}

/// Twitter API client.
///
/// Credentials are fixed at construction and only read afterwards, so a
/// single client can be shared between concurrent tasks.
pub struct TwitterApi {
    client: Client,
    authentication: Authentication,
    api_base_url: String,
    upload_url: String,
    chunk_size: usize,
}

impl TwitterApi {
    /// Create a client against the production endpoints.
    pub fn new(authentication: Authentication) -> Result<Self> {
        Self::with_options(authentication, ClientOptions::default())
    }

    /// Create a client with custom endpoints and settings.
    pub fn with_options(authentication: Authentication, options: ClientOptions) -> Result<Self> {
        Url::parse(&options.api_base_url)?;
        Url::parse(&options.upload_url)?;

        if options.chunk_size == 0 || options.chunk_size > MAX_CHUNK_SIZE {
            return Err(Error::Config(format!(
                "chunk_size must be between 1 and {} bytes (got {})",
                MAX_CHUNK_SIZE, options.chunk_size
            )));
        }

        let client = Client::builder()
            .user_agent(&options.user_agent)
            .timeout(options.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            authentication,
            api_base_url: options.api_base_url.trim_end_matches('/').to_string(),
            upload_url: options.upload_url,
            chunk_size: options.chunk_size,
        })
    }

    /// Create a client from a loaded configuration file.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_options(config.authentication()?, config.client_options())
    }

    /// Credentials this client signs requests with.
    pub fn authentication(&self) -> &Authentication {
        &self.authentication
    }

    pub(crate) fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Send a v2 request authenticated by the configured credential mode.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &Route,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<Response> {
        for id in route.user_ids() {
            validate_user_id(id)?;
        }

        let url = format!("{}{}", self.api_base_url, route.path());

        let authorization = match &self.authentication {
            Authentication::AppOnly { bearer_token } => format!("Bearer {}", bearer_token),
            Authentication::UserAccessTokens { client, user } => {
                authorization_header(method.as_str(), &url, query, client, user)?
            }
        };

        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(header::AUTHORIZATION, authorization);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        tracing::debug!("Response status: {}", response.status());

        Ok(response)
    }

    /// Send a v2 request and decode the JSON response.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        route: &Route,
        query: &[(String, String)],
    ) -> Result<T> {
        let response = self.send::<()>(method, route, query, None).await?;
        decode_response(response).await
    }

    /// Send a v2 request with a JSON body and decode the JSON response.
    pub(crate) async fn call_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &Route,
        body: &B,
    ) -> Result<T> {
        let response = self.send(method, route, &[], Some(body)).await?;
        decode_response(response).await
    }

    /// POST a signed form to the media upload endpoint.
    ///
    /// The form parameters are part of the OAuth signature.
    pub(crate) async fn post_upload_form(
        &self,
        form: &[(String, String)],
        extra_headers: header::HeaderMap,
        client: &ClientCredentials,
        user: &UserCredentials,
    ) -> Result<Response> {
        let authorization = authorization_header("POST", &self.upload_url, form, client, user)?;

        let response = self
            .client
            .post(&self.upload_url)
            .header(header::AUTHORIZATION, authorization)
            .headers(extra_headers)
            .form(form)
            .send()
            .await?;

        tracing::debug!("Upload response status: {}", response.status());
        Ok(response)
    }
}

/// Map the HTTP status to an error, or decode the body.
pub(crate) async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = retry_after_secs(response.headers());
        tracing::warn!("Rate limited, retry after {} seconds", retry_after);
        return Err(Error::RateLimited(retry_after));
    }

    let bytes = response.bytes().await?;

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let message = problem_message(&bytes).unwrap_or_else(|| "Authentication failed".into());
        tracing::error!("Auth error response: HTTP {}: {}", status, message);
        return Err(Error::Authentication(format!("HTTP {}: {}", status, message)));
    }

    if !status.is_success() {
        let message = problem_message(&bytes)
            .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
        tracing::warn!("API returned status {}: {}", status, message);
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&bytes)?)
}

/// Reject `max_results` outside `min..=max` before any request is made.
pub(crate) fn check_max_results(value: u32, min: u32, max: u32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::RangeOutOfBounds {
            field: "max_results".to_string(),
            min,
            max,
            actual: value,
        })
    }
}

fn problem_message(bytes: &[u8]) -> Option<String> {
    let problem: ProblemResponse = serde_json::from_slice(bytes).ok()?;
    problem.detail.or(problem.title)
}

/// Seconds until `x-rate-limit-reset`, or the default when absent.
fn retry_after_secs(headers: &header::HeaderMap) -> u64 {
    headers
        .get("x-rate-limit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .map(|reset| (reset - Utc::now().timestamp()).max(0) as u64)
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Options pointing both endpoints at a mock server.
#[cfg(test)]
pub(crate) fn test_options(server: &wiremock::MockServer) -> ClientOptions {
    ClientOptions {
        api_base_url: server.uri(),
        upload_url: format!("{}/1.1/media/upload.json", server.uri()),
        ..Default::default()
    }
}
