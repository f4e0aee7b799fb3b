//! Chunked media upload: INIT, APPEND×N, FINALIZE.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::api::auth::{Authentication, AuthenticationKind};
use crate::api::client::TwitterApi;
use crate::error::{Error, Result};
use crate::media::chunk::{split_chunks, Chunks};
use crate::media::mime::MimeType;

/// Remote media object allocated by INIT, valid until FINALIZE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUploadSession {
    pub media_id: i64,
    pub media_id_string: String,
    pub expires_after_secs: i64,
    pub total_bytes: usize,
}

#[derive(Debug, Deserialize)]
struct InitResponse {
    media_id: i64,
    media_id_string: String,
    expires_after_secs: i64,
}

/// Metadata of an uploaded media object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaUploadResponse {
    pub media_id: i64,
    /// Handle to attach the media to a tweet.
    pub media_id_string: String,
    pub size: i64,
    pub expires_after_secs: i64,
    /// Present while the server is still processing (e.g. transcoding video).
    pub processing_info: Option<ProcessingInfo>,
}

/// Asynchronous processing state reported by FINALIZE.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessingInfo {
    pub state: String,
    pub check_after_secs: Option<i64>,
}

impl MediaUploadResponse {
    /// Whether the caller must wait for processing before using the media.
    pub fn needs_processing(&self) -> bool {
        self.processing_info
            .as_ref()
            .is_some_and(|info| info.state != "succeeded")
    }
}

fn form(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl TwitterApi {
    /// Upload an in-memory payload and return the finalized media object.
    ///
    /// Requires user access tokens. Segments are appended one at a time in
    /// payload order; the first failure aborts the upload and nothing is
    /// retried or cleaned up.
    pub async fn upload(&self, data: &[u8], mime_type: MimeType) -> Result<MediaUploadResponse> {
        self.upload_with_progress(data, mime_type, |_, _| {}).await
    }

    /// Like [`TwitterApi::upload`], calling `progress(appended, total)` after
    /// every appended segment.
    pub async fn upload_with_progress<F>(
        &self,
        data: &[u8],
        mime_type: MimeType,
        mut progress: F,
    ) -> Result<MediaUploadResponse>
    where
        F: FnMut(usize, usize),
    {
        if let Authentication::AppOnly { .. } = self.authentication() {
            return Err(Error::WrongAuthenticationType {
                needs: AuthenticationKind::UserAccessTokens,
            });
        }

        let chunks = split_chunks(data, self.chunk_size())?;
        let session = self.initialize_upload(data.len(), mime_type).await?;
        self.append_chunks(&session, chunks, &mut progress).await?;
        self.finalize_upload(&session).await
    }

    /// INIT: allocate a remote media object for `total_bytes` bytes.
    pub async fn initialize_upload(
        &self,
        total_bytes: usize,
        mime_type: MimeType,
    ) -> Result<MediaUploadSession> {
        let Authentication::UserAccessTokens { client, user } = self.authentication() else {
            return Err(Error::WrongAuthenticationType {
                needs: AuthenticationKind::UserAccessTokens,
            });
        };

        if total_bytes == 0 {
            return Err(Error::EmptyMedia);
        }

        let total = total_bytes.to_string();
        let body = form(&[
            ("command", "INIT"),
            ("media_category", mime_type.media_category().as_str()),
            ("media_type", mime_type.as_str()),
            ("total_bytes", total.as_str()),
        ]);

        let response = self
            .post_upload_form(&body, HeaderMap::new(), client, user)
            .await?;
        if !response.status().is_success() {
            tracing::warn!("INIT returned status {}", response.status());
        }

        let bytes = response.bytes().await?;
        let init: InitResponse = serde_json::from_slice(&bytes)?;

        tracing::info!(
            "Initialized upload {} ({} bytes, {})",
            init.media_id_string,
            total_bytes,
            mime_type
        );

        Ok(MediaUploadSession {
            media_id: init.media_id,
            media_id_string: init.media_id_string,
            expires_after_secs: init.expires_after_secs,
            total_bytes,
        })
    }

    /// APPEND: upload `data` in segments for an initialized session.
    pub async fn append_media_chunks(
        &self,
        session: &MediaUploadSession,
        data: &[u8],
    ) -> Result<()> {
        let chunks = split_chunks(data, self.chunk_size())?;
        self.append_chunks(session, chunks, &mut |_: usize, _: usize| {})
            .await
    }

    async fn append_chunks<F>(
        &self,
        session: &MediaUploadSession,
        chunks: Chunks<'_>,
        progress: &mut F,
    ) -> Result<()>
    where
        F: FnMut(usize, usize),
    {
        let Authentication::UserAccessTokens { client, user } = self.authentication() else {
            return Err(Error::OAuthToken);
        };

        let total = chunks.total();

        for chunk in chunks {
            let index = chunk.index.to_string();
            let body = form(&[
                ("command", "APPEND"),
                ("media_id", session.media_id_string.as_str()),
                ("media_data", chunk.data.as_str()),
                ("segment_index", index.as_str()),
            ]);

            let mut headers = HeaderMap::new();
            headers.insert("content-transfer-encoding", HeaderValue::from_static("base64"));

            tracing::debug!(
                "Appending segment {}/{} ({} bytes) to {}",
                chunk.index + 1,
                total,
                chunk.decoded_len,
                session.media_id_string
            );

            let response = self.post_upload_form(&body, headers, client, user).await?;
            let status = response.status();
            if !status.is_success() {
                tracing::warn!(
                    "APPEND of segment {} for {} failed with status {}",
                    chunk.index,
                    session.media_id_string,
                    status
                );
                return Err(Error::UploadFailed {
                    status: status.as_u16(),
                });
            }

            progress(chunk.index + 1, total);
        }

        Ok(())
    }

    /// FINALIZE: close the upload and return the media metadata.
    pub async fn finalize_upload(
        &self,
        session: &MediaUploadSession,
    ) -> Result<MediaUploadResponse> {
        let Authentication::UserAccessTokens { client, user } = self.authentication() else {
            return Err(Error::OAuthToken);
        };

        let body = form(&[
            ("command", "FINALIZE"),
            ("media_id", session.media_id_string.as_str()),
        ]);

        let response = self
            .post_upload_form(&body, HeaderMap::new(), client, user)
            .await?;
        if !response.status().is_success() {
            tracing::warn!("FINALIZE returned status {}", response.status());
        }

        let bytes = response.bytes().await?;
        let finalized: MediaUploadResponse = serde_json::from_slice(&bytes)?;

        tracing::info!(
            "Finalized upload {} ({} bytes)",
            finalized.media_id_string,
            finalized.size
        );
        Ok(finalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{test_options, ClientOptions};
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use std::collections::HashMap;
    use wiremock::{
        matchers::{any, body_string_contains, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const UPLOAD_PATH: &str = "/1.1/media/upload.json";
    const MEDIA_ID: &str = "710511363345354753";

    fn user_api(options: ClientOptions) -> TwitterApi {
        let auth = Authentication::user_access_tokens("ck", "cs", "at", "ats");
        TwitterApi::with_options(auth, options).unwrap()
    }

    fn app_only_api(server: &MockServer) -> TwitterApi {
        TwitterApi::with_options(Authentication::app_only("bearer"), test_options(server)).unwrap()
    }

    fn session() -> MediaUploadSession {
        MediaUploadSession {
            media_id: 710511363345354753,
            media_id_string: MEDIA_ID.into(),
            expires_after_secs: 86400,
            total_bytes: 10,
        }
    }

    async fn mount_init(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path(UPLOAD_PATH))
            .and(body_string_contains("command=INIT"))
            .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
                "media_id": 710511363345354753_i64,
                "media_id_string": MEDIA_ID,
                "expires_after_secs": 86400
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn mount_segment(server: &MockServer, index: usize, status: u16, expected: u64) {
        Mock::given(method("POST"))
            .and(path(UPLOAD_PATH))
            .and(body_string_contains("command=APPEND"))
            .and(body_string_contains(format!("segment_index={}", index)))
            .respond_with(ResponseTemplate::new(status))
            .expect(expected)
            .mount(server)
            .await;
    }

    async fn mount_finalize(server: &MockServer, expected: u64) {
        Mock::given(method("POST"))
            .and(path(UPLOAD_PATH))
            .and(body_string_contains("command=FINALIZE"))
            .and(body_string_contains(format!("media_id={}", MEDIA_ID)))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "media_id": 710511363345354753_i64,
                "media_id_string": MEDIA_ID,
                "size": 10_000_000,
                "expires_after_secs": 86400,
                "processing_info": {"state": "pending", "check_after_secs": 5}
            })))
            .expect(expected)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_upload_ten_megabytes_in_three_segments() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(UPLOAD_PATH))
            .and(body_string_contains("command=INIT"))
            .and(body_string_contains("total_bytes=10000000"))
            .and(body_string_contains("media_category=tweet_video"))
            .and(body_string_contains("media_type=video%2Fmp4"))
            .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
                "media_id": 710511363345354753_i64,
                "media_id_string": MEDIA_ID,
                "expires_after_secs": 86400
            })))
            .expect(1)
            .mount(&server)
            .await;

        for index in 0..3 {
            Mock::given(method("POST"))
                .and(path(UPLOAD_PATH))
                .and(header("Content-Transfer-Encoding", "base64"))
                .and(body_string_contains("command=APPEND"))
                .and(body_string_contains(format!("segment_index={}", index)))
                .respond_with(ResponseTemplate::new(204))
                .expect(1)
                .mount(&server)
                .await;
        }
        mount_finalize(&server, 1).await;

        let api = user_api(test_options(&server));
        let data: Vec<u8> = (0..10_000_000u32).map(|i| (i % 256) as u8).collect();

        let mut seen = Vec::new();
        let result = api
            .upload_with_progress(&data, MimeType::Mp4, |done, total| seen.push((done, total)))
            .await
            .unwrap();

        assert_eq!(result.media_id_string, MEDIA_ID);
        assert!(result.needs_processing());
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);

        // Segments arrive in order with the expected decoded sizes
        let requests = server.received_requests().await.unwrap();
        let appends: Vec<HashMap<String, String>> = requests
            .iter()
            .map(|r| url::form_urlencoded::parse(&r.body).into_owned().collect())
            .filter(|f: &HashMap<String, String>| f.get("command").map(String::as_str) == Some("APPEND"))
            .collect();

        let indices: Vec<_> = appends.iter().map(|f| f["segment_index"].clone()).collect();
        assert_eq!(indices, vec!["0", "1", "2"]);

        let sizes: Vec<_> = appends
            .iter()
            .map(|f| BASE64.decode(&f["media_data"]).unwrap().len())
            .collect();
        assert_eq!(sizes, vec![4_096_000, 4_096_000, 1_808_000]);

        let reassembled: Vec<u8> = appends
            .iter()
            .flat_map(|f| BASE64.decode(&f["media_data"]).unwrap())
            .collect();
        assert_eq!(reassembled, data);
    }

    #[tokio::test]
    async fn test_failed_segment_stops_upload() {
        let server = MockServer::start().await;

        mount_init(&server).await;
        mount_segment(&server, 0, 204, 1).await;
        mount_segment(&server, 1, 500, 1).await;
        mount_segment(&server, 2, 204, 0).await;
        mount_segment(&server, 3, 204, 0).await;
        mount_finalize(&server, 0).await;

        let options = ClientOptions {
            chunk_size: 10,
            ..test_options(&server)
        };
        let api = user_api(options);
        let data = vec![7u8; 35];

        let result = api.upload(&data, MimeType::Png).await;
        assert!(matches!(result, Err(Error::UploadFailed { status: 500 })));
    }

    #[tokio::test]
    async fn test_init_with_app_only_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = app_only_api(&server);
        let result = api.upload(b"image bytes", MimeType::Jpeg).await;
        assert!(matches!(
            result,
            Err(Error::WrongAuthenticationType {
                needs: AuthenticationKind::UserAccessTokens
            })
        ));
    }

    #[tokio::test]
    async fn test_append_and_finalize_with_app_only() {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = app_only_api(&server);
        let session = session();

        let append = api.append_media_chunks(&session, b"0123456789").await;
        assert!(matches!(append, Err(Error::OAuthToken)));

        let finalize = api.finalize_upload(&session).await;
        assert!(matches!(finalize, Err(Error::OAuthToken)));
    }

    #[tokio::test]
    async fn test_empty_payload_rejected_before_init() {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = user_api(test_options(&server));
        let result = api.upload(&[], MimeType::Gif).await;
        assert!(matches!(result, Err(Error::EmptyMedia)));
    }

    #[tokio::test]
    async fn test_app_only_error_wins_over_empty_payload() {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = app_only_api(&server);
        let result = api.upload(&[], MimeType::Gif).await;
        assert!(matches!(
            result,
            Err(Error::WrongAuthenticationType {
                needs: AuthenticationKind::UserAccessTokens
            })
        ));
    }

    #[tokio::test]
    async fn test_malformed_init_response_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(UPLOAD_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("<html>bad</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let api = user_api(test_options(&server));
        let result = api.upload(b"abc", MimeType::Png).await;
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn test_finalize_without_processing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(UPLOAD_PATH))
            .and(body_string_contains("command=FINALIZE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "media_id": 710511363345354753_i64,
                "media_id_string": MEDIA_ID,
                "size": 11,
                "expires_after_secs": 86400
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = user_api(test_options(&server));
        let response = api.finalize_upload(&session()).await.unwrap();
        assert_eq!(response.size, 11);
        assert!(response.processing_info.is_none());
        assert!(!response.needs_processing());
    }
}
