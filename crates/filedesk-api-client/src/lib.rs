//! HTTP client for the filedesk file service.
//!
//! [`FileServiceClient`] wraps the file endpoints (upload, list, download URL,
//! delete). Every request first asks the shared [`CredentialManager`] for a
//! bearer header, which may trigger the one login exchange of the process.
//!
//! On a 2xx status the response envelope is returned as-is; callers check
//! `success` themselves. A failure envelope whose `data` does not fit the
//! expected payload comes back with `data: None`. Any other status becomes a
//! [`ClientError`] carrying the server's message.

pub mod api;
pub mod auth;
pub mod error;
pub mod payload;

use std::sync::Arc;

use anyhow::Context;
use filedesk_core::ClientConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

pub use api::{DEFAULT_EXPIRATION_MINUTES, DEFAULT_PAGE_SIZE};
pub use auth::{CredentialManager, HttpTokenSource, TokenSource};
pub use error::{AuthError, ClientError};
pub use payload::UploadPayload;

/// Client for `{api_url}/api/v1/files`.
#[derive(Clone)]
pub struct FileServiceClient {
    client: Client,
    base_url: String,
    credentials: Arc<CredentialManager>,
}

impl FileServiceClient {
    /// Client sharing an existing credential manager.
    pub fn new(
        client: Client,
        config: &ClientConfig,
        credentials: Arc<CredentialManager>,
    ) -> Self {
        Self {
            client,
            base_url: config.files_url(),
            credentials,
        }
    }

    /// Client and credential manager built from one configuration, sharing
    /// one connection pool.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        let credentials = Arc::new(CredentialManager::from_config(client.clone(), config));
        Ok(Self::new(client, config, credentials))
    }

    /// Configuration from FILEDESK_* environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ClientConfig::from_env().context("Invalid client configuration")?;
        Self::from_config(&config).context("Failed to create HTTP client")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<CredentialManager> {
        &self.credentials
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resolve the auth header before the request is built so a failed login
    /// never reaches the file service.
    async fn authorized(
        &self,
        build: impl FnOnce(&Client) -> RequestBuilder,
    ) -> Result<RequestBuilder, ClientError> {
        let (name, value) = self.credentials.auth_header().await?;
        Ok(build(&self.client).header(name, value))
    }

    /// GET with query parameters; decodes the response envelope.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ClientError> {
        let url = self.build_url(path);
        let request = self
            .authorized(|client| {
                let request = client.get(&url);
                if query.is_empty() {
                    request
                } else {
                    request.query(query)
                }
            })
            .await?;

        debug!(%url, "GET");
        let response = request.send().await?;
        handle_response(response).await
    }

    /// POST a multipart form; decodes the response envelope.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<ApiResponse<T>, ClientError> {
        let url = self.build_url(path);
        let request = self.authorized(|client| client.post(&url).multipart(form)).await?;

        debug!(%url, "POST multipart");
        let response = request.send().await?;
        handle_response(response).await
    }

    /// DELETE; the body of a successful response is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = self.build_url(path);
        let request = self.authorized(|client| client.delete(&url)).await?;

        debug!(%url, "DELETE");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }
}

/// Non-success statuses become errors; `success` in the body is not looked at.
async fn handle_response<T: DeserializeOwned>(
    response: Response,
) -> Result<ApiResponse<T>, ClientError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let body = response.bytes().await?;
    decode_envelope(&body)
}

/// `data` must match `T` on a successful envelope. On a failure envelope the
/// server may put error details there, so a mismatch only drops `data`.
fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<ApiResponse<T>, ClientError> {
    let raw: ApiResponse<Value> = serde_json::from_slice(body).map_err(decode_error)?;
    let data = match raw.data {
        Some(value) if raw.success => Some(serde_json::from_value(value).map_err(decode_error)?),
        Some(value) => serde_json::from_value(value).ok(),
        None => None,
    };

    Ok(ApiResponse {
        success: raw.success,
        data,
        message: raw.message,
        timestamp: raw.timestamp,
    })
}

fn decode_error(err: serde_json::Error) -> ClientError {
    ClientError::Decode(err.to_string())
}

async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error::message_from_body(&body);
    warn!(status = status.as_u16(), %message, "File service request failed");
    ClientError::from_status(status.as_u16(), message)
}

// Re-export domain types for convenience.
pub use filedesk_core::{
    ApiResponse, DownloadTarget, DownloadUrlResponse, PageResponse, Reference, ReferenceType,
    UploadFileCategory, UploadFileResponse, UploadFileType,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_keeps_data_that_fits() {
        let body = br#"{"success":false,"data":[1,2],"message":"partial"}"#;
        let envelope: ApiResponse<Vec<u8>> = decode_envelope(body).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.data, Some(vec![1, 2]));
        assert_eq!(envelope.message, "partial");
    }

    #[test]
    fn failure_envelope_drops_data_that_does_not_fit() {
        let body = br#"{"success":false,"data":"locked","message":"nope"}"#;
        let envelope: ApiResponse<Vec<u8>> = decode_envelope(body).unwrap();
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.timestamp, "");
    }

    #[test]
    fn success_envelope_requires_matching_data() {
        let body = br#"{"success":true,"data":"locked"}"#;
        let err = decode_envelope::<Vec<u8>>(body).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
