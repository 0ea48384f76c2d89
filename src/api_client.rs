use crate::config::Config;
use crate::errors::ClientError;
use crate::models::ErrorBody;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;

/// HTTP client for the opportunity backend.
///
/// Every failure comes back as a [`ClientError`]: non-2xx responses become
/// `Server`, sends that never got an answer become `Unreachable`, and anything
/// that failed before or after the wire becomes `Local`.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Arguments
    ///
    /// * `config` - Base address and timeout.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Local(format!("Failed to create API client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET for `path` and decodes the JSON body.
    ///
    /// # Arguments
    ///
    /// * `path` - Absolute path, starting with `/`.
    /// * `label` - What to call the request in logs. The path may carry an
    ///   identifier, so it is never logged itself.
    ///
    /// # Returns
    ///
    /// * `Result<T, ClientError>` - The decoded body or the normalized error.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        label: &str,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", label);

        let response = self.client.get(&url).send().await.map_err(|e| {
            let err = ClientError::from(e.without_url());
            tracing::error!("Request for {} failed: {}", label, err);
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            // The body is optional and may not even be JSON
            let message = response
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
                .and_then(|body| body.message);
            let err = ClientError::server(status.as_u16(), message);
            tracing::warn!("Backend returned {} for {}: {}", status, label, err.message());
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to parse response for {}: {}", label, e);
            ClientError::Local(format!("Failed to parse response: {}", e))
        })
    }
}
