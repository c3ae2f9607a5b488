//! Backend API client with timeout and error handling.
//!
//! # Responsibilities
//! - Map (method, path, payload) onto one request against the configured origin
//! - Apply the fixed per-call timeout
//! - Collapse every transport failure into `ApiError::Unreachable`
//!
//! # Design Decisions
//! - Exactly one attempt per call; no retries
//! - Responses are fully buffered; bodies are small JSON documents

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::api::types::{ApiError, ApiMethod, ApiResult, BackendResponse, UserPayload};
use crate::config::BackendConfig;
use crate::observability::metrics;

const NO_BODY: Option<&()> = None;

/// Client for the user backend API.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// Create a client for the configured backend.
    pub fn new(config: &BackendConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: Arc::from(config.api_base_url.trim().trim_end_matches('/')),
        })
    }

    /// The backend origin, without surrounding whitespace or trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a single request. GET and DELETE never carry a body.
    pub async fn call<B>(
        &self,
        method: ApiMethod,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<BackendResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        let mut request = self.client.request(method.into(), &url);
        if let (true, Some(body)) = (method.has_body(), body) {
            request = request.json(body);
        }

        tracing::debug!(method = %method, url = %url, "Calling backend");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.unreachable(method, url, e, start)),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Err(self.unreachable(method, url, e, start)),
        };

        metrics::record_backend_call(method.as_str(), Some(status.as_u16()), start);
        tracing::debug!(
            method = %method,
            url = %url,
            status = %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Backend responded"
        );

        Ok(BackendResponse::new(status, body))
    }

    fn unreachable(
        &self,
        method: ApiMethod,
        url: String,
        source: reqwest::Error,
        start: Instant,
    ) -> ApiError {
        metrics::record_backend_call(method.as_str(), None, start);
        tracing::error!(
            method = %method,
            url = %url,
            timeout = source.is_timeout(),
            error = %source,
            "API request failed"
        );
        ApiError::Unreachable {
            method,
            url,
            source,
        }
    }

    /// `GET /users`
    pub async fn list_users(&self) -> ApiResult<BackendResponse> {
        self.call(ApiMethod::Get, "/users", NO_BODY).await
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, id: i64) -> ApiResult<BackendResponse> {
        self.call(ApiMethod::Get, &format!("/users/{}", id), NO_BODY).await
    }

    /// `POST /users`
    pub async fn create_user(&self, payload: &UserPayload) -> ApiResult<BackendResponse> {
        self.call(ApiMethod::Post, "/users", Some(payload)).await
    }

    /// `PUT /users/{id}`
    pub async fn update_user(&self, id: i64, payload: &UserPayload) -> ApiResult<BackendResponse> {
        self.call(ApiMethod::Put, &format!("/users/{}", id), Some(payload)).await
    }

    /// `DELETE /users/{id}`
    pub async fn delete_user(&self, id: i64) -> ApiResult<BackendResponse> {
        self.call(ApiMethod::Delete, &format!("/users/{}", id), NO_BODY).await
    }

    /// `GET /`, the backend liveness probe.
    pub async fn ping(&self) -> ApiResult<BackendResponse> {
        self.call(ApiMethod::Get, "/", NO_BODY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ApiClient::new(&BackendConfig {
            api_base_url: "http://localhost:5000/".into(),
            timeout_secs: 10,
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let client = ApiClient::new(&BackendConfig {
            api_base_url: " http://localhost:5000/\n".into(),
            timeout_secs: 10,
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_refused_connection_is_unreachable() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&BackendConfig {
            api_base_url: format!("http://{}", addr),
            timeout_secs: 2,
        })
        .unwrap();

        let err = client.list_users().await.unwrap_err();
        match err {
            ApiError::Unreachable { method, url, .. } => {
                assert_eq!(method, ApiMethod::Get);
                assert_eq!(url, format!("http://{}/users", addr));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
