//! Wire types exchanged with the backend API and error definitions.

use std::fmt;

use axum::body::Bytes;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub age: Option<i64>,
}

/// Body sent on create and update. Fields missing from the submitted form
/// serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

/// `GET /users` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct UserList {
    pub data: Vec<User>,
}

/// `GET /users/{id}` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub data: User,
}

/// Error body returned by the backend on rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// The closed set of methods the adapter issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ApiMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiMethod::Get => "GET",
            ApiMethod::Post => "POST",
            ApiMethod::Put => "PUT",
            ApiMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(self) -> bool {
        matches!(self, ApiMethod::Post | ApiMethod::Put)
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ApiMethod> for reqwest::Method {
    fn from(method: ApiMethod) -> Self {
        match method {
            ApiMethod::Get => reqwest::Method::GET,
            ApiMethod::Post => reqwest::Method::POST,
            ApiMethod::Put => reqwest::Method::PUT,
            ApiMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully buffered backend response, scoped to one handler invocation.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl BackendResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True when the backend answered with exactly `status`.
    pub fn is(&self, status: StatusCode) -> bool {
        self.status == status
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The `error` field of a rejection body, if the body has that shape.
    ///
    /// Bodies that do not parse are logged and yield `None`; callers fall back
    /// to their own generic message.
    pub fn error_message(&self) -> Option<String> {
        match self.json::<ApiErrorBody>() {
            Ok(body) => Some(body.error),
            Err(e) => {
                tracing::warn!(status = %self.status, error = %e, "Backend error body not understood");
                None
            }
        }
    }
}

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// No usable response: connection refused, timeout, DNS failure or a
    /// truncated body.
    #[error("backend unreachable: {method} {url}: {source}")]
    Unreachable {
        method: ApiMethod,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;
