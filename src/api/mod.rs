//! Backend API adapter.
//!
//! # Data Flow
//! ```text
//! Page handler
//!     → client.rs (method + path + optional JSON payload)
//!     → backend API (one request, fixed timeout)
//!     → BackendResponse { status, body } | ApiError::Unreachable
//!     → handler interprets status, decodes types.rs shapes
//! ```

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{
    ApiError, ApiErrorBody, ApiMethod, ApiResult, BackendResponse, User, UserEnvelope, UserList,
    UserPayload,
};
