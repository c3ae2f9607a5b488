//! Page handlers.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → users.rs / health.rs (extract form fields or path id)
//!     → api::ApiClient (one backend call)
//!     → interpret status and body
//!     → flash::NotificationStore (record outcome)
//!     → templates.rs renders, or redirect to the list
//! ```
//!
//! # Design Decisions
//! - Backend absence and rejection are recovered locally and surface only
//!   as notifications
//! - Only malformed input (non-numeric age) and panics reach the 500 page

pub mod error;
pub mod form;
pub mod health;
pub mod templates;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::http::server::AppState;

pub use error::PageError;

/// Routes exposed to browsers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index))
        .route("/add_user", get(users::add_user_form).post(users::add_user))
        .route(
            "/edit_user/{id}",
            get(users::edit_user_form).post(users::edit_user),
        )
        .route("/delete_user/{id}", post(users::remove_user))
        .route("/api/health", get(health::health))
        .fallback(error::not_found)
}
