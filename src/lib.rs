//! Server-rendered user management frontend for a remote users API.

pub mod api;
pub mod config;
pub mod flash;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;

pub use config::FrontendConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
