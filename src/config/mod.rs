//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overrides: API_BASE_URL, SECRET_KEY, PORT, DEBUG)
//!     → validation.rs (semantic checks)
//!     → FrontendConfig (validated, immutable)
//!     → shared via Arc to every handler through router state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no ambient global lookup
//! - All fields have defaults except the backend origin
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env, load_config, ConfigError};
pub use schema::{
    BackendConfig, FrontendConfig, ListenerConfig, LogFormat, ObservabilityConfig, SessionConfig,
};
pub use validation::{validate_config, ValidationError};
