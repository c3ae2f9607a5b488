//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all page handlers
//! - Wire up middleware (tracing, request ID, timeout, panic capture)
//! - Inject the immutable config, API client and signing key as state
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, extract::FromRef, http::Request, Router};
use axum_extra::extract::cookie::Key;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::{ApiClient, ApiResult};
use crate::config::FrontendConfig;
use crate::flash::{signing_key, CookieName};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::pages;

/// Extra time granted to a whole page request beyond the backend timeout.
const REQUEST_GRACE_SECS: u64 = 5;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FrontendConfig>,
    pub api: ApiClient,
    key: Key,
    cookie_name: CookieName,
}

impl AppState {
    pub fn new(config: FrontendConfig) -> ApiResult<Self> {
        let api = ApiClient::new(&config.backend)?;
        let key = signing_key(config.session.secret_key.as_deref());
        let cookie_name = CookieName(Arc::from(config.session.cookie_name.as_str()));

        Ok(Self {
            config: Arc::new(config),
            api,
            key,
            cookie_name,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

impl FromRef<AppState> for CookieName {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_name.clone()
    }
}

/// HTTP server for the frontend.
pub struct HttpServer {
    router: Router,
    config: Arc<FrontendConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: FrontendConfig) -> ApiResult<Self> {
        let state = AppState::new(config)?;
        let config = state.config.clone();
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FrontendConfig, state: AppState) -> Router {
        let timeout = Duration::from_secs(config.backend.timeout_secs + REQUEST_GRACE_SECS);

        pages::router().with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(CatchPanicLayer::custom(pages::error::handle_panic))
                .layer(TimeoutLayer::new(timeout)),
        )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            api_base_url = %self.config.backend.api_base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }
}
