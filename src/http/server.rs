//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the registration handlers
//! - Wire up middleware (request ID, tracing, CORS, limits, timeout)
//! - Serve on a listener until the shutdown broadcast fires

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, Method, Request},
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::registro::{health_handler, registro_handler};
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::registry::RegistrationService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: RegistrationService,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),
}

/// HTTP server for the registration service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    pub fn new(config: ServiceConfig, service: RegistrationService) -> Result<Self, ServerError> {
        let state = AppState { service };
        let router = Self::build_router(&config, state)?;
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Result<Router, ServerError> {
        let origin = HeaderValue::from_str(&config.cors.allowed_origin)
            .map_err(|_| ServerError::InvalidOrigin(config.cors.allowed_origin.clone()))?;

        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]);

        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id(request),
            )
        });

        Ok(Router::new()
            .route("/registro", post(registro_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(cors)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(trace)
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId)))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            strict_validation = self.config.security.strict_validation,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
