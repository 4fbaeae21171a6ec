//! Application startup and lifecycle management.

use crate::config::BlueprintConfig;
use crate::handlers;
use crate::models::Endpoint;
use crate::services::providers::chat_completions::{ChatCompletionsConfig, ChatCompletionsInvoker};
use crate::services::ModelInvoker;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{HeaderMap, Method},
    middleware,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: BlueprintConfig,
    pub invoker: Arc<dyn ModelInvoker>,
}

/// Build the HTTP router: one route per analysis endpoint plus probes.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check));

    for endpoint in Endpoint::ALL {
        router = router.route(
            endpoint.path(),
            get(move || handlers::endpoint_status(endpoint))
                .post(
                    move |State(state): State<AppState>,
                          headers: HeaderMap,
                          body: Result<Bytes, BytesRejection>| {
                        handlers::analyze(state, endpoint, headers, body)
                    },
                )
                .options(handlers::preflight),
        );
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the chat-completion invoker.
    pub async fn build(config: BlueprintConfig) -> Result<Self, AppError> {
        let invoker = ChatCompletionsInvoker::new(ChatCompletionsConfig::from(&config.model_api))
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        tracing::info!(
            base_url = %config.model_api.base_url,
            rooms_model = %config.models.rooms_model,
            validation_model = %config.models.validation_model,
            report_model = %config.models.report_model,
            mock_responses = config.mock_responses,
            "Initialized chat completion invoker"
        );

        Self::build_with_invoker(config, Arc::new(invoker)).await
    }

    /// Build the application around a caller-supplied invoker.
    pub async fn build_with_invoker(
        config: BlueprintConfig,
        invoker: Arc<dyn ModelInvoker>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let router = build_router(AppState { config, invoker });

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
