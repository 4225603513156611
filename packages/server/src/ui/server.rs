//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    usecase::{ListParticipantsUseCase, SessionLifecycle},
};

use super::{
    handler::{health_check, list_participants, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat hub server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(lifecycle, list_participants_usecase, ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    /// Session Lifecycle Controller
    lifecycle: Arc<SessionLifecycle>,
    /// ListParticipantsUseCase（参加者一覧取得のユースケース）
    list_participants_usecase: Arc<ListParticipantsUseCase>,
    config: ServerConfig,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        lifecycle: Arc<SessionLifecycle>,
        list_participants_usecase: Arc<ListParticipantsUseCase>,
        config: ServerConfig,
    ) -> Self {
        Self {
            lifecycle,
            list_participants_usecase,
            config,
        }
    }

    /// Build the router with every endpoint.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            lifecycle: self.lifecycle.clone(),
            list_participants_usecase: self.list_participants_usecase.clone(),
            outbound_buffer: self.config.outbound_buffer,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/participants", get(list_participants))
            .layer(self.cors_layer())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// CORS for the browser frontend: one allowed origin, GET and POST.
    fn cors_layer(&self) -> CorsLayer {
        let cors = CorsLayer::new().allow_methods([Method::GET, Method::POST]);
        match HeaderValue::from_str(&self.config.cors_origin) {
            Ok(origin) => cors.allow_origin(AllowOrigin::list([origin])),
            Err(e) => {
                tracing::warn!(
                    "Invalid CORS origin '{}', cross-origin requests disabled: {}",
                    self.config.cors_origin,
                    e
                );
                cors
            }
        }
    }

    /// Bind to the configured address and serve until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        tracing::info!("Chat hub listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
