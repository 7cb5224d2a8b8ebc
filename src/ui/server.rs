//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    CreateRoomUseCase, GetRoomUseCase, JoinRoomUseCase, LeaveRoomUseCase, UpdateFieldUseCase,
};

use super::{
    handler::{
        http::{create_room, debug_rooms, get_room_detail, get_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Realtime chat server
///
/// Encapsulates the wired-up usecases and exposes the router and the run loop.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     create_room_usecase,
///     get_room_usecase,
///     join_room_usecase,
///     update_field_usecase,
///     leave_room_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    create_room_usecase: Arc<CreateRoomUseCase>,
    get_room_usecase: Arc<GetRoomUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    update_field_usecase: Arc<UpdateFieldUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        create_room_usecase: Arc<CreateRoomUseCase>,
        get_room_usecase: Arc<GetRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        update_field_usecase: Arc<UpdateFieldUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
    ) -> Self {
        Self {
            create_room_usecase,
            get_room_usecase,
            join_room_usecase,
            update_field_usecase,
            leave_room_usecase,
        }
    }

    /// Build the axum router (also used by integration tests)
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            create_room_usecase: self.create_room_usecase,
            get_room_usecase: self.get_room_usecase,
            join_room_usecase: self.join_room_usecase,
            update_field_usecase: self.update_field_usecase,
            leave_room_usecase: self.leave_room_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", post(create_room).get(get_rooms))
            .route("/api/rooms/{code}", get(get_room_detail))
            .route("/debug/rooms", get(debug_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the realtime chat server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Realtime chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
