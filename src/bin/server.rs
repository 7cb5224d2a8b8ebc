//! Realtime chat server: rooms, per-member message fields, live fan-out.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use rumorum::{
    common::{logger::setup_logger, time::SystemClock},
    infrastructure::{pusher::WebSocketFieldPusher, repository::InMemoryRoomRepository},
    ui::Server,
    usecase::{
        CreateRoomUseCase, GetRoomUseCase, JoinRoomUseCase, LeaveRoomUseCase, UpdateFieldUseCase,
    },
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Realtime ephemeral chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository (the in-memory tree store)
    // 2. Pusher (fan-out to subscribed sessions)
    // 3. Clock
    // 4. UseCases
    // 5. Server
    let repository = Arc::new(InMemoryRoomRepository::new());
    let pusher = Arc::new(WebSocketFieldPusher::new());
    let clock = Arc::new(SystemClock);

    let create_room_usecase = Arc::new(CreateRoomUseCase::new(repository.clone(), clock.clone()));
    let get_room_usecase = Arc::new(GetRoomUseCase::new(repository.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        pusher.clone(),
        clock.clone(),
    ));
    let update_field_usecase = Arc::new(UpdateFieldUseCase::new(
        repository.clone(),
        pusher.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(repository, pusher));

    let server = Server::new(
        create_room_usecase,
        get_room_usecase,
        join_room_usecase,
        update_field_usecase,
        leave_room_usecase,
    );

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
