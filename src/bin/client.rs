//! Realtime chat CLI client.
//!
//! Joins a room on the chat server with a display name. Every line of input
//! replaces your message field; an empty line clears it. Reconnects on
//! connection loss (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin client -- --code gaming123 --name Alice
//! cargo run --bin client -- -c gaming123 -n Bob
//! ```

use clap::Parser;

use rumorum::common::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Realtime ephemeral chat client", long_about = None)]
struct Args {
    /// Room code to join
    #[arg(short = 'c', long)]
    code: String,

    /// Display name within the room
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = rumorum::client::run_client(args.url, args.code, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
