use anyhow::Result;
use axum::{Router, routing::get};
use clap::Parser;
use peerwave_core::IceServerConfig;
use peerwave_server::{AppState, RoomRegistry, SignalingService, ws_handler};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "peerwave-server")]
#[command(about = "Signaling server for two-party peerwave calls")]
struct Args {
    /// Address the WebSocket endpoint listens on.
    #[arg(long, default_value = "0.0.0.0:5000")]
    bind: SocketAddr,

    /// STUN/TURN server URLs handed to connecting clients.
    #[arg(long = "stun", default_value = "stun:stun.l.google.com:19302")]
    stun: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args = Args::parse();

    let ice_servers = vec![IceServerConfig {
        urls: args.stun.clone(),
        username: None,
        credential: None,
    }];

    let signaling = SignalingService::new(ice_servers);
    let rooms = RoomRegistry::new(Arc::new(signaling.clone()));

    let app = Router::new()
        .route("/ws/{peer_id}", get(ws_handler))
        .with_state(AppState { signaling, rooms });

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!("Signaling server listening on http://{}", args.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
