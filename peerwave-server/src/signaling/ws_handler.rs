use crate::room::{RoomCommand, RoomRegistry};
use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use peerwave_core::{PeerId, RoomId, SignalMessage};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub signaling: SignalingService,
    pub rooms: RoomRegistry,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(peer_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let peer_id: PeerId = match peer_id.parse() {
        Ok(id) => id,
        Err(e) => {
            warn!("Rejecting WebSocket upgrade: {e}");
            return (StatusCode::BAD_REQUEST, "invalid peer id").into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, state))
        .into_response()
}

async fn handle_socket(socket: WebSocket, peer_id: PeerId, state: AppState) {
    info!("New WebSocket connection: {peer_id}");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.signaling.add_peer(peer_id.clone(), tx);
    state.signaling.send_signal(
        peer_id.clone(),
        SignalMessage::IceConfig {
            ice_servers: state.signaling.get_ice_servers(),
        },
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = state.clone();
        let peer_id = peer_id.clone();

        async move {
            // Bound to a room by the first Join frame; everything before
            // that has nowhere to go.
            let mut room: Option<(RoomId, mpsc::Sender<RoomCommand>)> = None;

            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<SignalMessage>(&text) {
                        Ok(signal) => {
                            if !route_signal(&state, &peer_id, signal, &mut room).await {
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid SignalMessage from {peer_id}: {e:?}"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }

            if let Some((_, room_tx)) = room {
                let _ = room_tx
                    .send(RoomCommand::Leave {
                        peer_id: peer_id.clone(),
                    })
                    .await;
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    state.signaling.remove_peer(&peer_id);
    info!("WebSocket disconnected: {peer_id}");
}

/// Returns `false` when the connection should be torn down.
async fn route_signal(
    state: &AppState,
    peer_id: &PeerId,
    signal: SignalMessage,
    room: &mut Option<(RoomId, mpsc::Sender<RoomCommand>)>,
) -> bool {
    match signal {
        SignalMessage::Join { room: room_id } => {
            info!("Peer {peer_id} wants to join room '{room_id}'");
            let room_tx = state.rooms.get_room_sender(&room_id);
            let cmd = RoomCommand::Join {
                peer_id: peer_id.clone(),
            };
            if let Err(e) = room_tx.send(cmd).await {
                error!("Room died: {e}");
                return false;
            }
            *room = Some((room_id, room_tx));
        }

        SignalMessage::Offer { sdp } => {
            forward(room, peer_id, |from| RoomCommand::Offer { from, sdp }).await;
        }

        SignalMessage::Answer { sdp } => {
            forward(room, peer_id, |from| RoomCommand::Answer { from, sdp }).await;
        }

        SignalMessage::IceCandidate {
            candidate,
            sdp_mid,
            sdp_m_line_index,
        } => {
            forward(room, peer_id, |from| RoomCommand::IceCandidate {
                from,
                candidate,
                sdp_mid,
                sdp_m_line_index,
            })
            .await;
        }

        _ => {}
    }

    true
}

async fn forward(
    room: &Option<(RoomId, mpsc::Sender<RoomCommand>)>,
    peer_id: &PeerId,
    make_cmd: impl FnOnce(PeerId) -> RoomCommand,
) {
    let Some((_, room_tx)) = room else {
        warn!("Signal from {peer_id} before joining a room, dropping");
        return;
    };
    let _ = room_tx.send(make_cmd(peer_id.clone())).await;
}
