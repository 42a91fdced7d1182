use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use peerwave_core::{IceServerConfig, PeerId, RoomId, SignalMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

struct SignalingInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
    ice_servers: Vec<IceServerConfig>,
}

/// Registry of connected WebSockets plus the ICE configuration handed to
/// clients on connect.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
                ice_servers,
            }),
        }
    }

    pub fn get_ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.clone()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.inner.peers.remove(peer_id);
    }

    pub fn send_signal(&self, peer_id: PeerId, msg: SignalMessage) {
        if let Some(peer) = self.inner.peers.get(&peer_id) {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if let Err(e) = peer.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {peer_id}: {e:?}");
                    }
                }
                Err(e) => error!("Failed to serialize signal message: {e}"),
            }
        } else {
            warn!("Attempted to send signal to disconnected peer {peer_id}");
        }
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_joined(&self, peer_id: PeerId, num_participants: usize) {
        self.send_signal(peer_id, SignalMessage::Joined { num_participants });
    }

    async fn send_offer(&self, peer_id: PeerId, sdp: String) {
        self.send_signal(peer_id, SignalMessage::Offer { sdp });
    }

    async fn send_answer(&self, peer_id: PeerId, sdp: String) {
        self.send_signal(peer_id, SignalMessage::Answer { sdp });
    }

    async fn send_ice(
        &self,
        peer_id: PeerId,
        candidate: String,
        sdp_mid: Option<String>,
        sdp_m_line_index: Option<u16>,
    ) {
        self.send_signal(
            peer_id,
            SignalMessage::IceCandidate {
                candidate,
                sdp_mid,
                sdp_m_line_index,
            },
        );
    }

    async fn send_room_full(&self, peer_id: PeerId, room: RoomId) {
        self.send_signal(peer_id, SignalMessage::RoomFull { room });
    }

    async fn send_peer_left(&self, peer_id: PeerId) {
        self.send_signal(peer_id, SignalMessage::PeerLeft);
    }
}
