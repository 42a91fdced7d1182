use async_trait::async_trait;
use peerwave_core::{PeerId, RoomId};
use peerwave_server::SignalingOutput;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

#[derive(Debug, Clone, PartialEq)]
pub enum SentSignal {
    Joined { peer_id: PeerId, num_participants: usize },
    Offer { peer_id: PeerId, sdp: String },
    Answer { peer_id: PeerId, sdp: String },
    Ice { peer_id: PeerId, candidate: String },
    RoomFull { peer_id: PeerId, room: RoomId },
    PeerLeft { peer_id: PeerId },
}

/// Mock SignalingOutput that captures all outgoing signals.
pub struct MockSignalingOutput {
    tx: mpsc::UnboundedSender<SentSignal>,
    rx: Mutex<mpsc::UnboundedReceiver<SentSignal>>,
    signals: Arc<Mutex<Vec<SentSignal>>>,
}

impl MockSignalingOutput {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
            signals: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Wait for the next captured signal (events arrive asynchronously
    /// from the room task).
    pub async fn next_signal(&self) -> SentSignal {
        self.rx
            .lock()
            .await
            .recv()
            .await
            .expect("mock signaling channel closed")
    }

    pub async fn signals(&self) -> Vec<SentSignal> {
        self.signals.lock().await.clone()
    }

    pub async fn signals_for(&self, peer_id: &PeerId) -> Vec<SentSignal> {
        self.signals
            .lock()
            .await
            .iter()
            .filter(|s| {
                let target = match s {
                    SentSignal::Joined { peer_id, .. }
                    | SentSignal::Offer { peer_id, .. }
                    | SentSignal::Answer { peer_id, .. }
                    | SentSignal::Ice { peer_id, .. }
                    | SentSignal::RoomFull { peer_id, .. }
                    | SentSignal::PeerLeft { peer_id } => peer_id,
                };
                target == peer_id
            })
            .cloned()
            .collect()
    }

    async fn capture(&self, signal: SentSignal) {
        self.signals.lock().await.push(signal.clone());
        let _ = self.tx.send(signal);
    }
}

impl Default for MockSignalingOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send_joined(&self, peer_id: PeerId, num_participants: usize) {
        tracing::debug!("[MockSignaling] send_joined to {peer_id}");
        self.capture(SentSignal::Joined {
            peer_id,
            num_participants,
        })
        .await;
    }

    async fn send_offer(&self, peer_id: PeerId, sdp: String) {
        tracing::debug!("[MockSignaling] send_offer to {peer_id}");
        self.capture(SentSignal::Offer { peer_id, sdp }).await;
    }

    async fn send_answer(&self, peer_id: PeerId, sdp: String) {
        tracing::debug!("[MockSignaling] send_answer to {peer_id}");
        self.capture(SentSignal::Answer { peer_id, sdp }).await;
    }

    async fn send_ice(
        &self,
        peer_id: PeerId,
        candidate: String,
        _sdp_mid: Option<String>,
        _sdp_m_line_index: Option<u16>,
    ) {
        tracing::debug!("[MockSignaling] send_ice to {peer_id}");
        self.capture(SentSignal::Ice { peer_id, candidate }).await;
    }

    async fn send_room_full(&self, peer_id: PeerId, room: RoomId) {
        tracing::debug!("[MockSignaling] send_room_full to {peer_id}");
        self.capture(SentSignal::RoomFull { peer_id, room }).await;
    }

    async fn send_peer_left(&self, peer_id: PeerId) {
        tracing::debug!("[MockSignaling] send_peer_left to {peer_id}");
        self.capture(SentSignal::PeerLeft { peer_id }).await;
    }
}
