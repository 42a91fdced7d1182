use async_trait::async_trait;
use peerwave_core::{IceCandidate, RoomId, SessionDescription};
use peerwave_session::SignalSink;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum OutgoingSignal {
    Offer { room: RoomId, desc: SessionDescription },
    Answer { room: RoomId, desc: SessionDescription },
    Ice { room: RoomId, candidate: IceCandidate },
}

/// Mock SignalSink that captures all outgoing signals for verification.
#[derive(Default)]
pub struct MockSignalSink {
    signals: Arc<Mutex<Vec<OutgoingSignal>>>,
}

impl MockSignalSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn signals(&self) -> Vec<OutgoingSignal> {
        self.signals.lock().await.clone()
    }

    pub async fn offers(&self) -> Vec<SessionDescription> {
        self.signals
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                OutgoingSignal::Offer { desc, .. } => Some(desc.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn answers(&self) -> Vec<SessionDescription> {
        self.signals
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                OutgoingSignal::Answer { desc, .. } => Some(desc.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn ice_candidates(&self) -> Vec<(RoomId, IceCandidate)> {
        self.signals
            .lock()
            .await
            .iter()
            .filter_map(|s| match s {
                OutgoingSignal::Ice { room, candidate } => {
                    Some((room.clone(), candidate.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SignalSink for MockSignalSink {
    async fn send_offer(&self, room: RoomId, offer: SessionDescription) {
        tracing::debug!("[MockSignalSink] send_offer for room {room}");
        self.signals
            .lock()
            .await
            .push(OutgoingSignal::Offer { room, desc: offer });
    }

    async fn send_answer(&self, room: RoomId, answer: SessionDescription) {
        tracing::debug!("[MockSignalSink] send_answer for room {room}");
        self.signals
            .lock()
            .await
            .push(OutgoingSignal::Answer { room, desc: answer });
    }

    async fn send_ice(&self, room: RoomId, candidate: IceCandidate) {
        tracing::debug!("[MockSignalSink] send_ice for room {room}");
        self.signals
            .lock()
            .await
            .push(OutgoingSignal::Ice { room, candidate });
    }
}
