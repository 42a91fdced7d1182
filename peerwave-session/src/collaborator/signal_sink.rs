use async_trait::async_trait;
use peerwave_core::{IceCandidate, RoomId, SessionDescription};

/// Outbound half of the signaling transport (WebSocket client, socket
/// library, test double). Every payload is tagged with the room it
/// belongs to.
#[async_trait]
pub trait SignalSink: Send + Sync {
    /// Send our SDP offer to the other participant of the room.
    async fn send_offer(&self, room: RoomId, offer: SessionDescription);

    /// Send our SDP answer to the other participant of the room.
    async fn send_answer(&self, room: RoomId, answer: SessionDescription);

    /// Send a locally generated ICE candidate to the other participant.
    async fn send_ice(&self, room: RoomId, candidate: IceCandidate);
}
