use async_trait::async_trait;
use peerwave_core::{PeerId, RoomId};

/// Seam between room logic and the WebSocket layer: everything a room
/// can push out to a connected peer. Mocked in tests.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Join confirmation, carrying the room's participant count.
    async fn send_joined(&self, peer_id: PeerId, num_participants: usize);

    /// Relay the other side's SDP offer.
    async fn send_offer(&self, peer_id: PeerId, sdp: String);

    /// Relay the other side's SDP answer.
    async fn send_answer(&self, peer_id: PeerId, sdp: String);

    /// Relay the other side's ICE candidate.
    async fn send_ice(
        &self,
        peer_id: PeerId,
        candidate: String,
        sdp_mid: Option<String>,
        sdp_m_line_index: Option<u16>,
    );

    /// Both slots taken; the join was rejected.
    async fn send_room_full(&self, peer_id: PeerId, room: RoomId);

    /// The other participant is gone.
    async fn send_peer_left(&self, peer_id: PeerId);
}
