use peerwave_core::PeerId;

/// Commands entering a room from the signaling layer (WebSocket).
#[derive(Debug)]
pub enum RoomCommand {
    /// A peer asks to occupy a slot in the room.
    Join { peer_id: PeerId },

    /// SDP offer to relay to the other participant.
    Offer { from: PeerId, sdp: String },

    /// SDP answer to relay to the other participant.
    Answer { from: PeerId, sdp: String },

    /// ICE candidate to relay to the other participant.
    IceCandidate {
        from: PeerId,
        candidate: String,
        sdp_mid: Option<String>,
        sdp_m_line_index: Option<u16>,
    },

    /// The peer's socket closed or it left the call.
    Leave { peer_id: PeerId },
}
