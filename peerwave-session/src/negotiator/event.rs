use crate::collaborator::MediaSession;
use peerwave_core::{IceCandidate, SessionDescription};
use std::fmt;
use std::sync::Arc;

/// Inbound events of one session, processed strictly in arrival order by
/// [`crate::SessionDriver`].
pub enum SessionEvent {
    /// Local capture finished; the peer connection is ready to be driven.
    MediaReady(Arc<dyn MediaSession>),
    /// Join confirmation from the signaling server.
    RoomJoined { participants: usize },
    /// Remote offer delivered by the signaling transport.
    OfferReceived(SessionDescription),
    /// Remote answer delivered by the signaling transport.
    AnswerReceived(SessionDescription),
    /// Remote ICE candidate delivered by the signaling transport.
    CandidateReceived(IceCandidate),
    /// ICE candidate produced by the local media engine.
    CandidateGenerated(IceCandidate),
}

impl fmt::Debug for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MediaReady(_) => f.write_str("MediaReady(..)"),
            Self::RoomJoined { participants } => f
                .debug_struct("RoomJoined")
                .field("participants", participants)
                .finish(),
            Self::OfferReceived(desc) => f.debug_tuple("OfferReceived").field(desc).finish(),
            Self::AnswerReceived(desc) => f.debug_tuple("AnswerReceived").field(desc).finish(),
            Self::CandidateReceived(c) => f.debug_tuple("CandidateReceived").field(c).finish(),
            Self::CandidateGenerated(c) => f.debug_tuple("CandidateGenerated").field(c).finish(),
        }
    }
}
