use crate::error::MediaError;
use async_trait::async_trait;
use peerwave_core::{IceCandidate, SessionDescription};

/// The media/transport engine behind one peer connection (browser
/// RTCPeerConnection, a native WebRTC stack, a test double). The
/// negotiator drives it but never looks inside the descriptors it
/// produces.
#[async_trait]
pub trait MediaSession: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription, MediaError>;

    async fn create_answer(&self) -> Result<SessionDescription, MediaError>;

    async fn set_local_description(&self, desc: SessionDescription) -> Result<(), MediaError>;

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<(), MediaError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), MediaError>;
}
