use crate::negotiator::NegotiationState;
use peerwave_core::SdpKind;
use thiserror::Error;

/// Failure reported by the media/transport collaborator. Opaque: the
/// engines behind [`crate::MediaSession`] have wildly different error
/// types, so implementations flatten them to a message.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct MediaError(pub String);

impl MediaError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum NegotiationError {
    /// The collaborator rejected an offer/answer step. Surfaced to the
    /// caller for a user-visible retry; the negotiator does not retry on
    /// its own and its state is left un-advanced.
    #[error("media negotiation failed during {op}: {source}")]
    MediaNegotiationFailure {
        op: &'static str,
        #[source]
        source: MediaError,
    },

    /// An offer or answer arrived in a state that does not accept it
    /// (duplicate answer, offer after the exchange completed). Recovered
    /// locally: logged and dropped, state untouched.
    #[error("stale {kind:?} message in state {state:?}")]
    StaleMessage {
        kind: SdpKind,
        state: NegotiationState,
    },

    /// A negotiation event arrived before a media session was attached.
    #[error("media session not attached yet")]
    CollaboratorUnavailable,
}

impl NegotiationError {
    /// Stale messages are ignored by policy; everything else must reach
    /// the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::StaleMessage { .. })
    }
}
