use crate::error::NegotiationError;
use crate::negotiator::{Negotiator, SessionEvent};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Serialized event loop around one [`Negotiator`].
///
/// Events are processed strictly in arrival order; each handler runs to
/// completion, awaited collaborator calls included, before the next event
/// is taken. Stale messages are logged and dropped here; media failures
/// go out on the error channel for the UI to act on. Dropping the event
/// sender tears the session down — negotiator and queue are simply
/// discarded.
pub struct SessionDriver {
    negotiator: Negotiator,
    event_rx: mpsc::Receiver<SessionEvent>,
    error_tx: mpsc::UnboundedSender<NegotiationError>,
}

/// Caller-facing ends of a spawned driver.
pub struct SessionHandle {
    pub events: mpsc::Sender<SessionEvent>,
    pub errors: mpsc::UnboundedReceiver<NegotiationError>,
}

impl SessionDriver {
    pub fn new(
        negotiator: Negotiator,
        event_rx: mpsc::Receiver<SessionEvent>,
        error_tx: mpsc::UnboundedSender<NegotiationError>,
    ) -> Self {
        Self {
            negotiator,
            event_rx,
            error_tx,
        }
    }

    /// Spawn the driver on the current runtime and return its channels.
    pub fn spawn(negotiator: Negotiator) -> SessionHandle {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (error_tx, error_rx) = mpsc::unbounded_channel();

        let driver = Self::new(negotiator, event_rx, error_tx);
        tokio::spawn(driver.run());

        SessionHandle {
            events: event_tx,
            errors: error_rx,
        }
    }

    pub async fn run(mut self) {
        info!(room = %self.negotiator.room(), "session event loop started");

        while let Some(event) = self.event_rx.recv().await {
            if let Err(e) = self.dispatch(event).await {
                if e.is_recoverable() {
                    warn!(room = %self.negotiator.room(), "ignoring signaling message: {e}");
                } else {
                    error!(room = %self.negotiator.room(), "negotiation failed: {e}");
                    let _ = self.error_tx.send(e);
                }
            }
        }

        info!(room = %self.negotiator.room(), "session event loop finished");
    }

    async fn dispatch(&mut self, event: SessionEvent) -> Result<(), NegotiationError> {
        match event {
            SessionEvent::MediaReady(media) => {
                self.negotiator.attach_media(media);
                Ok(())
            }
            SessionEvent::RoomJoined { participants } => {
                self.negotiator.on_room_joined(participants).await
            }
            SessionEvent::OfferReceived(offer) => self.negotiator.on_offer_received(offer).await,
            SessionEvent::AnswerReceived(answer) => {
                self.negotiator.on_answer_received(answer).await
            }
            SessionEvent::CandidateReceived(candidate) => {
                self.negotiator.on_ice_candidate_received(candidate).await
            }
            SessionEvent::CandidateGenerated(candidate) => {
                self.negotiator.on_ice_candidate_generated(candidate).await
            }
        }
    }
}
