use crate::collaborator::{MediaSession, SignalSink};
use crate::config::SessionConfig;
use crate::error::NegotiationError;
use crate::negotiator::pending_candidates::PendingCandidates;
use crate::negotiator::state::NegotiationState;
use peerwave_core::{IceCandidate, RoomId, SdpKind, SessionDescription};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Offer/answer state machine for one two-party room.
///
/// One instance per room, owned by the local peer's session and
/// constructed at join time; the remote peer runs its own. The negotiator
/// decides who offers and who answers, and holds back remote ICE
/// candidates until a remote description exists to apply them against.
///
/// Glare policy: if an offer arrives while we are producing our own
/// (`AwaitingLocalOffer`), the received offer wins and we answer it. See
/// [`Negotiator::on_offer_received`].
pub struct Negotiator {
    room: RoomId,
    config: SessionConfig,
    state: NegotiationState,
    media: Option<Arc<dyn MediaSession>>,
    signals: Arc<dyn SignalSink>,
    pending: PendingCandidates,
    remote_applied: bool,
}

impl Negotiator {
    pub fn new(room: RoomId, config: SessionConfig, signals: Arc<dyn SignalSink>) -> Self {
        Self {
            room,
            config,
            state: NegotiationState::Idle,
            media: None,
            signals,
            pending: PendingCandidates::new(),
            remote_applied: false,
        }
    }

    pub fn with_media(
        room: RoomId,
        config: SessionConfig,
        media: Arc<dyn MediaSession>,
        signals: Arc<dyn SignalSink>,
    ) -> Self {
        let mut negotiator = Self::new(room, config, signals);
        negotiator.media = Some(media);
        negotiator
    }

    /// Hand over the media engine once local capture succeeded. Events
    /// that need it fail with `CollaboratorUnavailable` until then.
    pub fn attach_media(&mut self, media: Arc<dyn MediaSession>) {
        self.media = Some(media);
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn has_remote_description(&self) -> bool {
        self.remote_applied
    }

    pub fn pending_candidates(&self) -> usize {
        self.pending.len()
    }

    /// Drop all negotiation progress: back to `Idle`, queue cleared,
    /// remote description forgotten. Required before the same instance
    /// may apply another remote description.
    pub fn reset(&mut self) {
        info!(room = %self.room, "resetting negotiation state");
        self.state = NegotiationState::Idle;
        self.pending.clear();
        self.remote_applied = false;
    }

    /// Join confirmation arrived. With two participants the room is full
    /// and the impolite side starts the exchange by offering; with fewer
    /// we keep waiting.
    pub async fn on_room_joined(&mut self, participants: usize) -> Result<(), NegotiationError> {
        if participants < 2 {
            debug!(room = %self.room, participants, "room not full yet, staying idle");
            return Ok(());
        }

        if self.state != NegotiationState::Idle {
            warn!(
                room = %self.room,
                state = ?self.state,
                "join confirmation while negotiation already underway, ignoring"
            );
            return Ok(());
        }

        if self.config.polite {
            debug!(room = %self.room, "polite peer, waiting for the remote offer");
            self.state = NegotiationState::AwaitingRemoteOffer;
            return Ok(());
        }

        let media = self.media()?;
        self.state = NegotiationState::AwaitingLocalOffer;

        let offer = match media.create_offer().await {
            Ok(offer) => offer,
            Err(source) => {
                self.state = NegotiationState::Idle;
                return Err(NegotiationError::MediaNegotiationFailure {
                    op: "create_offer",
                    source,
                });
            }
        };

        if let Err(source) = media.set_local_description(offer.clone()).await {
            self.state = NegotiationState::Idle;
            return Err(NegotiationError::MediaNegotiationFailure {
                op: "set_local_description",
                source,
            });
        }

        self.state = NegotiationState::AwaitingRemoteAnswer;
        info!(room = %self.room, "local offer set, sending it out");
        self.signals.send_offer(self.room.clone(), offer).await;
        Ok(())
    }

    /// Remote offer arrived: apply it, flush queued candidates, answer.
    ///
    /// Accepted in `Idle`, `AwaitingRemoteOffer` and, for glare, in
    /// `AwaitingLocalOffer` — the last received offer wins and this side
    /// becomes the answerer. Anywhere else the offer is stale.
    pub async fn on_offer_received(
        &mut self,
        offer: SessionDescription,
    ) -> Result<(), NegotiationError> {
        // A remote description may be applied once per reset, even if a
        // later collaborator step failed and kept state un-advanced.
        if !self.state.accepts_offer() || self.remote_applied {
            return Err(NegotiationError::StaleMessage {
                kind: SdpKind::Offer,
                state: self.state,
            });
        }

        if self.state == NegotiationState::AwaitingLocalOffer {
            info!(room = %self.room, "offer glare: remote offer wins, answering it");
        }

        let media = self.media()?;
        self.apply_remote_description(&media, offer).await?;

        let answer = match media.create_answer().await {
            Ok(answer) => answer,
            Err(source) => {
                return Err(NegotiationError::MediaNegotiationFailure {
                    op: "create_answer",
                    source,
                });
            }
        };

        if let Err(source) = media.set_local_description(answer.clone()).await {
            return Err(NegotiationError::MediaNegotiationFailure {
                op: "set_local_description",
                source,
            });
        }

        self.state = NegotiationState::Stable;
        info!(room = %self.room, "answer set, sending it out");
        self.signals.send_answer(self.room.clone(), answer).await;
        Ok(())
    }

    /// Remote answer arrived. Only meaningful while we are waiting for
    /// one; a duplicate or unsolicited answer is stale and leaves state
    /// untouched.
    pub async fn on_answer_received(
        &mut self,
        answer: SessionDescription,
    ) -> Result<(), NegotiationError> {
        if self.state != NegotiationState::AwaitingRemoteAnswer {
            return Err(NegotiationError::StaleMessage {
                kind: SdpKind::Answer,
                state: self.state,
            });
        }

        let media = self.media()?;
        self.apply_remote_description(&media, answer).await?;

        self.state = NegotiationState::Stable;
        info!(room = %self.room, "remote answer applied, negotiation stable");
        Ok(())
    }

    /// Remote ICE candidate arrived. Applied immediately once a remote
    /// description exists, queued otherwise.
    pub async fn on_ice_candidate_received(
        &mut self,
        candidate: IceCandidate,
    ) -> Result<(), NegotiationError> {
        if !self.remote_applied {
            debug!(room = %self.room, "no remote description yet, queueing candidate");
            self.pending.push(candidate);
            return Ok(());
        }

        let media = self.media()?;
        if let Err(e) = media.add_ice_candidate(candidate).await {
            warn!(room = %self.room, "failed to add remote ICE candidate: {e}");
        }
        Ok(())
    }

    /// Locally generated candidate: hand it to the signaling transport,
    /// tagged with our room.
    pub async fn on_ice_candidate_generated(
        &mut self,
        candidate: IceCandidate,
    ) -> Result<(), NegotiationError> {
        self.signals.send_ice(self.room.clone(), candidate).await;
        Ok(())
    }

    fn media(&self) -> Result<Arc<dyn MediaSession>, NegotiationError> {
        self.media
            .clone()
            .ok_or(NegotiationError::CollaboratorUnavailable)
    }

    /// Set the remote description and flush the candidate queue right
    /// behind it. The flush happens exactly once: afterwards
    /// `remote_applied` routes candidates straight to the engine.
    async fn apply_remote_description(
        &mut self,
        media: &Arc<dyn MediaSession>,
        desc: SessionDescription,
    ) -> Result<(), NegotiationError> {
        debug_assert!(!self.remote_applied, "remote description set twice");

        if let Err(source) = media.set_remote_description(desc).await {
            return Err(NegotiationError::MediaNegotiationFailure {
                op: "set_remote_description",
                source,
            });
        }
        self.remote_applied = true;

        let queued = self.pending.drain();
        if !queued.is_empty() {
            debug!(room = %self.room, count = queued.len(), "flushing queued ICE candidates");
        }
        for candidate in queued {
            if let Err(e) = media.add_ice_candidate(candidate).await {
                warn!(room = %self.room, "failed to add queued ICE candidate: {e}");
            }
        }
        Ok(())
    }
}
