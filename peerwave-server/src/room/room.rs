use crate::room::room_command::RoomCommand;
use crate::signaling::SignalingOutput;
use peerwave_core::{PeerId, RoomId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Hard limit of the call model: one room, two participants.
pub const ROOM_CAPACITY: usize = 2;

/// One two-party call room. Holds the participant slots and relays
/// offer/answer/ICE between them; all negotiation logic lives on the
/// clients. The command loop exits once the last participant leaves.
pub struct Room {
    id: RoomId,
    participants: Vec<PeerId>,
    command_rx: mpsc::Receiver<RoomCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Room {
    pub fn new(
        id: RoomId,
        command_rx: mpsc::Receiver<RoomCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            id,
            participants: Vec::with_capacity(ROOM_CAPACITY),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!(room = %self.id, "room event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            if !self.handle_command(cmd).await {
                break;
            }
        }

        info!(room = %self.id, "room event loop finished");
    }

    /// Returns `false` once the room should shut down (last peer left).
    async fn handle_command(&mut self, cmd: RoomCommand) -> bool {
        match cmd {
            RoomCommand::Join { peer_id } => {
                if self.participants.contains(&peer_id) {
                    warn!(room = %self.id, peer = %peer_id, "peer already in room, ignoring join");
                    return true;
                }

                if self.participants.len() >= ROOM_CAPACITY {
                    info!(room = %self.id, peer = %peer_id, "room full, rejecting join");
                    self.signaling
                        .send_room_full(peer_id, self.id.clone())
                        .await;
                    return true;
                }

                self.participants.push(peer_id.clone());
                info!(
                    room = %self.id,
                    peer = %peer_id,
                    participants = self.participants.len(),
                    "peer joined"
                );

                // Only the joiner learns the count; with two participants
                // that makes exactly one side initiate the offer.
                self.signaling
                    .send_joined(peer_id, self.participants.len())
                    .await;
            }

            RoomCommand::Offer { from, sdp } => {
                let Some(other) = self.relay_target(&from, "offer") else {
                    return true;
                };
                self.signaling.send_offer(other, sdp).await;
            }

            RoomCommand::Answer { from, sdp } => {
                let Some(other) = self.relay_target(&from, "answer") else {
                    return true;
                };
                self.signaling.send_answer(other, sdp).await;
            }

            RoomCommand::IceCandidate {
                from,
                candidate,
                sdp_mid,
                sdp_m_line_index,
            } => {
                let Some(other) = self.relay_target(&from, "candidate") else {
                    return true;
                };
                self.signaling
                    .send_ice(other, candidate, sdp_mid, sdp_m_line_index)
                    .await;
            }

            RoomCommand::Leave { peer_id } => {
                let before = self.participants.len();
                self.participants.retain(|p| p != &peer_id);

                if self.participants.len() == before {
                    return true;
                }
                info!(room = %self.id, peer = %peer_id, "peer left");

                if let Some(remaining) = self.participants.first().cloned() {
                    self.signaling.send_peer_left(remaining).await;
                } else {
                    info!(room = %self.id, "room empty, shutting down");
                    return false;
                }
            }
        }

        true
    }

    /// Relay target for a signal from `from`: the other participant.
    /// Signals from peers that do not hold a slot (rejected joins, never
    /// joined at all) are dropped, not relayed into the call.
    fn relay_target(&self, from: &PeerId, what: &str) -> Option<PeerId> {
        if !self.participants.contains(from) {
            warn!(room = %self.id, peer = %from, "dropping {what} from non-participant");
            return None;
        }

        let other = self.participants.iter().find(|p| *p != from).cloned();
        if other.is_none() {
            warn!(room = %self.id, peer = %from, "no other participant, dropping {what}");
        }
        other
    }
}
