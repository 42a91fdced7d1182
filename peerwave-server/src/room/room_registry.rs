use crate::room::{Room, RoomCommand};
use crate::signaling::SignalingOutput;
use dashmap::DashMap;
use peerwave_core::RoomId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Lazily spawns a room task per room id and tears the entry down when
/// the room empties.
#[derive(Clone)]
pub struct RoomRegistry {
    rooms: Arc<DashMap<RoomId, mpsc::Sender<RoomCommand>>>,
    signaling: Arc<dyn SignalingOutput>,
}

impl RoomRegistry {
    pub fn new(signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            signaling,
        }
    }

    pub fn get_room_sender(&self, room_id: &RoomId) -> mpsc::Sender<RoomCommand> {
        loop {
            let sender = self
                .rooms
                .entry(room_id.clone())
                .or_insert_with(|| self.spawn_room(room_id))
                .clone();

            if !sender.is_closed() {
                return sender;
            }

            // The room emptied and exited but has not unregistered itself
            // yet; evict the stale entry and create a fresh room.
            self.rooms.remove_if(room_id, |_, tx| tx.is_closed());
        }
    }

    fn spawn_room(&self, room_id: &RoomId) -> mpsc::Sender<RoomCommand> {
        info!(room = %room_id, "creating new room");
        let (tx, rx) = mpsc::channel(100);
        let room = Room::new(room_id.clone(), rx, self.signaling.clone());

        let rooms = self.rooms.clone();
        let id = room_id.clone();
        tokio::spawn(async move {
            room.run().await;
            rooms.remove_if(&id, |_, tx| tx.is_closed());
            info!(room = %id, "room removed from registry");
        });

        tx
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
