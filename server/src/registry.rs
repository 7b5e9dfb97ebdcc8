use std::collections::HashMap;
use std::sync::Mutex;

use board::RoomId;

use crate::room::{spawn_room, RoomTx};

/// Process-wide map of room handles, shared across all connections.
///
/// Rooms come into existence on first contact and are never removed; the
/// handle keeps the room task alive even when nobody is connected, which
/// is what lets a canvas survive everyone leaving.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<RoomId, RoomTx>>,
}

impl RoomRegistry {
    /// Returns the handle for `room_id`, spawning the room on first use.
    /// Concurrent first joins race to the lock, so exactly one room task
    /// ever exists per id.
    pub fn get_or_create(&self, room_id: &str) -> RoomTx {
        let mut rooms = self.rooms.lock().expect("room registry lock poisoned");
        match rooms.get(room_id) {
            Some(room_tx) => room_tx.clone(),
            None => {
                log::info!("opening room {}", room_id);
                let room_tx = spawn_room(room_id.to_owned());
                rooms.insert(room_id.to_owned(), room_tx.clone());
                room_tx
            }
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.lock().expect("room registry lock poisoned").len()
    }
}
