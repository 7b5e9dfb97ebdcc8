use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use board::{ClientEvent, ClientId, Document, LiveCursor, RoomId, ServerEvent};

use crate::roster::{Roster, Session};

pub type RoomTx = UnboundedSender<RoomCommand>;
pub type ConnectionTx = UnboundedSender<ConnectionEvent>;

/// Traffic from a room to one connection.
#[derive(Debug)]
pub enum ConnectionEvent {
    /// Server-built message, encoded at the socket edge.
    Event(ServerEvent),
    /// Client payload forwarded verbatim.
    Relay(String),
}

#[derive(Debug)]
pub enum RoomCommand {
    Join {
        client_id: ClientId,
        username: String,
        tx: ConnectionTx,
    },
    Leave {
        from: ClientId,
    },
    Event {
        from: ClientId,
        event: ClientEvent,
        raw: String,
    },
}

/// One whiteboard room: the canvas plus whoever is looking at it.
///
/// A room only ever runs inside its own task (see [`spawn_room`]), so
/// commands are applied one at a time and every mutation lands before its
/// relay goes out. Rooms are never torn down; an emptied room keeps its
/// canvas for the next visitor.
struct Room {
    room_id: RoomId,
    document: Document,
    roster: Roster,
}

impl Room {
    fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            document: Document::new(),
            roster: Roster::new(),
        }
    }

    fn handle_command(&mut self, command: RoomCommand) {
        match command {
            RoomCommand::Join {
                client_id,
                username,
                tx,
            } => self.join(client_id, username, tx),
            RoomCommand::Leave { from } => self.leave(from),
            RoomCommand::Event { from, event, raw } => self.handle_event(from, event, raw),
        }
    }

    fn join(&mut self, client_id: ClientId, username: String, tx: ConnectionTx) {
        log::info!(
            "connection {} joined room {} as {}",
            client_id,
            self.room_id,
            username
        );
        self.roster.join(Session {
            client_id,
            username,
            tx,
        });

        // Everyone, the newcomer included, sees the new user list first;
        // the canvas snapshot then goes to the newcomer alone.
        self.broadcast(&ServerEvent::UsersUpdate(self.roster.usernames()), None);
        if let Some(session) = self.roster.get(&client_id) {
            session.send(ConnectionEvent::Event(ServerEvent::CanvasLoad(
                self.document.snapshot(),
            )));
        }
    }

    fn leave(&mut self, from: ClientId) {
        // A second leave for the same connection finds no session and
        // stays silent.
        if let Some(session) = self.roster.leave(&from) {
            log::info!("{} left room {}", session.username, self.room_id);
            self.broadcast(&ServerEvent::UsersUpdate(self.roster.usernames()), None);
            self.broadcast(&ServerEvent::CursorRemove { client_id: from }, None);
        }
    }

    fn handle_event(&mut self, from: ClientId, event: ClientEvent, raw: String) {
        match event {
            ClientEvent::CursorMove { x, y } => {
                let username = match self.roster.username_of(&from) {
                    Some(username) => username.to_owned(),
                    None => return,
                };
                let cursor = LiveCursor {
                    x,
                    y,
                    username,
                    client_id: from,
                };
                self.broadcast(&ServerEvent::CursorMove(cursor), Some(&from));
            }
            ClientEvent::PathCreated(object) => {
                self.document.create(object);
                self.relay(&raw, &from);
            }
            ClientEvent::ObjectModified(object) => {
                self.document.update(object);
                self.relay(&raw, &from);
            }
            ClientEvent::ObjectRemoved(target) => {
                if let Some(id) = target.get("id") {
                    self.document.delete(id);
                }
                self.relay(&raw, &from);
            }
            ClientEvent::CanvasClear => {
                self.document.clear();
                self.relay(&raw, &from);
            }
        }
    }

    fn broadcast(&self, event: &ServerEvent, without: Option<&ClientId>) {
        for session in self.roster.iter() {
            if without.map_or(false, |excluded| excluded == &session.client_id) {
                continue;
            }
            session.send(ConnectionEvent::Event(event.clone()));
        }
    }

    fn relay(&self, raw: &str, from: &ClientId) {
        for session in self.roster.iter() {
            if &session.client_id == from {
                continue;
            }
            session.send(ConnectionEvent::Relay(raw.to_owned()));
        }
    }
}

pub fn spawn_room(room_id: RoomId) -> RoomTx {
    let (room_tx, mut room_rx) = unbounded_channel::<RoomCommand>();

    tokio::spawn(async move {
        let mut room = Box::new(Room::new(room_id));

        while let Some(command) = room_rx.recv().await {
            room.handle_command(command);
        }
    });

    return room_tx;
}
