use board::ClientId;

use crate::room::{ConnectionEvent, ConnectionTx};

/// One connected user: the connection's identity, display name, and the
/// channel its socket drains.
#[derive(Debug)]
pub struct Session {
    pub client_id: ClientId,
    pub username: String,
    pub tx: ConnectionTx,
}

impl Session {
    /// Delivery is best-effort per recipient. A closed channel means the
    /// socket already died; its Leave is on the way, so just skip it.
    pub fn send(&self, event: ConnectionEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("connection {} is gone, dropping event", self.client_id);
        }
    }
}

/// Join-ordered members of one room.
#[derive(Debug, Default)]
pub struct Roster {
    sessions: Vec<Session>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }

    pub fn join(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// Removes and returns the session, or `None` if it already left.
    pub fn leave(&mut self, client_id: &ClientId) -> Option<Session> {
        let position = self
            .sessions
            .iter()
            .position(|session| &session.client_id == client_id)?;
        Some(self.sessions.remove(position))
    }

    pub fn get(&self, client_id: &ClientId) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|session| &session.client_id == client_id)
    }

    pub fn username_of(&self, client_id: &ClientId) -> Option<&str> {
        self.get(client_id).map(|session| session.username.as_str())
    }

    /// Display names in join order. Duplicates are real: the same user in
    /// two tabs is two sessions.
    pub fn usernames(&self) -> Vec<String> {
        self.sessions
            .iter()
            .map(|session| session.username.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::uuid::Uuid;
    use tokio::sync::mpsc::unbounded_channel;

    fn session(username: &str) -> Session {
        let (tx, _) = unbounded_channel();
        Session {
            client_id: Uuid::new_v4(),
            username: username.to_owned(),
            tx,
        }
    }

    #[test]
    fn it_preserves_join_order() {
        let mut roster = Roster::new();
        roster.join(session("carol"));
        roster.join(session("alice"));
        roster.join(session("bob"));
        assert_eq!(roster.usernames(), vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn it_returns_the_leaving_session_once() {
        let mut roster = Roster::new();
        let left = session("alice");
        let client_id = left.client_id;
        roster.join(left);
        roster.join(session("bob"));

        let removed = roster.leave(&client_id).expect("");
        assert_eq!(removed.username, "alice");
        assert_eq!(roster.usernames(), vec!["bob"]);

        assert!(roster.leave(&client_id).is_none());
    }

    #[test]
    fn it_keeps_duplicate_names_apart() {
        let mut roster = Roster::new();
        let first = session("alice");
        let first_id = first.client_id;
        roster.join(first);
        roster.join(session("alice"));

        assert_eq!(roster.usernames(), vec!["alice", "alice"]);
        roster.leave(&first_id).expect("");
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn it_sends_without_panicking_on_a_closed_channel() {
        let (tx, rx) = unbounded_channel();
        let member = Session {
            client_id: Uuid::new_v4(),
            username: "alice".to_owned(),
            tx,
        };
        drop(rx);
        member.send(ConnectionEvent::Relay("{}".to_owned()));
    }
}
