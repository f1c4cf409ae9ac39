//! Room membership
//!
//! A `Room` here is only the live roster: who is connected right now and under
//! which display name. Chat history, notes, files and the timer are separate
//! records that outlive the roster.

use crate::domain::{
    error::RoomError,
    value_object::{ConnectionId, RoomId, Timestamp, Username},
};

/// A connection present in a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub username: Username,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, username: Username, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            username,
            joined_at,
        }
    }
}

/// What [`Room::join`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// New member
    Joined,
    /// Same connection, same name: nothing changed
    AlreadyJoined,
    /// Same connection re-joined under a different name
    Renamed { previous: Username },
}

/// Live roster of one room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub participants: Vec<Participant>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            participants: Vec::new(),
            created_at,
        }
    }

    pub fn member_name(&self, connection_id: &ConnectionId) -> Option<&Username> {
        self.participants
            .iter()
            .find(|p| &p.connection_id == connection_id)
            .map(|p| &p.username)
    }

    pub fn is_username_taken(&self, username: &Username) -> bool {
        self.participants.iter().any(|p| &p.username == username)
    }

    /// Add a participant, enforcing one connection per name.
    ///
    /// The uniqueness check and the insert happen in the same call, so callers
    /// holding the room under a lock cannot race two joins onto one name.
    pub fn join(&mut self, participant: Participant) -> Result<JoinOutcome, RoomError> {
        let held_by_other = self.participants.iter().any(|p| {
            p.username == participant.username && p.connection_id != participant.connection_id
        });
        if held_by_other {
            return Err(RoomError::UsernameTaken(
                participant.username.into_string(),
            ));
        }

        match self
            .participants
            .iter_mut()
            .find(|p| p.connection_id == participant.connection_id)
        {
            Some(existing) if existing.username == participant.username => {
                Ok(JoinOutcome::AlreadyJoined)
            }
            Some(existing) => {
                let previous = std::mem::replace(&mut existing.username, participant.username);
                Ok(JoinOutcome::Renamed { previous })
            }
            None => {
                self.participants.push(participant);
                Ok(JoinOutcome::Joined)
            }
        }
    }

    /// Remove a connection, returning its participant record if it was present.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.connection_id == connection_id)?;
        Some(self.participants.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .map(|p| p.connection_id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(connection: &str, name: &str) -> Participant {
        Participant::new(
            ConnectionId::new(connection.to_string()).unwrap(),
            Username::new(name.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn new_room() -> Room {
        Room::new(RoomId::new("abc123".to_string()).unwrap(), Timestamp::new(0))
    }

    #[test]
    fn test_join_adds_participant() {
        // テスト項目: 新しい参加者が追加される
        // given (前提条件):
        let mut room = new_room();

        // when (操作):
        let result = room.join(participant("c1", "alice"));

        // then (期待する結果):
        assert_eq!(result, Ok(JoinOutcome::Joined));
        assert_eq!(room.participants.len(), 1);
    }

    #[test]
    fn test_join_twice_is_idempotent() {
        // テスト項目: 同じ接続・同じ名前での再 join は重複エントリを作らない
        // given (前提条件):
        let mut room = new_room();
        room.join(participant("c1", "alice")).unwrap();

        // when (操作):
        let result = room.join(participant("c1", "alice"));

        // then (期待する結果):
        assert_eq!(result, Ok(JoinOutcome::AlreadyJoined));
        assert_eq!(room.participants.len(), 1);
    }

    #[test]
    fn test_join_with_taken_name_is_rejected() {
        // テスト項目: 他の接続が使っている名前での join は拒否される
        // given (前提条件):
        let mut room = new_room();
        room.join(participant("c1", "alice")).unwrap();

        // when (操作):
        let result = room.join(participant("c2", "alice"));

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::UsernameTaken("alice".to_string())));
        assert_eq!(room.participants.len(), 1);
    }

    #[test]
    fn test_join_with_new_name_renames() {
        // テスト項目: 同じ接続が別名で join すると名前が置き換わる
        // given (前提条件):
        let mut room = new_room();
        room.join(participant("c1", "alice")).unwrap();

        // when (操作):
        let result = room.join(participant("c1", "alicia"));

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(JoinOutcome::Renamed {
                previous: Username::new("alice".to_string()).unwrap()
            })
        );
        assert_eq!(room.participants.len(), 1);
        assert_eq!(room.participants[0].username.as_str(), "alicia");
    }

    #[test]
    fn test_leave_returns_removed_participant() {
        // テスト項目: leave で削除された参加者が返され、空になったことが分かる
        // given (前提条件):
        let mut room = new_room();
        room.join(participant("c1", "alice")).unwrap();

        // when (操作):
        let removed = room.leave(&ConnectionId::new("c1".to_string()).unwrap());
        let missing = room.leave(&ConnectionId::new("c1".to_string()).unwrap());

        // then (期待する結果):
        assert_eq!(removed.unwrap().username.as_str(), "alice");
        assert!(missing.is_none());
        assert!(room.is_empty());
    }
}
