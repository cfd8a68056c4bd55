//! Identifier newtypes for the entities the hub coordinates.
//!
//! `LobbyId`, `GameId`, `UserId` and `OperationId` are time-ordered
//! (UUIDv7); `PlayerStateId` is random (UUIDv4) and is deliberately
//! *not* time-ordered, since it exists to be unpredictable across
//! rotations rather than to sort.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            #[must_use]
            pub fn hex(&self) -> String {
                self.0.simple().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.hex())
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(LobbyId);
uuid_id!(GameId);
uuid_id!(UserId);
uuid_id!(OperationId);
uuid_id!(PlayerStateId);

impl LobbyId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl GameId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl OperationId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl PlayerStateId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LobbyId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for PlayerStateId {
    fn default() -> Self {
        Self::new()
    }
}

/// A deterministic, structured task identifier (see `application::common::task_scheduler`).
///
/// Unlike the other identifiers here this is not a UUID wrapper: its
/// value is derived from the task's kind and subject ids so that
/// rescheduling the same logical task overwrites the prior one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_no_dashes() {
        let id = UserId(Uuid::nil());
        assert_eq!(id.hex(), "00000000000000000000000000000000");
    }

    #[test]
    fn lobby_id_is_time_ordered() {
        let a = LobbyId::new();
        let b = LobbyId::new();
        assert!(a.0 <= b.0, "uuidv7 ids must not regress");
    }

    #[test]
    fn player_state_id_round_trips_through_str() {
        let id = PlayerStateId::new();
        let parsed: PlayerStateId = id.hex().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
