//! Task list model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::millis_now;

/// A named, user-created grouping of tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tasklist {
    /// Unique identifier, generated client-side and never changed
    pub id: Uuid,

    /// Display name, may be renamed in place
    pub name: String,

    /// Time of the last mutation, millisecond precision (UTC)
    pub modified_at: Timestamp,
}

impl Tasklist {
    /// Creates a list with a fresh ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the list renamed, keeping its identity.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Returns the list stamped with a new modification time.
    pub fn touched_at(self, modified_at: Timestamp) -> Self {
        Self {
            modified_at,
            ..self
        }
    }

    /// First eight characters of the ID.
    pub fn short_id(&self) -> String {
        super::short_id(&self.id)
    }
}

impl Default for Tasklist {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Unnamed List".to_string(),
            modified_at: millis_now(),
        }
    }
}
