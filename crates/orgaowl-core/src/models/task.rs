//! Task model definition and its override builders.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{millis_now, DEFAULT_TASKLIST_ID};

/// A single checklist item belonging to exactly one task list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier, generated client-side and never changed
    pub id: Uuid,

    /// Display text
    pub name: String,

    /// Free-text annotation such as a quantity
    #[serde(default)]
    pub extra: String,

    /// Completion flag
    #[serde(default)]
    pub done: bool,

    /// Time of the last mutation, millisecond precision (UTC)
    pub modified_at: Timestamp,

    /// ID of the owning task list
    pub tasklist: Uuid,

    /// File name of a cached image, empty when the task has none
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_path: String,
}

impl Task {
    /// Creates a not-done task in the default list with a fresh ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the task moved to another list.
    pub fn in_list(self, tasklist: Uuid) -> Self {
        Self { tasklist, ..self }
    }

    /// Returns the task with a new name.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Returns the task with new extra info.
    pub fn with_extra(self, extra: impl Into<String>) -> Self {
        Self {
            extra: extra.into(),
            ..self
        }
    }

    /// Returns the task with the given completion flag.
    pub fn with_done(self, done: bool) -> Self {
        Self { done, ..self }
    }

    /// Returns the task with the completion flag flipped.
    pub fn toggled(self) -> Self {
        let done = !self.done;
        Self { done, ..self }
    }

    /// Returns the task pointing at another cached image (empty clears it).
    pub fn with_image_path(self, image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            ..self
        }
    }

    /// Returns the task stamped with a new modification time.
    pub fn touched_at(self, modified_at: Timestamp) -> Self {
        Self {
            modified_at,
            ..self
        }
    }

    /// Whether an image is attached.
    pub fn has_image(&self) -> bool {
        !self.image_path.is_empty()
    }

    /// First eight characters of the ID, enough to address a task by prefix.
    pub fn short_id(&self) -> String {
        super::short_id(&self.id)
    }
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Unnamed Task".to_string(),
            extra: String::new(),
            done: false,
            modified_at: millis_now(),
            tasklist: DEFAULT_TASKLIST_ID,
            image_path: String::new(),
        }
    }
}
