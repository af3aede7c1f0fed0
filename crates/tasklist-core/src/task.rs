use serde::{Deserialize, Serialize};

use crate::id::TaskId;

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier assigned at creation.
    pub id: TaskId,
    /// Text as typed by the user.
    pub text: String,
    /// Completion flag.
    pub checked: bool,
    /// Trash flag (soft delete).
    pub removed: bool,
}

impl Task {
    /// Fresh task: neither checked nor removed.
    #[must_use]
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            checked: false,
            removed: false,
        }
    }

    /// Copy with a different text.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Copy with a different completion flag.
    #[must_use]
    pub fn with_checked(&self, checked: bool) -> Self {
        Self {
            checked,
            ..self.clone()
        }
    }

    /// Copy with a different trash flag.
    #[must_use]
    pub fn with_removed(&self, removed: bool) -> Self {
        Self {
            removed,
            ..self.clone()
        }
    }
}
