//! Todo records and partial updates.
//!
//! This module defines the core [`Todo`] type, a short user-owned task with
//! a completion flag, and [`TodoPatch`], the partial update applied by the
//! update endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a todo.
///
/// UUID v4, rendered as a string on the wire.
pub type TodoId = uuid::Uuid;

/// A user-owned task record.
///
/// Every todo belongs to exactly one user and carries creation and update
/// timestamps. Mutations go through [`Todo::apply`] (or the individual
/// setters), which refresh `updated_at`.
///
/// # Examples
///
/// ```
/// use repodo_protocol::Todo;
///
/// let todo = Todo::new("u1", "Buy milk");
/// assert_eq!(todo.text, "Buy milk");
/// assert_eq!(todo.user_id, "u1");
/// assert!(!todo.completed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier for this todo.
    pub id: TodoId,
    /// The user that owns this todo.
    pub user_id: String,
    /// The task text.
    pub text: String,
    /// Whether the task has been completed.
    pub completed: bool,
    /// When this todo was created.
    pub created_at: DateTime<Utc>,
    /// When this todo was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new incomplete todo owned by `user_id`.
    ///
    /// Both timestamps are set to the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use repodo_protocol::Todo;
    ///
    /// let todo = Todo::new("u1", "Water the plants");
    /// assert_eq!(todo.created_at, todo.updated_at);
    /// ```
    #[must_use]
    pub fn new(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TodoId::new_v4(),
            user_id: user_id.into(),
            text: text.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a todo with a specific ID.
    ///
    /// Useful for testing or when recreating todos from persistent storage.
    #[must_use]
    pub fn with_id(id: TodoId, user_id: impl Into<String>, text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: user_id.into(),
            text: text.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the task text and refreshes `updated_at`.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.updated_at = Utc::now();
    }

    /// Sets the completion flag and refreshes `updated_at`.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.updated_at = Utc::now();
    }

    /// Applies a partial update, refreshing `updated_at`.
    ///
    /// Fields absent from the patch are left unchanged. Applying an empty
    /// patch is a no-op that does not touch the timestamp; callers are
    /// expected to reject empty patches before getting here.
    ///
    /// # Examples
    ///
    /// ```
    /// use repodo_protocol::{Todo, TodoPatch};
    ///
    /// let mut todo = Todo::new("u1", "Draft");
    /// todo.apply(&TodoPatch {
    ///     text: Some("Final".to_string()),
    ///     completed: Some(true),
    /// });
    /// assert_eq!(todo.text, "Final");
    /// assert!(todo.completed);
    /// ```
    pub fn apply(&mut self, patch: &TodoPatch) {
        if patch.is_empty() {
            return;
        }
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
    }
}

/// A partial update to a todo.
///
/// At least one field must be present for an update request to be valid;
/// [`TodoPatch::is_empty`] is the check the update endpoint performs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    /// New task text, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New completion flag, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Returns `true` if the patch changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use repodo_protocol::TodoPatch;
    ///
    /// assert!(TodoPatch::default().is_empty());
    /// assert!(!TodoPatch { completed: Some(true), ..Default::default() }.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_todo()(
            user_id in "[a-z0-9]{1,16}",
            text in "[a-zA-Z0-9 .,!?]{1,120}",
            completed in any::<bool>(),
        ) -> Todo {
            let mut todo = Todo::new(user_id, text);
            todo.completed = completed;
            todo
        }
    }

    proptest! {
        /// Tests that Todo serialization roundtrips correctly, preserving all fields.
        #[test]
        fn todo_roundtrip(todo in arb_todo()) {
            let json = serde_json::to_string(&todo).expect("serialize");
            let parsed: Todo = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(todo, parsed);
        }

        /// Tests that applying a patch always lands the patched values.
        #[test]
        fn apply_patch_lands_values(
            mut todo in arb_todo(),
            text in proptest::option::of("[a-zA-Z ]{1,40}"),
            completed in proptest::option::of(any::<bool>()),
        ) {
            let patch = TodoPatch { text: text.clone(), completed };
            todo.apply(&patch);

            if let Some(text) = text {
                prop_assert_eq!(&todo.text, &text);
            }
            if let Some(completed) = completed {
                prop_assert_eq!(todo.completed, completed);
            }
        }
    }
}
