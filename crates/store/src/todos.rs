//! Todo persistence.
//!
//! Rows map one-to-one onto [`Todo`]; timestamps are stored as RFC 3339
//! strings. Listing returns insertion order (rowid), which is the only
//! ordering the API promises.

use chrono::{DateTime, Utc};
use rusqlite::{Row, params};
use tracing::{debug, instrument};

use repodo_protocol::{Todo, TodoId, TodoPatch};

use crate::error::{Result, StoreError};
use crate::Store;

/// Starter todos seeded for a user with an empty list, `(text, completed)`.
const DEMO_TODOS: &[(&str, bool)] = &[
    ("Learn Rust", true),
    ("Build the repodo service", false),
    ("Wire up GitHub sign-in", false),
    ("Star some repositories", true),
];

fn row_to_todo(row: &Row<'_>) -> std::result::Result<Todo, rusqlite::Error> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;
    Ok(Todo {
        id: parse_id(&id)?,
        user_id: row.get(1)?,
        text: row.get(2)?,
        completed: row.get(3)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn parse_id(raw: &str) -> std::result::Result<TodoId, rusqlite::Error> {
    raw.parse().map_err(|e: uuid::Error| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

impl Store {
    /// Lists a user's todos in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    #[instrument(skip(self))]
    pub fn todos_for_user(&self, user_id: &str) -> Result<Vec<Todo>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, text, completed, created_at, updated_at
             FROM todos WHERE user_id = ?1 ORDER BY rowid",
        )?;
        let todos = stmt
            .query_map(params![user_id], row_to_todo)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    /// Creates a new incomplete todo and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    #[instrument(skip(self))]
    pub fn add_todo(&self, user_id: &str, text: &str) -> Result<Todo> {
        let todo = Todo::new(user_id, text);
        self.lock().execute(
            "INSERT INTO todos (id, user_id, text, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                todo.id.to_string(),
                todo.user_id,
                todo.text,
                todo.completed,
                todo.created_at.to_rfc3339(),
                todo.updated_at.to_rfc3339(),
            ],
        )?;
        debug!(id = %todo.id, "todo created");
        Ok(todo)
    }

    /// Fetches a todo by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_todo(&self, id: TodoId) -> Result<Option<Todo>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, text, completed, created_at, updated_at
             FROM todos WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map(params![id.to_string()], row_to_todo)?;
        rows.next().transpose().map_err(StoreError::from)
    }

    /// Applies a patch to an existing todo, refreshing `updated_at`.
    ///
    /// Returns `None` when no todo with that id exists; the caller decides
    /// whether that is a 404. An empty patch is the caller's problem too:
    /// it is rejected at the handler, never here.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the write fails.
    #[instrument(skip(self, patch))]
    pub fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> Result<Option<Todo>> {
        let Some(mut todo) = self.get_todo(id)? else {
            return Ok(None);
        };

        todo.apply(patch);
        self.lock().execute(
            "UPDATE todos SET text = ?2, completed = ?3, updated_at = ?4 WHERE id = ?1",
            params![
                todo.id.to_string(),
                todo.text,
                todo.completed,
                todo.updated_at.to_rfc3339(),
            ],
        )?;
        debug!(id = %todo.id, "todo updated");
        Ok(Some(todo))
    }

    /// Deletes a todo by id, reporting whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    #[instrument(skip(self))]
    pub fn delete_todo(&self, id: TodoId) -> Result<bool> {
        let affected = self
            .lock()
            .execute("DELETE FROM todos WHERE id = ?1", params![id.to_string()])?;
        debug!(id = %id, deleted = affected > 0, "todo delete");
        Ok(affected > 0)
    }

    /// Deletes every completed todo of a user, returning how many were
    /// removed. Active todos are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    #[instrument(skip(self))]
    pub fn clear_completed_todos(&self, user_id: &str) -> Result<u64> {
        let affected = self.lock().execute(
            "DELETE FROM todos WHERE user_id = ?1 AND completed = 1",
            params![user_id],
        )?;
        debug!(count = affected, "cleared completed todos");
        Ok(affected as u64)
    }

    /// Seeds a fixed starter list for a user with no todos.
    ///
    /// Does nothing (and returns 0) when the user already has any todos.
    /// Returns the number of todos created otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence check or an insert fails.
    #[instrument(skip(self))]
    pub fn seed_demo_todos(&self, user_id: &str) -> Result<u64> {
        if !self.todos_for_user(user_id)?.is_empty() {
            return Ok(0);
        }

        for (text, completed) in DEMO_TODOS {
            let todo = self.add_todo(user_id, text)?;
            if *completed {
                self.update_todo(
                    todo.id,
                    &TodoPatch {
                        completed: Some(true),
                        ..Default::default()
                    },
                )?;
            }
        }
        debug!(count = DEMO_TODOS.len(), "seeded demo todos");
        Ok(DEMO_TODOS.len() as u64)
    }
}
