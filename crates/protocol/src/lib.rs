//! Shared types and contracts for repodo.
//!
//! This crate defines the domain types used throughout the repodo
//! application: user-owned todos, GitHub repository snapshots with their
//! pagination envelope, and the authenticated user.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`todo`]: The [`Todo`] record and the [`TodoPatch`] partial update
//! - [`repo`]: Repository snapshots and cursor pagination ([`RepoSnapshot`],
//!   [`PageInfo`], [`RepoPage`])
//! - [`user`]: The session [`User`] and the [`AuthProvider`] that
//!   authenticated it
//!
//! # Wire format
//!
//! All types serialize to the JSON shapes the HTTP API exposes: todos and
//! pagination envelopes use camelCase keys (`userId`, `createdAt`,
//! `pageInfo`), while repository snapshots keep GitHub's snake_case field
//! names (`html_url`, `stargazers_count`).
//!
//! # Examples
//!
//! ```
//! use repodo_protocol::{Todo, TodoPatch};
//!
//! let mut todo = Todo::new("u1", "Buy milk");
//! assert!(!todo.completed);
//!
//! let patch = TodoPatch {
//!     completed: Some(true),
//!     ..Default::default()
//! };
//! todo.apply(&patch);
//! assert!(todo.completed);
//! ```

pub mod repo;
pub mod todo;
pub mod user;

// Re-export primary types at crate root for convenience
pub use repo::{PageInfo, RepoPage, RepoSnapshot};
pub use todo::{Todo, TodoId, TodoPatch};
pub use user::{AuthProvider, User};
