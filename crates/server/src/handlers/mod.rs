//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod favorites;
pub mod github;
pub mod health;
pub mod todos;
