//! Port contracts for board persistence and identity.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod auth;
pub mod store;

pub use auth::AuthProvider;
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
