//! Kanban board management for Trestle.
//!
//! This module implements the task board: creating, editing, and deleting
//! tasks, loading and ordering columns, and moving tasks between columns
//! through drag gestures or explicit status selection. Status moves are
//! applied optimistically in memory and reverted when persistence fails.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Backend selection and board orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
