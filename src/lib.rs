//! Trestle: headless kanban task-board core.
//!
//! This crate provides the board logic behind a kanban task tracker: the
//! task/column domain model, a polymorphic storage contract with
//! local-device and remote-account backends, and the board controller that
//! turns drag gestures into optimistic, revertible status transitions.
//!
//! # Architecture
//!
//! Trestle follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (file store, database)
//! - **Services**: Backend selection and board orchestration
//!
//! # Modules
//!
//! - [`board`]: Task/column model, storage port, and the board controller

pub mod board;
