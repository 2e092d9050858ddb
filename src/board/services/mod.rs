//! Board orchestration services.
//!
//! [`SelectingStore`] picks the storage backend per call from
//! authentication state; [`BoardController`] owns board state and the drag
//! state machine on top of whichever store it is given.

pub mod controller;
pub mod selection;

pub use controller::{BoardController, DragTarget, DropOutcome};
pub use selection::SelectingStore;
