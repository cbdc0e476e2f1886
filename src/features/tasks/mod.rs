//! Task list state management
//!
//! The controller owns {snapshot, draft, query, version} and mediates every
//! remote call as a [`Command`] / [`NetEvent`] pair; the UI is a pure
//! projection of its state.

pub mod controller;

pub use controller::{execute, Command, NetEvent, TaskController};
