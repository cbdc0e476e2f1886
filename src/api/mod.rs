//! HTTP client for the todo-list service
//!
//! The service speaks two dialects selected per request by an `API-Version`
//! header: v1 returns bare JSON arrays, v2 wraps them in envelope objects and
//! adds task metadata. Both converge on the same [`wire::Task`] type; nothing
//! outside [`wire::decode_tasks`] needs to know which dialect produced a list.

pub mod client;
pub mod error;
pub mod wire;

pub use client::ApiClient;
pub use error::ApiError;
pub use wire::{ApiVersion, Task, TaskStatus};
