//! Domain types and state transitions for the task list.
//!
//! A [`TaskList`] holds tasks in insertion order together with the selected
//! [`FilterMode`]. Deleting a task only raises its `removed` flag; the task
//! stays in the list (and can be restored) until [`TaskList::purge`] runs.

/// Validation errors.
pub mod error;
/// Filter modes and the projection they define.
pub mod filter;
/// Identifier types.
pub mod id;
/// The task list store and its action reducer.
pub mod store;
/// The task entity.
pub mod task;

pub use error::ValidationError;
pub use filter::{FilterCounts, FilterMode, ParseFilterModeError};
pub use id::{ParseTaskIdError, TaskId, TaskIdAllocator};
pub use store::{Action, Applied, TaskList, reduce};
pub use task::Task;
