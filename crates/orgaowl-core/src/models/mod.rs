//! Data models for tasks, task lists and the published view state.
//!
//! Records are plain values. Changes are expressed by consuming builders that
//! return a new value with one field overridden:
//!
//! ```rust
//! use orgaowl_core::models::{Task, Tasklist};
//!
//! let groceries = Tasklist::new("Groceries");
//! let carrots = Task::new("Carrots").in_list(groceries.id).with_extra("1kg");
//! let bought = carrots.clone().with_done(true);
//!
//! assert_eq!(bought.id, carrots.id);
//! assert!(bought.done && !carrots.done);
//! ```
//!
//! Display implementations live in [`crate::display::models`].

pub mod ordering;
pub mod task;
pub mod tasklist;
pub mod tasklist_with_tasks;
pub mod ui_state;


use jiff::Timestamp;
use uuid::Uuid;

pub use ordering::{display_order, sort_for_display};
pub use task::Task;
pub use tasklist::Tasklist;
pub use tasklist_with_tasks::TasklistWithTasks;
pub use ui_state::TasklistUiState;

/// ID of the list seeded into every new store. Tasks built without an explicit
/// list land here.
pub const DEFAULT_TASKLIST_ID: Uuid = Uuid::from_u128(1);

/// Current time truncated to the millisecond precision the store keeps.
pub fn millis_now() -> Timestamp {
    let now = Timestamp::now();
    Timestamp::from_millisecond(now.as_millisecond()).unwrap_or(now)
}

pub(crate) fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}
