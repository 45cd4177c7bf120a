//! Persistence gateway: CRUD over tasks and task lists plus one live query.
//!
//! The [`TaskRepository`] trait is the seam between the list controller and
//! storage. Two implementations ship with the crate:
//!
//! - [`SqliteTaskRepository`]: the real store, built with [`RepositoryBuilder`]
//! - [`MemoryTaskRepository`]: a list-backed store for previews and tests
//!
//! # Live query
//!
//! [`TaskRepository::observe_lists_with_tasks`] hands out a
//! [`tokio::sync::watch::Receiver`]. A new receiver already holds the latest
//! snapshot, and every successful write publishes a fresh one. Rapid writes may
//! be coalesced, but a receiver never sees a snapshot older than one it has
//! already seen.
//!
//! ```rust
//! use orgaowl_core::{MemoryTaskRepository, Task, TaskRepository, Tasklist};
//!
//! # async fn example() -> orgaowl_core::Result<()> {
//! let repository = MemoryTaskRepository::new();
//! let mut lists = repository.observe_lists_with_tasks();
//!
//! let groceries = Tasklist::new("Groceries");
//! repository.insert_tasklist(&groceries).await?;
//! repository.insert_task(&Task::new("Carrots").in_list(groceries.id)).await?;
//!
//! lists.changed().await.ok();
//! assert_eq!(lists.borrow()[0].tasks.len(), 1);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use tokio::sync::watch;

use crate::{
    error::Result,
    models::{Task, Tasklist, TasklistWithTasks},
};

pub mod builder;
pub mod memory;
pub mod sqlite;


pub use builder::RepositoryBuilder;
pub use memory::MemoryTaskRepository;
pub use sqlite::SqliteTaskRepository;

/// Storage operations the list controller depends on.
///
/// Writes fail with [`crate::OwlError::TaskNotFound`] or
/// [`crate::OwlError::TasklistNotFound`] when updating or deleting an unknown
/// ID, and with the `*Exists` variants when inserting a duplicate. A task can
/// only be inserted into, or moved to, a list that exists. Deleting a list
/// deletes its tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Subscribes to the live lists-with-tasks query.
    fn observe_lists_with_tasks(&self) -> watch::Receiver<Vec<TasklistWithTasks>>;

    /// One-shot read of every task.
    async fn all_tasks(&self) -> Result<Vec<Task>>;

    /// One-shot read of every task list.
    async fn all_tasklists(&self) -> Result<Vec<Tasklist>>;

    async fn insert_task(&self, task: &Task) -> Result<()>;

    /// Replaces all mutable fields of the stored task with the same ID.
    async fn update_task(&self, task: &Task) -> Result<()>;

    async fn delete_task(&self, task: &Task) -> Result<()>;

    async fn insert_tasklist(&self, tasklist: &Tasklist) -> Result<()>;

    async fn update_tasklist(&self, tasklist: &Tasklist) -> Result<()>;

    /// Deletes the list and every task it owns.
    async fn delete_tasklist(&self, tasklist: &Tasklist) -> Result<()>;
}
