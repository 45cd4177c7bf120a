//! Core library for the OrgaOwl task list application.
//!
//! Tasks are organized into named lists. The crate has two central parts:
//!
//! - the **gateway** ([`gateway`]): the [`TaskRepository`] trait with a SQLite
//!   implementation and an in-memory one, including a live query that emits
//!   every list together with its tasks after each write;
//! - the **controller** ([`controller`]): [`TasklistController`], which turns
//!   user intents into gateway calls and publishes a [`TasklistUiState`]
//!   snapshot for front ends to render.
//!
//! Rendering lives in [`display`]; [`images`] caches picked images on disk.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use orgaowl_core::{MemoryTaskRepository, Task, Tasklist, TasklistController};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = TasklistController::new(Arc::new(MemoryTaskRepository::new()));
//! controller.loaded().await?;
//!
//! let groceries = Tasklist::new("Groceries");
//! controller.add_tasklist(groceries.clone()).await??;
//! controller
//!     .add_task(Task::new("Carrots").in_list(groceries.id))
//!     .await??;
//!
//! let state = controller.synced().await?;
//! assert_eq!(state.current_list, Some(groceries.id));
//! assert_eq!(state.current_tasks()[0].name, "Carrots");
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod db;
pub mod display;
pub mod error;
pub mod gateway;
pub mod images;
pub mod models;

pub use controller::TasklistController;
pub use db::Database;
pub use display::{CreateResult, DeleteResult, Drawer, OperationStatus, UpdateResult};
pub use error::{OwlError, Result};
pub use gateway::{
    MemoryTaskRepository, RepositoryBuilder, SqliteTaskRepository, TaskRepository,
};
pub use images::ImageCache;
pub use models::{
    DEFAULT_TASKLIST_ID, Task, Tasklist, TasklistUiState, TasklistWithTasks,
};
