//! The list state controller.
//!
//! [`TasklistController`] owns the [`TasklistUiState`] snapshot and is its
//! only writer. Front ends send intents (add, update, delete, select) and
//! render whatever the snapshot says; they never touch the gateway directly.
//!
//! ```text
//! intent ──▶ controller ──▶ TaskRepository ──▶ store
//!                ▲                                │
//!                └──── live query (watch) ◀───────┘
//! ```
//!
//! Each intent runs as its own Tokio task and returns a
//! [`JoinHandle`]. Callers may drop the handle (fire-and-forget) or await it to
//! learn whether the write went through. Apart from the active-list
//! bookkeeping of `add_tasklist` and `delete_tasklist`, list contents reach the
//! snapshot only through the live query.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use orgaowl_core::{MemoryTaskRepository, Task, Tasklist, TasklistController};
//!
//! # async fn example() -> orgaowl_core::Result<()> {
//! let controller = TasklistController::new(Arc::new(MemoryTaskRepository::new()));
//! controller.loaded().await?;
//!
//! let groceries = Tasklist::new("Groceries");
//! controller.add_tasklist(groceries.clone()).await.ok();
//! controller.add_task(Task::new("Carrots").in_list(groceries.id));
//!
//! let state = controller.synced().await?;
//! assert_eq!(state.current_list, Some(groceries.id));
//! # Ok(())
//! # }
//! ```

mod clock;

#[cfg(test)]
mod tests;

use std::{future::Future, sync::Arc};

use jiff::Timestamp;
use log::{debug, warn};
use tokio::{sync::watch, task::JoinHandle};
use uuid::Uuid;

use self::clock::ModificationClock;
use crate::{
    error::{OwlError, Result},
    gateway::TaskRepository,
    models::{Task, Tasklist, TasklistUiState, TasklistWithTasks},
};

type StateSender = Arc<watch::Sender<TasklistUiState>>;

/// Sole writer of the list view state.
///
/// Must be created inside a Tokio runtime. Dropping it stops the live-query
/// listener; intents already launched run to completion.
pub struct TasklistController {
    repository: Arc<dyn TaskRepository>,
    state_tx: StateSender,
    clock: Arc<ModificationClock>,
    listener: JoinHandle<()>,
}

impl TasklistController {
    /// Creates the controller and starts listening to the gateway's live
    /// query. The snapshot reports `is_loading` until the first emission has
    /// been applied.
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        let (state_tx, _) = watch::channel(TasklistUiState::default());
        let state_tx = Arc::new(state_tx);
        let clock = Arc::new(ModificationClock::default());

        state_tx.send_modify(|state| state.is_loading = true);
        let listener = tokio::spawn(listen(
            repository.observe_lists_with_tasks(),
            state_tx.clone(),
            clock.clone(),
        ));

        Self {
            repository,
            state_tx,
            clock,
            listener,
        }
    }

    /// Subscribes to the snapshot. The receiver starts at the current value.
    pub fn state(&self) -> watch::Receiver<TasklistUiState> {
        self.state_tx.subscribe()
    }

    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> TasklistUiState {
        self.state_tx.borrow().clone()
    }

    /// Waits for the first load to complete.
    pub async fn loaded(&self) -> Result<TasklistUiState> {
        let mut state_rx = self.state();
        let state = state_rx
            .wait_for(|s| !s.is_loading && s.available_tasklists.is_some())
            .await
            .map_err(|_| stopped())?;
        Ok(state.clone())
    }

    /// Waits until the snapshot holds the gateway's latest lists, i.e. every
    /// write that has completed so far is visible.
    pub async fn synced(&self) -> Result<TasklistUiState> {
        let lists_rx = self.repository.observe_lists_with_tasks();
        let mut state_rx = self.state();
        let state = state_rx
            .wait_for(|s| s.available_tasklists.as_ref() == Some(&*lists_rx.borrow()))
            .await
            .map_err(|_| stopped())?;
        Ok(state.clone())
    }

    /// Inserts a task. The snapshot picks it up from the live query.
    pub fn add_task(&self, task: Task) -> JoinHandle<Result<()>> {
        let task = task.touched_at(self.clock.tick());
        self.launch("add task", |repository, _| async move {
            repository.insert_task(&task).await
        })
    }

    /// Stores new values for an existing task.
    pub fn update_task(&self, task: Task) -> JoinHandle<Result<()>> {
        let task = task.touched_at(self.clock.tick());
        self.launch("update task", |repository, _| async move {
            repository.update_task(&task).await
        })
    }

    pub fn delete_task(&self, task: Task) -> JoinHandle<Result<()>> {
        self.launch("delete task", |repository, _| async move {
            repository.delete_task(&task).await
        })
    }

    /// Inserts a list and makes it the active one as soon as the insert
    /// succeeds, whether or not the live query has caught up.
    pub fn add_tasklist(&self, tasklist: Tasklist) -> JoinHandle<Result<()>> {
        let tasklist = tasklist.touched_at(self.clock.tick());
        self.launch("add task list", |repository, state_tx| async move {
            repository.insert_tasklist(&tasklist).await?;
            state_tx.send_modify(|state| state.current_list = Some(tasklist.id));
            Ok::<_, OwlError>(())
        })
    }

    /// Renames a list.
    pub fn update_tasklist(&self, tasklist: Tasklist) -> JoinHandle<Result<()>> {
        let tasklist = tasklist.touched_at(self.clock.tick());
        self.launch("update task list", |repository, _| async move {
            repository.update_tasklist(&tasklist).await
        })
    }

    /// Deletes a list with its tasks, then activates the first remaining list.
    /// With no list left the active list becomes `None`.
    pub fn delete_tasklist(&self, tasklist: Tasklist) -> JoinHandle<Result<()>> {
        self.launch("delete task list", |repository, state_tx| async move {
            repository.delete_tasklist(&tasklist).await?;

            let remaining = repository.observe_lists_with_tasks().borrow().clone();
            let next = first_other_list(&remaining, tasklist.id);
            if next.is_none() {
                debug!("Deleted the last task list, no list is active");
            }
            state_tx.send_modify(|state| state.current_list = next);
            Ok::<_, OwlError>(())
        })
    }

    /// Switches the active list. Local only; nothing is stored.
    pub fn set_current_tasklist(&self, id: Uuid) {
        self.state_tx.send_modify(|state| state.current_list = Some(id));
    }

    fn launch<F, Fut>(&self, intent: &'static str, f: F) -> JoinHandle<Result<()>>
    where
        F: FnOnce(Arc<dyn TaskRepository>, StateSender) -> Fut,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let work = f(self.repository.clone(), self.state_tx.clone());
        tokio::spawn(async move {
            let result = work.await;
            if let Err(e) = &result {
                warn!("Failed to {intent}: {e}");
            }
            result
        })
    }
}

impl Drop for TasklistController {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

/// Applies every emission of the live query to the snapshot until the gateway
/// goes away or the controller is dropped.
async fn listen(
    mut lists_rx: watch::Receiver<Vec<TasklistWithTasks>>,
    state_tx: StateSender,
    clock: Arc<ModificationClock>,
) {
    debug!("Listening for task list changes");
    loop {
        let lists = lists_rx.borrow_and_update().clone();
        if let Some(latest) = latest_modification(&lists) {
            clock.observe(latest);
        }

        state_tx.send_modify(|state| {
            state.is_loading = false;
            if state.current_list.is_none() {
                state.current_list = lists.first().map(|l| l.tasklist.id);
            }
            state.available_tasklists = Some(lists);
        });

        if lists_rx.changed().await.is_err() {
            debug!("Task list source closed, listener stopping");
            break;
        }
    }
}

fn latest_modification(lists: &[TasklistWithTasks]) -> Option<Timestamp> {
    lists
        .iter()
        .flat_map(|l| {
            std::iter::once(l.tasklist.modified_at).chain(l.tasks.iter().map(|t| t.modified_at))
        })
        .max()
}

fn first_other_list(lists: &[TasklistWithTasks], deleted: Uuid) -> Option<Uuid> {
    lists
        .iter()
        .map(|l| l.tasklist.id)
        .find(|id| *id != deleted)
}

fn stopped() -> OwlError {
    OwlError::Configuration {
        message: "task list controller stopped".to_string(),
    }
}
