//! List-backed gateway kept entirely in memory.

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

use super::TaskRepository;
use crate::{
    error::{OwlError, Result},
    models::{Task, Tasklist, TasklistWithTasks},
};

#[derive(Debug, Default)]
struct MemoryStore {
    tasklists: Vec<Tasklist>,
    tasks: Vec<Task>,
}

impl MemoryStore {
    fn combine(&self) -> Vec<TasklistWithTasks> {
        self.tasklists
            .iter()
            .map(|tasklist| {
                let tasks = self
                    .tasks
                    .iter()
                    .filter(|t| t.tasklist == tasklist.id)
                    .cloned()
                    .collect();
                TasklistWithTasks::new(tasklist.clone(), tasks)
            })
            .collect()
    }

    fn has_tasklist(&self, id: Uuid) -> bool {
        self.tasklists.iter().any(|l| l.id == id)
    }
}

/// Gateway holding lists and tasks in vectors. Same contract as the SQLite
/// store, nothing survives a restart.
pub struct MemoryTaskRepository {
    store: Mutex<MemoryStore>,
    lists_tx: watch::Sender<Vec<TasklistWithTasks>>,
}

impl MemoryTaskRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_data(Vec::new(), Vec::new())
    }

    /// Creates a store pre-filled with lists and tasks.
    pub fn with_data(tasklists: Vec<Tasklist>, tasks: Vec<Task>) -> Self {
        let store = MemoryStore { tasklists, tasks };
        let (lists_tx, _) = watch::channel(store.combine());
        Self {
            store: Mutex::new(store),
            lists_tx,
        }
    }

    /// Applies one change and publishes the new snapshot while still holding
    /// the store, so snapshots go out in write order.
    async fn mutate<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut MemoryStore) -> Result<()> + Send,
    {
        let mut store = self.store.lock().await;
        f(&mut store)?;
        self.lists_tx.send_replace(store.combine());
        Ok(())
    }
}

impl Default for MemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    fn observe_lists_with_tasks(&self) -> watch::Receiver<Vec<TasklistWithTasks>> {
        self.lists_tx.subscribe()
    }

    async fn all_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.store.lock().await.tasks.clone())
    }

    async fn all_tasklists(&self) -> Result<Vec<Tasklist>> {
        Ok(self.store.lock().await.tasklists.clone())
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        self.mutate(|store| {
            if !store.has_tasklist(task.tasklist) {
                return Err(OwlError::TasklistNotFound { id: task.tasklist });
            }
            if store.tasks.iter().any(|t| t.id == task.id) {
                return Err(OwlError::TaskExists { id: task.id });
            }
            store.tasks.push(task.clone());
            Ok(())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        self.mutate(|store| {
            if !store.has_tasklist(task.tasklist) {
                return Err(OwlError::TasklistNotFound { id: task.tasklist });
            }
            let slot = store
                .tasks
                .iter_mut()
                .find(|t| t.id == task.id)
                .ok_or(OwlError::TaskNotFound { id: task.id })?;
            *slot = task.clone();
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, task: &Task) -> Result<()> {
        self.mutate(|store| {
            let before = store.tasks.len();
            store.tasks.retain(|t| t.id != task.id);
            if store.tasks.len() == before {
                return Err(OwlError::TaskNotFound { id: task.id });
            }
            Ok(())
        })
        .await
    }

    async fn insert_tasklist(&self, tasklist: &Tasklist) -> Result<()> {
        self.mutate(|store| {
            if store.has_tasklist(tasklist.id) {
                return Err(OwlError::TasklistExists { id: tasklist.id });
            }
            store.tasklists.push(tasklist.clone());
            Ok(())
        })
        .await
    }

    async fn update_tasklist(&self, tasklist: &Tasklist) -> Result<()> {
        self.mutate(|store| {
            let slot = store
                .tasklists
                .iter_mut()
                .find(|l| l.id == tasklist.id)
                .ok_or(OwlError::TasklistNotFound { id: tasklist.id })?;
            *slot = tasklist.clone();
            Ok(())
        })
        .await
    }

    async fn delete_tasklist(&self, tasklist: &Tasklist) -> Result<()> {
        self.mutate(|store| {
            if !store.has_tasklist(tasklist.id) {
                return Err(OwlError::TasklistNotFound { id: tasklist.id });
            }
            store.tasklists.retain(|l| l.id != tasklist.id);
            store.tasks.retain(|t| t.tasklist != tasklist.id);
            Ok(())
        })
        .await
    }
}
