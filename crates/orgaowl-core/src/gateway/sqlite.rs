//! SQLite-backed gateway.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::{
    sync::{watch, Mutex},
    task,
};

use super::TaskRepository;
use crate::{
    db::Database,
    error::{OwlError, Result},
    models::{Task, Tasklist, TasklistWithTasks},
};

/// Gateway over a SQLite file.
///
/// Each call opens a short-lived [`Database`] on the blocking pool, so calls
/// may run concurrently; SQLite serializes the writers.
pub struct SqliteTaskRepository {
    db_path: PathBuf,
    lists_tx: watch::Sender<Vec<TasklistWithTasks>>,
    /// Serializes re-reads so published snapshots never go backwards
    refresh_lock: Mutex<()>,
}

impl SqliteTaskRepository {
    /// Opens (creating if needed) the store and loads the first snapshot.
    pub(crate) async fn open(db_path: PathBuf) -> Result<Self> {
        let initial = run_blocking(db_path.clone(), |db| db.list_tasklists_with_tasks()).await?;
        debug!(
            "Opened {} with {} task list(s)",
            db_path.display(),
            initial.len()
        );

        let (lists_tx, _) = watch::channel(initial);
        Ok(Self {
            db_path,
            lists_tx,
            refresh_lock: Mutex::new(()),
        })
    }

    /// Path of the underlying SQLite file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs one write, then republishes the live query.
    async fn write<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Database) -> Result<()> + Send + 'static,
    {
        run_blocking(self.db_path.clone(), f).await?;
        self.refresh().await
    }

    async fn refresh(&self) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;
        let lists = run_blocking(self.db_path.clone(), |db| db.list_tasklists_with_tasks()).await?;
        self.lists_tx.send_replace(lists);
        Ok(())
    }
}

async fn run_blocking<T, F>(db_path: PathBuf, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
{
    task::spawn_blocking(move || {
        let mut db = Database::new(&db_path)?;
        f(&mut db)
    })
    .await
    .map_err(OwlError::join)?
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    fn observe_lists_with_tasks(&self) -> watch::Receiver<Vec<TasklistWithTasks>> {
        self.lists_tx.subscribe()
    }

    async fn all_tasks(&self) -> Result<Vec<Task>> {
        run_blocking(self.db_path.clone(), |db| db.list_tasks()).await
    }

    async fn all_tasklists(&self) -> Result<Vec<Tasklist>> {
        run_blocking(self.db_path.clone(), |db| db.list_tasklists()).await
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        let task = task.clone();
        self.write(move |db| db.insert_task(&task)).await
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        let task = task.clone();
        self.write(move |db| db.update_task(&task)).await
    }

    async fn delete_task(&self, task: &Task) -> Result<()> {
        let id = task.id;
        self.write(move |db| db.delete_task(id)).await
    }

    async fn insert_tasklist(&self, tasklist: &Tasklist) -> Result<()> {
        let tasklist = tasklist.clone();
        self.write(move |db| db.insert_tasklist(&tasklist)).await
    }

    async fn update_tasklist(&self, tasklist: &Tasklist) -> Result<()> {
        let tasklist = tasklist.clone();
        self.write(move |db| db.update_tasklist(&tasklist)).await
    }

    async fn delete_tasklist(&self, tasklist: &Tasklist) -> Result<()> {
        let id = tasklist.id;
        self.write(move |db| db.delete_tasklist(id)).await
    }
}
