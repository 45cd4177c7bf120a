//! Task CRUD operations and queries.

use log::debug;
use rusqlite::{params, OptionalExtension, TransactionBehavior};
use uuid::Uuid;

use super::{timestamp_column, uuid_column};
use crate::{
    error::{DatabaseResultExt, OwlError, Result},
    models::Task,
};

const TASK_COLUMNS: &str = "uuid, name, extra, done, modified_at, tasklist, imagepath";
const CHECK_TASK_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM task WHERE uuid = ?1)";
const CHECK_TASKLIST_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasklist WHERE uuid = ?1)";
const INSERT_TASK_SQL: &str = "INSERT INTO task (uuid, name, extra, done, modified_at, tasklist, imagepath) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_TASK_SQL: &str = "UPDATE task SET name = ?2, extra = ?3, done = ?4, modified_at = ?5, tasklist = ?6, imagepath = ?7 WHERE uuid = ?1";
const DELETE_TASK_SQL: &str = "DELETE FROM task WHERE uuid = ?1";

impl super::Database {
    /// Helper function to construct a Task from a row selected with
    /// `TASK_COLUMNS`.
    pub(super) fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: uuid_column(row, 0)?,
            name: row.get(1)?,
            extra: row.get(2)?,
            done: row.get(3)?,
            modified_at: timestamp_column(row, 4)?,
            tasklist: uuid_column(row, 5)?,
            image_path: row.get(6)?,
        })
    }

    /// Inserts a new task. The owning list must exist and the ID must be new.
    pub fn insert_task(&mut self, task: &Task) -> Result<()> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let list_exists: bool = tx
            .query_row(
                CHECK_TASKLIST_EXISTS_SQL,
                params![task.tasklist.to_string()],
                |row| row.get(0),
            )
            .db_context("Failed to check task list existence")?;
        if !list_exists {
            return Err(OwlError::TasklistNotFound { id: task.tasklist });
        }

        let task_exists: bool = tx
            .query_row(CHECK_TASK_EXISTS_SQL, params![task.id.to_string()], |row| {
                row.get(0)
            })
            .db_context("Failed to check task existence")?;
        if task_exists {
            return Err(OwlError::TaskExists { id: task.id });
        }

        tx.execute(
            INSERT_TASK_SQL,
            params![
                task.id.to_string(),
                task.name,
                task.extra,
                task.done,
                task.modified_at.as_millisecond(),
                task.tasklist.to_string(),
                task.image_path
            ],
        )
        .db_context("Failed to insert task")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Inserted task {} into list {}", task.id, task.tasklist);
        Ok(())
    }

    /// Replaces every mutable field of the task with the given ID.
    ///
    /// Moving a task to another list requires that list to exist.
    pub fn update_task(&mut self, task: &Task) -> Result<()> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let list_exists: bool = tx
            .query_row(
                CHECK_TASKLIST_EXISTS_SQL,
                params![task.tasklist.to_string()],
                |row| row.get(0),
            )
            .db_context("Failed to check task list existence")?;
        if !list_exists {
            return Err(OwlError::TasklistNotFound { id: task.tasklist });
        }

        let rows_affected = tx
            .execute(
                UPDATE_TASK_SQL,
                params![
                    task.id.to_string(),
                    task.name,
                    task.extra,
                    task.done,
                    task.modified_at.as_millisecond(),
                    task.tasklist.to_string(),
                    task.image_path
                ],
            )
            .db_context("Failed to update task")?;
        if rows_affected == 0 {
            return Err(OwlError::TaskNotFound { id: task.id });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Updated task {}", task.id);
        Ok(())
    }

    /// Deletes the task with the given ID.
    pub fn delete_task(&mut self, id: Uuid) -> Result<()> {
        let rows_affected = self
            .connection
            .execute(DELETE_TASK_SQL, params![id.to_string()])
            .db_context("Failed to delete task")?;

        if rows_affected == 0 {
            return Err(OwlError::TaskNotFound { id });
        }
        debug!("Deleted task {id}");
        Ok(())
    }

    /// Retrieves a task by its ID.
    pub fn get_task(&self, id: Uuid) -> Result<Option<Task>> {
        self.connection
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM task WHERE uuid = ?1"),
                params![id.to_string()],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to query task")
    }

    /// Lists every task in store order.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {TASK_COLUMNS} FROM task ORDER BY rowid"))
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map([], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;
        Ok(tasks)
    }
}
