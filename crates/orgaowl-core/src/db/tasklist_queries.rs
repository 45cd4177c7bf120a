//! Task list CRUD operations and the lists-with-tasks join.

use std::collections::HashMap;

use log::debug;
use rusqlite::{params, OptionalExtension, TransactionBehavior};
use uuid::Uuid;

use super::{timestamp_column, uuid_column};
use crate::{
    error::{DatabaseResultExt, OwlError, Result},
    models::{Task, Tasklist, TasklistWithTasks},
};

const SELECT_TASKLISTS_SQL: &str =
    "SELECT uuid, name, modified_at FROM tasklist ORDER BY rowid";
const SELECT_TASKLIST_SQL: &str = "SELECT uuid, name, modified_at FROM tasklist WHERE uuid = ?1";
const CHECK_TASKLIST_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM tasklist WHERE uuid = ?1)";
const INSERT_TASKLIST_SQL: &str =
    "INSERT INTO tasklist (uuid, name, modified_at) VALUES (?1, ?2, ?3)";
const UPDATE_TASKLIST_SQL: &str = "UPDATE tasklist SET name = ?2, modified_at = ?3 WHERE uuid = ?1";
const DELETE_TASKLIST_TASKS_SQL: &str = "DELETE FROM task WHERE tasklist = ?1";
const DELETE_TASKLIST_SQL: &str = "DELETE FROM tasklist WHERE uuid = ?1";

impl super::Database {
    fn build_tasklist_from_row(row: &rusqlite::Row) -> rusqlite::Result<Tasklist> {
        Ok(Tasklist {
            id: uuid_column(row, 0)?,
            name: row.get(1)?,
            modified_at: timestamp_column(row, 2)?,
        })
    }

    /// Inserts a new task list.
    pub fn insert_tasklist(&mut self, tasklist: &Tasklist) -> Result<()> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(
                CHECK_TASKLIST_EXISTS_SQL,
                params![tasklist.id.to_string()],
                |row| row.get(0),
            )
            .db_context("Failed to check task list existence")?;
        if exists {
            return Err(OwlError::TasklistExists { id: tasklist.id });
        }

        tx.execute(
            INSERT_TASKLIST_SQL,
            params![
                tasklist.id.to_string(),
                tasklist.name,
                tasklist.modified_at.as_millisecond()
            ],
        )
        .db_context("Failed to insert task list")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Inserted task list {}", tasklist.id);
        Ok(())
    }

    /// Renames a task list in place.
    pub fn update_tasklist(&mut self, tasklist: &Tasklist) -> Result<()> {
        let rows_affected = self
            .connection
            .execute(
                UPDATE_TASKLIST_SQL,
                params![
                    tasklist.id.to_string(),
                    tasklist.name,
                    tasklist.modified_at.as_millisecond()
                ],
            )
            .db_context("Failed to update task list")?;

        if rows_affected == 0 {
            return Err(OwlError::TasklistNotFound { id: tasklist.id });
        }
        debug!("Updated task list {}", tasklist.id);
        Ok(())
    }

    /// Permanently deletes a task list together with all of its tasks.
    pub fn delete_tasklist(&mut self, id: Uuid) -> Result<()> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_TASKLIST_EXISTS_SQL, params![id.to_string()], |row| {
                row.get(0)
            })
            .db_context("Failed to check task list existence")?;
        if !exists {
            return Err(OwlError::TasklistNotFound { id });
        }

        let removed_tasks = tx
            .execute(DELETE_TASKLIST_TASKS_SQL, params![id.to_string()])
            .db_context("Failed to delete task list tasks")?;
        tx.execute(DELETE_TASKLIST_SQL, params![id.to_string()])
            .db_context("Failed to delete task list")?;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Deleted task list {id} and {removed_tasks} task(s)");
        Ok(())
    }

    /// Retrieves a task list by its ID.
    pub fn get_tasklist(&self, id: Uuid) -> Result<Option<Tasklist>> {
        self.connection
            .query_row(
                SELECT_TASKLIST_SQL,
                params![id.to_string()],
                Self::build_tasklist_from_row,
            )
            .optional()
            .db_context("Failed to query task list")
    }

    /// Lists every task list in creation order.
    pub fn list_tasklists(&self) -> Result<Vec<Tasklist>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TASKLISTS_SQL)
            .db_context("Failed to prepare query")?;

        let tasklists = stmt
            .query_map([], Self::build_tasklist_from_row)
            .db_context("Failed to query task lists")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch task lists")?;
        Ok(tasklists)
    }

    /// Joins every task list with its tasks. Lists keep creation order, tasks
    /// keep store order; tasks whose list is gone are left out.
    pub fn list_tasklists_with_tasks(&self) -> Result<Vec<TasklistWithTasks>> {
        // Both reads must see the same committed state.
        let tx = self
            .connection
            .unchecked_transaction()
            .db_context("Failed to begin transaction")?;

        let tasklists = self.list_tasklists()?;
        let mut tasks_by_list: HashMap<Uuid, Vec<Task>> = HashMap::new();
        for task in self.list_tasks()? {
            tasks_by_list.entry(task.tasklist).or_default().push(task);
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(tasklists
            .into_iter()
            .map(|tasklist| {
                let tasks = tasks_by_list.remove(&tasklist.id).unwrap_or_default();
                TasklistWithTasks::new(tasklist, tasks)
            })
            .collect())
    }
}
