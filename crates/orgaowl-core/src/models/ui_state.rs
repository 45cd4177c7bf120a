//! The view-state snapshot published by the list controller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Task, TasklistWithTasks};
use crate::error::{OwlError, Result};

/// Everything a front end needs to draw the list screen.
///
/// Only [`crate::TasklistController`] writes it; front ends hold a read-only
/// subscription.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TasklistUiState {
    /// All lists with their tasks, `None` until the first load completes
    pub available_tasklists: Option<Vec<TasklistWithTasks>>,

    /// True from controller start until the first load arrives
    pub is_loading: bool,

    /// Reserved; no operation currently fills it
    pub error_msg: Option<String>,

    /// ID of the active list
    pub current_list: Option<Uuid>,
}

impl TasklistUiState {
    /// All loaded lists, empty before the first load.
    pub fn tasklists(&self) -> &[TasklistWithTasks] {
        self.available_tasklists.as_deref().unwrap_or_default()
    }

    /// The active list, if it is among the loaded ones.
    pub fn current_tasklist(&self) -> Option<&TasklistWithTasks> {
        let current = self.current_list?;
        self.tasklists().iter().find(|l| l.tasklist.id == current)
    }

    /// Tasks of the active list in display order.
    pub fn current_tasks(&self) -> Vec<Task> {
        self.current_tasklist()
            .map(TasklistWithTasks::sorted_tasks)
            .unwrap_or_default()
    }

    /// Resolves a list by full ID, case-insensitive name or unique ID prefix.
    pub fn find_tasklist(&self, selector: &str) -> Result<&TasklistWithTasks> {
        let lists = self.tasklists();
        if let Ok(id) = Uuid::parse_str(selector) {
            return lists
                .iter()
                .find(|l| l.tasklist.id == id)
                .ok_or(OwlError::TasklistNotFound { id });
        }

        let wanted = selector.to_lowercase();
        let by_name: Vec<_> = lists
            .iter()
            .filter(|l| l.tasklist.name.to_lowercase() == wanted)
            .collect();
        if !by_name.is_empty() {
            return pick("list", selector, by_name);
        }

        let by_prefix = lists
            .iter()
            .filter(|l| id_has_prefix(&l.tasklist.id, &wanted))
            .collect();
        pick("list", selector, by_prefix)
    }

    /// Resolves a task in any loaded list by full ID or unique ID prefix.
    pub fn find_task(&self, selector: &str) -> Result<&Task> {
        let mut tasks = self.tasklists().iter().flat_map(|l| l.tasks.iter());
        if let Ok(id) = Uuid::parse_str(selector) {
            return tasks
                .find(|t| t.id == id)
                .ok_or(OwlError::TaskNotFound { id });
        }

        let wanted = selector.to_lowercase();
        let by_prefix = tasks.filter(|t| id_has_prefix(&t.id, &wanted)).collect();
        pick("task", selector, by_prefix)
    }
}

fn id_has_prefix(id: &Uuid, prefix: &str) -> bool {
    !prefix.is_empty() && id.hyphenated().to_string().starts_with(prefix)
}

fn pick<'a, T>(field: &str, selector: &str, mut candidates: Vec<&'a T>) -> Result<&'a T> {
    match candidates.len() {
        0 => Err(OwlError::invalid_input(field)
            .with_reason(format!("nothing matches '{selector}'"))),
        1 => Ok(candidates.remove(0)),
        n => Err(OwlError::invalid_input(field)
            .with_reason(format!("'{selector}' is ambiguous ({n} matches)"))),
    }
}
