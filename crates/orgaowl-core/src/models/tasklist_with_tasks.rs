//! Join of a task list with the tasks it owns.

use serde::{Deserialize, Serialize};

use super::{ordering::sort_for_display, Task, Tasklist};

/// One task list plus every task whose `tasklist` equals its ID.
///
/// Never stored on its own; the gateway rebuilds it on every read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TasklistWithTasks {
    pub tasklist: Tasklist,

    /// Tasks in store order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TasklistWithTasks {
    pub fn new(tasklist: Tasklist, tasks: Vec<Task>) -> Self {
        Self { tasklist, tasks }
    }

    /// Tasks in display order: open ones first, most recently touched first.
    pub fn sorted_tasks(&self) -> Vec<Task> {
        let mut tasks = self.tasks.clone();
        sort_for_display(&mut tasks);
        tasks
    }

    /// Number of tasks marked done.
    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.done).count()
    }
}
