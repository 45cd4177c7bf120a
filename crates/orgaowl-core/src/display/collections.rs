//! The drawer: every list at a glance with the active one marked.

use std::fmt;

use crate::models::TasklistUiState;

/// Displays all loaded lists with done/total counts, marking the active list.
///
/// # Examples
///
/// ```rust
/// use orgaowl_core::{display::Drawer, Tasklist, TasklistUiState, TasklistWithTasks};
///
/// let list = Tasklist::new("Groceries");
/// let state = TasklistUiState {
///     current_list: Some(list.id),
///     available_tasklists: Some(vec![TasklistWithTasks::new(list, vec![])]),
///     ..Default::default()
/// };
///
/// let output = Drawer(&state).to_string();
/// assert!(output.contains("* Groceries (0/0)"));
/// ```
pub struct Drawer<'a>(pub &'a TasklistUiState);

impl<'a> fmt::Display for Drawer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lists = self.0.tasklists();
        if lists.is_empty() {
            return writeln!(f, "No lists found.");
        }

        for list in lists {
            let marker = if self.0.current_list == Some(list.tasklist.id) {
                "*"
            } else {
                "-"
            };
            writeln!(
                f,
                "{marker} {} ({}/{}) `{}`",
                list.tasklist.name,
                list.done_count(),
                list.tasks.len(),
                list.tasklist.short_id()
            )?;
        }
        Ok(())
    }
}
