//! Outcome messages for create, update and delete operations.

use std::fmt;

use crate::models::{Task, Tasklist};

/// Formats a newly created task or list followed by its rendering.
///
/// # Examples
///
/// ```rust
/// use orgaowl_core::{display::CreateResult, Task};
///
/// let task = Task::new("Buy milk");
/// let output = CreateResult::new(task).to_string();
/// assert!(output.starts_with("Added task 'Buy milk'"));
/// assert!(output.contains("- [ ] Buy milk"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added task '{}'", self.resource.name)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Tasklist> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created list '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

/// Formats an updated task or list with an optional list of changes.
///
/// ```rust
/// use orgaowl_core::{display::UpdateResult, Task};
///
/// let task = Task::new("Buy oat milk");
/// let changes = vec!["Renamed from 'Buy milk'".to_string()];
/// let output = UpdateResult::with_changes(task, changes).to_string();
/// assert!(output.contains("Changes made:"));
/// ```
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }

    fn write_changes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changes.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "Changes made:")?;
        for change in &self.changes {
            writeln!(f, "- {change}")?;
        }
        Ok(())
    }
}

impl fmt::Display for UpdateResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated task `{}`", self.resource.short_id())?;
        self.write_changes(f)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Tasklist> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated list '{}'", self.resource.name)?;
        self.write_changes(f)
    }
}

/// Confirms a deletion by name and id.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Task> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted task '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Tasklist> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted list '{}' and its tasks (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}
