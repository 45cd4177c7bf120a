//! Display implementations for domain models.
//!
//! Tasks render as markdown checklist lines; lists render with a header and
//! their tasks in display order.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{Task, Tasklist, TasklistWithTasks};

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.done { "x" } else { " " };
        write!(f, "- [{check}] {}", self.name)?;
        if !self.extra.is_empty() {
            write!(f, " ({})", self.extra)?;
        }
        if self.has_image() {
            write!(f, " [image: {}]", self.image_path)?;
        }
        writeln!(f, " `{}`", self.short_id())
    }
}

impl fmt::Display for Tasklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Modified: {}", LocalDateTime(&self.modified_at))
    }
}

impl fmt::Display for TasklistWithTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# {} ({}/{})",
            self.tasklist.name,
            self.done_count(),
            self.tasks.len()
        )?;
        writeln!(f)?;

        if self.tasks.is_empty() {
            return writeln!(f, "No tasks in this list.");
        }
        for task in self.sorted_tasks() {
            write!(f, "{task}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn at(ms: i64) -> Timestamp {
        Timestamp::from_millisecond(ms).unwrap()
    }

    #[test]
    fn test_task_line() {
        let task = Task::new("Carrots").with_extra("1kg");
        let out = task.to_string();
        assert!(out.starts_with("- [ ] Carrots (1kg) `"));
        assert!(out.contains(&task.short_id()));
        assert!(!out.contains("image"));

        let done = task.with_done(true).with_image_path("c.png");
        let out = done.to_string();
        assert!(out.starts_with("- [x] Carrots"));
        assert!(out.contains("[image: c.png]"));
    }

    #[test]
    fn test_tasklist_with_tasks_shows_sorted_tasks_and_counts() {
        let list = Tasklist::new("Groceries");
        let joined = TasklistWithTasks::new(
            list.clone(),
            vec![
                Task::new("Apples").with_done(true).touched_at(at(5)),
                Task::new("Carrots").touched_at(at(1)),
            ],
        );
        let out = joined.to_string();
        assert!(out.starts_with("# Groceries (1/2)"));
        let carrots = out.find("Carrots").unwrap();
        let apples = out.find("Apples").unwrap();
        assert!(carrots < apples);

        let empty = TasklistWithTasks::new(list, vec![]);
        assert!(empty.to_string().contains("No tasks in this list."));
    }

    #[test]
    fn test_tasklist_header() {
        let list = Tasklist::new("Home").touched_at(Timestamp::UNIX_EPOCH);
        let out = list.to_string();
        assert!(out.starts_with("# Home"));
        assert!(out.contains(&list.id.to_string()));
        assert!(out.contains("- Modified: never"));
    }
}
