//! Display ordering of tasks within a list.

use std::cmp::Ordering;

use super::Task;

/// Compares two tasks for display: not-done before done, then newer
/// `modified_at` first.
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    a.done
        .cmp(&b.done)
        .then_with(|| b.modified_at.cmp(&a.modified_at))
}

/// Sorts tasks in place for display. The sort is stable, so tasks with equal
/// keys keep their store order.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(display_order);
}
