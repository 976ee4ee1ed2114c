//! Dependency evaluation for tasks
//!
//! A task is blocked while any existing prerequisite in `depends_on` is not
//! yet done. Dangling dependency ids (deleted tasks) are non-blocking: the
//! lookup is defensive, not an integrity check.

use crate::model::{Task, TaskStatus};

/// True iff at least one referenced prerequisite exists and is not done.
pub fn is_blocked(task: &Task, all_tasks: &[Task]) -> bool {
    if task.depends_on.is_empty() {
        return false;
    }
    task.depends_on.iter().any(|dep_id| {
        all_tasks
            .iter()
            .find(|t| &t.id == dep_id)
            .map(|prerequisite| prerequisite.status != TaskStatus::Done)
            .unwrap_or(false)
    })
}

/// Titles of all not-done prerequisites, for human-readable blocking reasons.
///
/// Empty exactly when [`is_blocked`] is false: a title appears here iff the
/// prerequisite resolves and is unfinished, which is the same condition the
/// blocked check uses.
pub fn blocking_titles(task: &Task, all_tasks: &[Task]) -> Vec<String> {
    task.depends_on
        .iter()
        .filter_map(|dep_id| all_tasks.iter().find(|t| &t.id == dep_id))
        .filter(|prerequisite| prerequisite.status != TaskStatus::Done)
        .map(|prerequisite| prerequisite.title.clone())
        .collect()
}
