//! Subtask hierarchy resolution
//!
//! Tasks form a forest via nullable `parent_id` back-pointers. Traversal is
//! guarded by a visited set so malformed (cyclic) data cannot loop forever.

use std::collections::HashSet;

use crate::model::Task;

/// All task ids reachable by following child links from `task_id`.
///
/// Depth-first over the `parent_id` back-edge; an id already collected is
/// never expanded again, so the walk terminates in O(n) even on cyclic input.
pub fn descendants_of(task_id: &str, all_tasks: &[Task]) -> HashSet<String> {
    let mut descendants = HashSet::new();
    let mut stack = vec![task_id.to_string()];

    while let Some(current) = stack.pop() {
        for task in all_tasks {
            if task.parent_id.as_deref() == Some(current.as_str())
                && descendants.insert(task.id.clone())
            {
                stack.push(task.id.clone());
            }
        }
    }

    descendants
}

/// Tasks a given task may declare as prerequisites: everything except itself
/// and its own subtree. Prevents a task from depending on its descendants;
/// cycles through unrelated branches are not detected here.
pub fn dependency_candidates<'a>(task_id: &str, all_tasks: &'a [Task]) -> Vec<&'a Task> {
    let excluded = descendants_of(task_id, all_tasks);
    all_tasks
        .iter()
        .filter(|task| task.id != task_id && !excluded.contains(&task.id))
        .collect()
}

/// True if making `parent_id` the parent of `task_id` would create a cycle,
/// i.e. the proposed parent is the task itself or one of its descendants.
pub fn creates_parent_cycle(task_id: &str, parent_id: &str, all_tasks: &[Task]) -> bool {
    if task_id == parent_id {
        return true;
    }
    descendants_of(task_id, all_tasks).contains(parent_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TaskStatus};

    fn task(id: &str, parent_id: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            project_ids: vec!["proj-1".to_string()],
            parent_id: parent_id.map(|s| s.to_string()),
            title: format!("Task {id}"),
            description: String::new(),
            assignee_id: None,
            due_date: None,
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            label_ids: Vec::new(),
            depends_on: Vec::new(),
            reminder_offset_hours: None,
        }
    }

    #[test]
    fn leaf_has_no_descendants() {
        let all = vec![task("a", None), task("b", Some("a"))];
        assert!(descendants_of("b", &all).is_empty());
    }

    #[test]
    fn three_level_chain() {
        let all = vec![task("a", None), task("b", Some("a")), task("c", Some("b"))];
        let descendants = descendants_of("a", &all);
        assert_eq!(descendants.len(), 2);
        assert!(descendants.contains("b"));
        assert!(descendants.contains("c"));
    }

    #[test]
    fn idempotent_and_duplicate_free() {
        let all = vec![
            task("a", None),
            task("b", Some("a")),
            task("c", Some("a")),
            task("d", Some("b")),
        ];
        let first = descendants_of("a", &all);
        let second = descendants_of("a", &all);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn terminates_on_parent_cycle() {
        // Malformed data: a and b are each other's parents.
        let all = vec![task("a", Some("b")), task("b", Some("a"))];
        let descendants = descendants_of("a", &all);
        assert!(descendants.contains("b"));
        // a is reachable through the cycle; the visited set stops the walk.
        assert!(descendants.contains("a"));
        assert_eq!(descendants.len(), 2);
    }

    #[test]
    fn candidates_exclude_self_and_subtree() {
        let all = vec![
            task("a", None),
            task("b", Some("a")),
            task("c", Some("b")),
            task("x", None),
        ];
        let candidates: Vec<&str> = dependency_candidates("a", &all)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(candidates, vec!["x"]);
    }

    #[test]
    fn parent_cycle_detection() {
        let all = vec![task("a", None), task("b", Some("a")), task("x", None)];
        assert!(creates_parent_cycle("a", "a", &all));
        assert!(creates_parent_cycle("a", "b", &all));
        assert!(!creates_parent_cycle("a", "x", &all));
        assert!(!creates_parent_cycle("b", "x", &all));
    }
}
