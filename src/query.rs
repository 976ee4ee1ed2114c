//! Task filtering, sorting, and forest grouping
//!
//! Filtering runs first, then the surviving tasks are grouped into a forest:
//! a task whose parent was filtered out is promoted to a visual root. Every
//! level of the forest is sorted independently by the same comparator.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{Task, TaskStatus};

/// Sort key for task listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum SortKey {
    DueDate,
    Priority,
    Status,
    Title,
}

impl std::str::FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "due_date" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "status" => Ok(SortKey::Status),
            "title" => Ok(SortKey::Title),
            _ => Err(Error::InvalidArgument(format!(
                "invalid sort key '{}': must be due_date, priority, status, or title",
                s
            ))),
        }
    }
}

/// Sort direction for task listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[clap(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl std::str::FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            _ => Err(Error::InvalidArgument(format!(
                "invalid direction '{}': must be ascending or descending",
                s
            ))),
        }
    }
}

/// Predicate filters applied to a project's task list. All must hold.
#[derive(Debug, Clone, Default)]
pub struct TaskFilters {
    /// Case-insensitive substring match on the title (empty matches all)
    pub search_term: String,
    /// Exact assignee match; `None` matches all
    pub assignee_id: Option<String>,
    /// Exact status match; `None` matches all
    pub status: Option<TaskStatus>,
}

impl TaskFilters {
    pub fn matches(&self, task: &Task) -> bool {
        let search_match = task
            .title
            .to_lowercase()
            .contains(&self.search_term.to_lowercase());
        let assignee_match = match &self.assignee_id {
            None => true,
            Some(id) => task.assignee_id.as_deref() == Some(id.as_str()),
        };
        let status_match = match self.status {
            None => true,
            Some(status) => task.status == status,
        };
        search_match && assignee_match && status_match
    }
}

/// Compare two tasks by the given key, then apply the direction flag.
///
/// Null due dates compare greater than any date, and the descending flag
/// negates the comparison wholesale, nulls included. So nulls land last in
/// ascending order but FIRST in descending order. That asymmetry is the
/// documented behavior of the comparator and is pinned by tests; it is not a
/// "nulls always last" policy.
pub fn compare(a: &Task, b: &Task, key: SortKey, direction: SortDirection) -> Ordering {
    let comparison = match key {
        SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortKey::Status => a.status.rank().cmp(&b.status.rank()),
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
        },
        SortKey::Title => compare_titles(&a.title, &b.title),
    };

    match direction {
        SortDirection::Ascending => comparison,
        SortDirection::Descending => comparison.reverse(),
    }
}

/// Case-insensitive lexicographic compare on Unicode lowercase, with the raw
/// titles as tiebreak. Approximates a locale-aware compare without pulling in
/// a collation library.
fn compare_titles(a: &str, b: &str) -> Ordering {
    let a_lower: String = a.to_lowercase();
    let b_lower: String = b.to_lowercase();
    a_lower.cmp(&b_lower).then_with(|| a.cmp(b))
}

/// Filter a project's tasks and sort them flat by the comparator.
pub fn select<'a>(
    tasks: &'a [Task],
    project_id: &str,
    filters: &TaskFilters,
    key: SortKey,
    direction: SortDirection,
) -> Vec<&'a Task> {
    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.project_ids.iter().any(|id| id == project_id))
        .filter(|task| filters.matches(task))
        .collect();
    selected.sort_by(|a, b| compare(a, b, key, direction));
    selected
}

/// A task with its surviving children, each level sorted independently.
#[derive(Debug)]
pub struct TaskNode<'a> {
    pub task: &'a Task,
    pub children: Vec<TaskNode<'a>>,
}

/// Group filtered tasks into a forest.
///
/// Roots are tasks with no parent or whose parent did not survive filtering,
/// so a subtask can surface as a root when its parent was filtered out.
pub fn forest<'a>(
    selected: &[&'a Task],
    key: SortKey,
    direction: SortDirection,
) -> Vec<TaskNode<'a>> {
    let present: HashSet<&str> = selected.iter().map(|task| task.id.as_str()).collect();

    let mut roots: Vec<&Task> = selected
        .iter()
        .filter(|task| {
            task.parent_id
                .as_deref()
                .map(|parent| !present.contains(parent))
                .unwrap_or(true)
        })
        .copied()
        .collect();
    roots.sort_by(|a, b| compare(a, b, key, direction));

    roots
        .into_iter()
        .map(|root| build_node(root, selected, key, direction))
        .collect()
}

fn build_node<'a>(
    task: &'a Task,
    selected: &[&'a Task],
    key: SortKey,
    direction: SortDirection,
) -> TaskNode<'a> {
    let mut children: Vec<&Task> = selected
        .iter()
        .filter(|candidate| candidate.parent_id.as_deref() == Some(task.id.as_str()))
        .copied()
        .collect();
    children.sort_by(|a, b| compare(a, b, key, direction));

    TaskNode {
        task,
        children: children
            .into_iter()
            .map(|child| build_node(child, selected, key, direction))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use chrono::{Duration, Utc};

    fn task(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            project_ids: vec!["proj-1".to_string()],
            parent_id: None,
            title: title.to_string(),
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
    fn due_date_ascending_puts_nulls_last() {
        let now = Utc::now();
        let mut later = task("a", "later");
        later.due_date = Some(now + Duration::days(3));
        let mut earlier = task("b", "earlier");
        earlier.due_date = Some(now - Duration::days(2));
        let undated = task("c", "undated");

        let tasks = vec![later, earlier, undated];
        let selected = select(
            &tasks,
            "proj-1",
            &TaskFilters::default(),
            SortKey::DueDate,
            SortDirection::Ascending,
        );
        let ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn due_date_descending_negates_wholesale_so_nulls_come_first() {
        let now = Utc::now();
        let mut later = task("a", "later");
        later.due_date = Some(now + Duration::days(3));
        let mut earlier = task("b", "earlier");
        earlier.due_date = Some(now - Duration::days(2));
        let undated = task("c", "undated");

        let tasks = vec![later, earlier, undated];
        let selected = select(
            &tasks,
            "proj-1",
            &TaskFilters::default(),
            SortKey::DueDate,
            SortDirection::Descending,
        );
        let ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn priority_descending() {
        let mut low = task("a", "low");
        low.priority = Priority::Low;
        let mut high = task("b", "high");
        high.priority = Priority::High;
        let mut medium = task("c", "medium");
        medium.priority = Priority::Medium;

        let tasks = vec![low, high, medium];
        let selected = select(
            &tasks,
            "proj-1",
            &TaskFilters::default(),
            SortKey::Priority,
            SortDirection::Descending,
        );
        let priorities: Vec<Priority> = selected.iter().map(|t| t.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
    }

    #[test]
    fn status_ascending_follows_rank() {
        let mut done = task("a", "done");
        done.status = TaskStatus::Done;
        let mut todo = task("b", "todo");
        todo.status = TaskStatus::Todo;
        let mut in_progress = task("c", "in progress");
        in_progress.status = TaskStatus::InProgress;

        let tasks = vec![done, todo, in_progress];
        let selected = select(
            &tasks,
            "proj-1",
            &TaskFilters::default(),
            SortKey::Status,
            SortDirection::Ascending,
        );
        let ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn title_sort_is_case_insensitive() {
        let tasks = vec![task("a", "banana"), task("b", "Apple"), task("c", "cherry")];
        let selected = select(
            &tasks,
            "proj-1",
            &TaskFilters::default(),
            SortKey::Title,
            SortDirection::Ascending,
        );
        let titles: Vec<&str> = selected.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn filters_compose() {
        let mut assigned = task("a", "Fix login bug");
        assigned.assignee_id = Some("user-1".to_string());
        assigned.status = TaskStatus::InProgress;
        let mut other = task("b", "Fix logout bug");
        other.assignee_id = Some("user-2".to_string());
        let unrelated = task("c", "Write docs");

        let tasks = vec![assigned, other, unrelated];
        let filters = TaskFilters {
            search_term: "fix".to_string(),
            assignee_id: Some("user-1".to_string()),
            status: Some(TaskStatus::InProgress),
        };
        let selected = select(
            &tasks,
            "proj-1",
            &filters,
            SortKey::Title,
            SortDirection::Ascending,
        );
        let ids: Vec<&str> = selected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn tasks_outside_project_are_excluded() {
        let mut inside = task("a", "inside");
        inside.project_ids = vec!["proj-1".to_string(), "proj-2".to_string()];
        let mut outside = task("b", "outside");
        outside.project_ids = vec!["proj-2".to_string()];

        let tasks = vec![inside, outside];
        let selected = select(
            &tasks,
            "proj-1",
            &TaskFilters::default(),
            SortKey::Title,
            SortDirection::Ascending,
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "a");
    }

    #[test]
    fn forest_promotes_orphans_to_roots() {
        let parent = task("parent", "Parent");
        let mut child = task("child", "Child");
        child.parent_id = Some("parent".to_string());
        let mut orphan = task("orphan", "Orphan");
        orphan.parent_id = Some("filtered-out".to_string());

        let tasks = vec![parent, child, orphan];
        let selected = select(
            &tasks,
            "proj-1",
            &TaskFilters::default(),
            SortKey::Title,
            SortDirection::Ascending,
        );
        let nodes = forest(&selected, SortKey::Title, SortDirection::Ascending);

        let roots: Vec<&str> = nodes.iter().map(|n| n.task.id.as_str()).collect();
        assert_eq!(roots, vec!["orphan", "parent"]);
        let parent_node = nodes.iter().find(|n| n.task.id == "parent").unwrap();
        assert_eq!(parent_node.children.len(), 1);
        assert_eq!(parent_node.children[0].task.id, "child");
    }

    #[test]
    fn forest_sorts_each_level_independently() {
        let mut root = task("root", "Root");
        root.priority = Priority::Low;
        let mut child_low = task("c1", "one");
        child_low.parent_id = Some("root".to_string());
        child_low.priority = Priority::Low;
        let mut child_high = task("c2", "two");
        child_high.parent_id = Some("root".to_string());
        child_high.priority = Priority::High;

        let tasks = vec![root, child_low, child_high];
        let selected = select(
            &tasks,
            "proj-1",
            &TaskFilters::default(),
            SortKey::Priority,
            SortDirection::Descending,
        );
        let nodes = forest(&selected, SortKey::Priority, SortDirection::Descending);
        assert_eq!(nodes.len(), 1);
        let children: Vec<&str> = nodes[0].children.iter().map(|n| n.task.id.as_str()).collect();
        assert_eq!(children, vec!["c2", "c1"]);
    }
}
