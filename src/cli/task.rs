//! anasa task command implementations.

use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::cli::load_context;
use crate::deps;
use crate::error::{Error, Result};
use crate::hierarchy;
use crate::membership;
use crate::model::{Priority, Privacy, Task, TaskStatus};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::query::{self, SortDirection, SortKey, TaskFilters, TaskNode};
use crate::store::{resolve_project_id, resolve_task_id, resolve_user_id, TaskDraft, TaskPatch};

pub struct NewOptions {
    pub title: String,
    pub projects: Vec<String>,
    pub description: String,
    pub parent: Option<String>,
    pub assignee: Option<String>,
    pub due: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub labels: Vec<String>,
    pub depends_on: Vec<String>,
    pub remind_hours: Option<i64>,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct ListOptions {
    pub project: String,
    pub search: String,
    pub assignee: Option<String>,
    pub status: Option<String>,
    pub sort: Option<SortKey>,
    pub direction: Option<SortDirection>,
    pub tree: bool,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct ShowOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub projects: Vec<String>,
    pub parent: Option<String>,
    pub no_parent: bool,
    pub assignee: Option<String>,
    pub unassign: bool,
    pub due: Option<String>,
    pub no_due: bool,
    pub priority: Option<String>,
    pub labels: Vec<String>,
    pub no_labels: bool,
    pub depends_on: Vec<String>,
    pub no_depends: bool,
    pub remind_hours: Option<i64>,
    pub no_reminder: bool,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct StatusOptions {
    pub id: String,
    pub status: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct DeleteOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct MineOptions {
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct CandidatesOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

#[derive(serde::Serialize)]
struct TaskRow {
    id: String,
    title: String,
    status: TaskStatus,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    assignee_id: Option<String>,
    parent_id: Option<String>,
    blocked: bool,
}

#[derive(serde::Serialize)]
struct TaskTreeNode {
    #[serde(flatten)]
    row: TaskRow,
    children: Vec<TaskTreeNode>,
}

#[derive(serde::Serialize)]
struct TaskListOutput {
    project: String,
    total: usize,
    sort: SortKey,
    direction: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    tasks: Option<Vec<TaskRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<Vec<TaskTreeNode>>,
}

#[derive(serde::Serialize)]
struct TaskShowOutput {
    #[serde(flatten)]
    task: Task,
    blocked: bool,
    blocking: Vec<String>,
    comments: usize,
    attachments: usize,
}

#[derive(serde::Serialize)]
struct TaskDeleteOutput {
    id: String,
}

#[derive(serde::Serialize)]
struct MineOutput {
    user: String,
    groups: Vec<MineGroup>,
}

#[derive(serde::Serialize)]
struct MineGroup {
    project_id: String,
    project_name: String,
    tasks: Vec<MineTask>,
}

#[derive(serde::Serialize)]
struct MineTask {
    id: String,
    title: String,
    status: TaskStatus,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    due_status: Option<String>,
}

#[derive(serde::Serialize)]
struct CandidatesOutput {
    task: String,
    total: usize,
    candidates: Vec<TaskRow>,
}

/// Accepts a bare date (midnight UTC) or a full RFC 3339 timestamp.
fn parse_due(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            Error::InvalidArgument(format!("invalid due date '{trimmed}'"))
        })?;
        return Ok(Utc.from_utc_datetime(&midnight));
    }
    Err(Error::InvalidArgument(format!(
        "invalid due date '{trimmed}': expected YYYY-MM-DD or RFC 3339"
    )))
}

fn row(task: &Task, all_tasks: &[Task]) -> TaskRow {
    TaskRow {
        id: task.id.clone(),
        title: task.title.clone(),
        status: task.status,
        priority: task.priority,
        due_date: task.due_date,
        assignee_id: task.assignee_id.clone(),
        parent_id: task.parent_id.clone(),
        blocked: deps::is_blocked(task, all_tasks),
    }
}

fn row_line(row: &TaskRow) -> String {
    let mut line = format!(
        "{} [{}] [{}] {}",
        row.id,
        row.status.as_str(),
        row.priority.as_str(),
        row.title
    );
    if let Some(due) = row.due_date {
        line.push_str(&format!(" (due {})", due.format("%Y-%m-%d")));
    }
    if row.blocked {
        line.push_str(" [blocked]");
    }
    line
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let draft = TaskDraft {
        title: options.title,
        description: options.description,
        project_ids: options.projects,
        parent_id: options.parent,
        assignee_id: options.assignee,
        due_date: options.due.as_deref().map(parse_due).transpose()?,
        status: options.status.as_deref().map(str::parse).transpose()?,
        priority: options.priority.as_deref().map(str::parse).transpose()?,
        label_ids: options.labels,
        depends_on: options.depends_on,
        reminder_offset_hours: options.remind_hours,
    };
    let task = ctx.store.create_task(draft)?;

    let mut human = HumanOutput::new("Task created");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Status", task.status.as_str());
    human.push_summary("Priority", task.priority.as_str());
    if let Some(due) = task.due_date {
        human.push_summary("Due", due.format("%Y-%m-%d").to_string());
    }
    emit_success(options.out, "task new", &task, Some(&human))
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let project = resolve_project_id(&snapshot, &options.project)?;

    // Restricted projects hide their tasks from non-members; without a
    // configured identity the CLI acts as the data owner.
    if let Some(record) = snapshot.find_project(&project) {
        if record.privacy == Privacy::Restricted {
            if let Some(acting) = ctx.acting_user() {
                let acting = resolve_user_id(&snapshot, &acting)?;
                if !membership::is_member(record, &acting) {
                    return Err(Error::NotAMember {
                        project,
                        user: acting,
                    });
                }
            }
        }
    }

    let filters = TaskFilters {
        search_term: options.search,
        assignee_id: options
            .assignee
            .as_deref()
            .map(|id| resolve_user_id(&snapshot, id))
            .transpose()?,
        status: options.status.as_deref().map(str::parse).transpose()?,
    };
    let key = match options.sort {
        Some(key) => key,
        None => ctx.config.sort.key()?,
    };
    let direction = match options.direction {
        Some(direction) => direction,
        None => ctx.config.sort.direction()?,
    };

    let selected = query::select(&snapshot.tasks, &project, &filters, key, direction);

    let mut human = HumanOutput::new(format!("Tasks in {project}"));
    human.push_summary("Total", selected.len().to_string());

    let output = if options.tree {
        let nodes = query::forest(&selected, key, direction);
        let mut lines = Vec::new();
        let tree: Vec<TaskTreeNode> = nodes
            .iter()
            .map(|node| build_tree(node, &snapshot.tasks, 0, &mut lines))
            .collect();
        for line in lines {
            human.push_detail(line);
        }
        TaskListOutput {
            project,
            total: selected.len(),
            sort: key,
            direction,
            tasks: None,
            tree: Some(tree),
        }
    } else {
        let rows: Vec<TaskRow> = selected
            .iter()
            .map(|task| row(task, &snapshot.tasks))
            .collect();
        for r in &rows {
            human.push_detail(row_line(r));
        }
        TaskListOutput {
            project,
            total: rows.len(),
            sort: key,
            direction,
            tasks: Some(rows),
            tree: None,
        }
    };
    emit_success(options.out, "task list", &output, Some(&human))
}

fn build_tree(
    node: &TaskNode<'_>,
    all_tasks: &[Task],
    depth: usize,
    lines: &mut Vec<String>,
) -> TaskTreeNode {
    let r = row(node.task, all_tasks);
    lines.push(format!("{}{}", "  ".repeat(depth), row_line(&r)));
    TaskTreeNode {
        row: r,
        children: node
            .children
            .iter()
            .map(|child| build_tree(child, all_tasks, depth + 1, lines))
            .collect(),
    }
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let resolved = resolve_task_id(&snapshot, &options.id)?;
    let task = snapshot
        .find_task(&resolved)
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let blocked = deps::is_blocked(task, &snapshot.tasks);
    let blocking = deps::blocking_titles(task, &snapshot.tasks);
    let comments: Vec<_> = snapshot
        .comments
        .iter()
        .filter(|comment| comment.task_id == resolved)
        .collect();
    let attachments: Vec<_> = snapshot
        .attachments
        .iter()
        .filter(|attachment| attachment.task_id == resolved)
        .collect();

    let mut human = HumanOutput::new(format!("Task {}", task.id));
    human.push_summary("Title", task.title.clone());
    if !task.description.is_empty() {
        human.push_summary("Description", task.description.clone());
    }
    human.push_summary("Status", task.status.as_str());
    human.push_summary("Priority", task.priority.as_str());
    human.push_summary("Projects", task.project_ids.join(", "));
    if let Some(parent) = &task.parent_id {
        human.push_summary("Parent", parent.clone());
    }
    if let Some(assignee) = &task.assignee_id {
        let name = snapshot
            .find_user(assignee)
            .map(|user| user.display_name())
            .unwrap_or_else(|| assignee.clone());
        human.push_summary("Assignee", name);
    }
    if let Some(due) = task.due_date {
        human.push_summary("Due", due.format("%Y-%m-%d").to_string());
    }
    if let Some(hours) = task.reminder_offset_hours {
        human.push_summary("Reminder", format!("{hours}h before due"));
    }
    if !task.label_ids.is_empty() {
        let names: Vec<String> = task
            .label_ids
            .iter()
            .map(|id| {
                snapshot
                    .find_label(id)
                    .map(|label| label.name.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect();
        human.push_summary("Labels", names.join(", "));
    }
    if blocked {
        for title in &blocking {
            human.push_warning(format!("blocked by: {title}"));
        }
    }
    for comment in &comments {
        let author = snapshot
            .find_user(&comment.author_id)
            .map(|user| user.display_name())
            .unwrap_or_else(|| comment.author_id.clone());
        human.push_detail(format!("{author}: {}", comment.content));
    }
    for attachment in &attachments {
        human.push_detail(format!(
            "attachment {} ({})",
            attachment.file_name, attachment.file_type
        ));
    }

    let output = TaskShowOutput {
        task: task.clone(),
        blocked,
        blocking,
        comments: comments.len(),
        attachments: attachments.len(),
    };
    emit_success(options.out, "task show", &output, Some(&human))
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let patch = TaskPatch {
        title: options.title,
        description: options.description,
        project_ids: if options.projects.is_empty() {
            None
        } else {
            Some(options.projects)
        },
        parent_id: if options.no_parent {
            Some(None)
        } else {
            options.parent.map(Some)
        },
        assignee_id: if options.unassign {
            Some(None)
        } else {
            options.assignee.map(Some)
        },
        due_date: if options.no_due {
            Some(None)
        } else {
            options
                .due
                .as_deref()
                .map(parse_due)
                .transpose()?
                .map(Some)
        },
        priority: options.priority.as_deref().map(str::parse).transpose()?,
        label_ids: if options.no_labels {
            Some(Vec::new())
        } else if options.labels.is_empty() {
            None
        } else {
            Some(options.labels)
        },
        depends_on: if options.no_depends {
            Some(Vec::new())
        } else if options.depends_on.is_empty() {
            None
        } else {
            Some(options.depends_on)
        },
        reminder_offset_hours: if options.no_reminder {
            Some(None)
        } else {
            options.remind_hours.map(Some)
        },
    };
    let task = ctx.store.edit_task(&options.id, patch)?;

    let mut human = HumanOutput::new("Task updated");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    emit_success(options.out, "task edit", &task, Some(&human))
}

pub fn run_status(options: StatusOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let status: TaskStatus = options.status.parse()?;
    let task = ctx.store.set_status(&options.id, status)?;

    let mut human = HumanOutput::new("Task status changed");
    human.push_summary("ID", task.id.clone());
    human.push_summary("Status", task.status.as_str());
    emit_success(options.out, "task status", &task, Some(&human))
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let resolved = ctx.store.delete_task(&options.id)?;

    let output = TaskDeleteOutput { id: resolved.clone() };
    let mut human = HumanOutput::new("Task deleted");
    human.push_summary("ID", resolved);
    emit_success(options.out, "task delete", &output, Some(&human))
}

pub fn run_mine(options: MineOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    let groups = ctx.store.my_tasks(&acting)?;

    let today = Utc::now().date_naive();
    let tomorrow = today + Duration::days(1);
    let groups: Vec<MineGroup> = groups
        .into_iter()
        .map(|group| MineGroup {
            project_id: group.project_id,
            project_name: group.project_name,
            tasks: group
                .tasks
                .into_iter()
                .map(|task| {
                    // Day-granularity due classification: past days are
                    // overdue, today and tomorrow are "due soon".
                    let due_status = task.due_date.map(|due| {
                        let day = due.date_naive();
                        if day < today {
                            "overdue".to_string()
                        } else if day <= tomorrow {
                            "due_soon".to_string()
                        } else {
                            "normal".to_string()
                        }
                    });
                    MineTask {
                        id: task.id,
                        title: task.title,
                        status: task.status,
                        priority: task.priority,
                        due_date: task.due_date,
                        due_status,
                    }
                })
                .collect(),
        })
        .collect();

    let mut human = HumanOutput::new("My tasks");
    human.push_summary("User", acting.clone());
    for group in &groups {
        human.push_detail(format!("{} ({})", group.project_name, group.project_id));
        for task in &group.tasks {
            let mut line = format!("  {} [{}] {}", task.id, task.status.as_str(), task.title);
            match task.due_status.as_deref() {
                Some("overdue") => line.push_str(" [overdue]"),
                Some("due_soon") => line.push_str(" [due soon]"),
                _ => {}
            }
            human.push_detail(line);
        }
    }
    let output = MineOutput {
        user: acting,
        groups,
    };
    emit_success(options.out, "task mine", &output, Some(&human))
}

pub fn run_candidates(options: CandidatesOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let resolved = resolve_task_id(&snapshot, &options.id)?;

    let candidates: Vec<TaskRow> = hierarchy::dependency_candidates(&resolved, &snapshot.tasks)
        .into_iter()
        .map(|task| row(task, &snapshot.tasks))
        .collect();
    let output = CandidatesOutput {
        task: resolved.clone(),
        total: candidates.len(),
        candidates,
    };

    let mut human = HumanOutput::new(format!("Dependency candidates for {resolved}"));
    human.push_summary("Total", output.total.to_string());
    for candidate in &output.candidates {
        human.push_detail(row_line(candidate));
    }
    emit_success(options.out, "task candidates", &output, Some(&human))
}
