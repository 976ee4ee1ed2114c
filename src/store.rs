//! Entity store for anasa
//!
//! Single writer over the snapshot: every mutation loads the full snapshot,
//! applies the change in memory, and writes the whole snapshot back (locked,
//! atomic). Admin gating and the blocked-transition rule are enforced here,
//! in-process; see `membership` for the trust model caveat.

use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use tracing::debug;
use ulid::Ulid;

use crate::deps;
use crate::error::{Error, Result};
use crate::hierarchy;
use crate::membership;
use crate::model::{
    Attachment, Comment, Label, Privacy, Project, ProjectMember, ProjectRole, Snapshot, Task,
    TaskStatus, User,
};
use crate::storage::Storage;

const DEFAULT_ID_SUFFIX_LEN: usize = 8;

/// Input for creating a task.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub project_ids: Vec<String>,
    pub parent_id: Option<String>,
    pub assignee_id: Option<String>,
    pub due_date: Option<chrono::DateTime<Utc>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<crate::model::Priority>,
    pub label_ids: Vec<String>,
    pub depends_on: Vec<String>,
    pub reminder_offset_hours: Option<i64>,
}

/// Partial update for a task. `None` leaves a field untouched; the nested
/// options distinguish "clear" from "keep".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_ids: Option<Vec<String>>,
    pub parent_id: Option<Option<String>>,
    pub assignee_id: Option<Option<String>>,
    pub due_date: Option<Option<chrono::DateTime<Utc>>>,
    pub priority: Option<crate::model::Priority>,
    pub label_ids: Option<Vec<String>>,
    pub depends_on: Option<Vec<String>>,
    pub reminder_offset_hours: Option<Option<i64>>,
}

/// One file in an attachment batch, read fully before any record is stored.
#[derive(Debug, Clone)]
pub struct AttachmentDraft {
    pub file_name: String,
    pub file_type: String,
    pub bytes: Vec<u8>,
}

/// A user's open tasks within one project, for the "my tasks" view.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MyTasksGroup {
    pub project_id: String,
    pub project_name: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone)]
pub struct EntityStore {
    storage: Storage,
    id_suffix_len: usize,
}

impl EntityStore {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            id_suffix_len: DEFAULT_ID_SUFFIX_LEN,
        }
    }

    pub fn with_id_suffix_len(storage: Storage, id_suffix_len: usize) -> Self {
        Self {
            storage,
            id_suffix_len,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Initialize the store with an empty or demo-seeded snapshot.
    pub fn init(&self, demo: bool) -> Result<Snapshot> {
        if self.storage.is_initialized() {
            return Err(Error::InvalidArgument(format!(
                "store already initialized in {}",
                self.storage.root().display()
            )));
        }
        let snapshot = if demo {
            Snapshot::demo()
        } else {
            Snapshot::empty()
        };
        self.storage.write_snapshot(&snapshot)?;
        Ok(snapshot)
    }

    pub fn load(&self) -> Result<Snapshot> {
        self.storage.read_snapshot()
    }

    /// Load, mutate, stamp, and write back the full snapshot.
    fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Snapshot) -> Result<T>,
    {
        let mut snapshot = self.load()?;
        let result = f(&mut snapshot)?;
        snapshot.generated_at = Utc::now();
        self.storage.write_snapshot(&snapshot)?;
        debug!(
            users = snapshot.users.len(),
            projects = snapshot.projects.len(),
            tasks = snapshot.tasks.len(),
            "snapshot written"
        );
        Ok(result)
    }

    fn generate_id(&self, prefix: &str, existing: &HashSet<String>) -> String {
        loop {
            let raw = Ulid::new().to_string().to_ascii_lowercase();
            let candidate = format!("{prefix}-{}", &raw[raw.len() - self.id_suffix_len..]);
            if !existing.contains(&candidate) {
                return candidate;
            }
        }
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub fn add_user(&self, first_name: &str, last_name: &str, email: &str) -> Result<User> {
        let first_name = require_nonempty(first_name, "first name")?;
        let last_name = require_nonempty(last_name, "last name")?;
        let email = require_nonempty(email, "email")?;
        self.mutate(|snapshot| {
            let existing: HashSet<String> =
                snapshot.users.iter().map(|u| u.id.clone()).collect();
            let user = User {
                id: self.generate_id("user", &existing),
                first_name,
                last_name,
                email,
            };
            snapshot.users.push(user.clone());
            Ok(user)
        })
    }

    pub fn edit_user(
        &self,
        user_id: &str,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
    ) -> Result<bool> {
        self.mutate(|snapshot| {
            let resolved = resolve_user_id(snapshot, user_id)?;
            let user = snapshot
                .users
                .iter_mut()
                .find(|u| u.id == resolved)
                .ok_or_else(|| Error::UserNotFound(user_id.to_string()))?;
            let mut changed = false;
            if let Some(value) = first_name {
                let value = require_nonempty(&value, "first name")?;
                if value != user.first_name {
                    user.first_name = value;
                    changed = true;
                }
            }
            if let Some(value) = last_name {
                let value = require_nonempty(&value, "last name")?;
                if value != user.last_name {
                    user.last_name = value;
                    changed = true;
                }
            }
            if let Some(value) = email {
                let value = require_nonempty(&value, "email")?;
                if value != user.email {
                    user.email = value;
                    changed = true;
                }
            }
            Ok(changed)
        })
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Create a project; the creator becomes the first member with Admin role.
    pub fn create_project(
        &self,
        name: &str,
        privacy: Privacy,
        creator_id: &str,
    ) -> Result<Project> {
        let name = require_nonempty(name, "project name")?;
        self.mutate(|snapshot| {
            let creator = resolve_user_id(snapshot, creator_id)?;
            let existing: HashSet<String> =
                snapshot.projects.iter().map(|p| p.id.clone()).collect();
            let project = Project {
                id: self.generate_id("proj", &existing),
                name,
                privacy,
                members: vec![ProjectMember {
                    user_id: creator,
                    role: ProjectRole::Admin,
                }],
                join_requests: Vec::new(),
            };
            snapshot.projects.push(project.clone());
            Ok(project)
        })
    }

    pub fn rename_project(&self, project_id: &str, name: &str, acting: &str) -> Result<String> {
        let name = require_nonempty(name, "project name")?;
        self.mutate(|snapshot| {
            let resolved = resolve_project_id(snapshot, project_id)?;
            let acting = resolve_user_id(snapshot, acting)?;
            let project = project_mut(snapshot, &resolved)?;
            membership::require_admin(project, &acting)?;
            project.name = name;
            Ok(resolved)
        })
    }

    pub fn set_privacy(&self, project_id: &str, privacy: Privacy, acting: &str) -> Result<String> {
        self.mutate(|snapshot| {
            let resolved = resolve_project_id(snapshot, project_id)?;
            let acting = resolve_user_id(snapshot, acting)?;
            let project = project_mut(snapshot, &resolved)?;
            membership::require_admin(project, &acting)?;
            project.privacy = privacy;
            Ok(resolved)
        })
    }

    /// Delete a project and every task carrying its id.
    ///
    /// Comments and attachments of the removed tasks are left in place with
    /// dangling task ids; read paths filter them defensively.
    pub fn delete_project(&self, project_id: &str, acting: &str) -> Result<usize> {
        self.mutate(|snapshot| {
            let resolved = resolve_project_id(snapshot, project_id)?;
            let acting = resolve_user_id(snapshot, acting)?;
            let project = project_mut(snapshot, &resolved)?;
            membership::require_admin(project, &acting)?;

            snapshot.projects.retain(|p| p.id != resolved);
            let before = snapshot.tasks.len();
            snapshot
                .tasks
                .retain(|task| !task.project_ids.iter().any(|id| id == &resolved));
            Ok(before - snapshot.tasks.len())
        })
    }

    pub fn set_member_role(
        &self,
        project_id: &str,
        user_id: &str,
        role: ProjectRole,
        acting: &str,
    ) -> Result<()> {
        self.mutate(|snapshot| {
            let resolved = resolve_project_id(snapshot, project_id)?;
            let user = resolve_user_id(snapshot, user_id)?;
            let acting = resolve_user_id(snapshot, acting)?;
            let project = project_mut(snapshot, &resolved)?;
            membership::require_admin(project, &acting)?;
            if project
                .members
                .first()
                .map(|member| member.user_id == user)
                .unwrap_or(false)
            {
                return Err(Error::CreatorImmutable(user));
            }
            let member = project
                .members
                .iter_mut()
                .find(|member| member.user_id == user)
                .ok_or_else(|| {
                    Error::InvalidArgument(format!("{user} is not a member of {resolved}"))
                })?;
            member.role = role;
            Ok(())
        })
    }

    pub fn remove_member(&self, project_id: &str, user_id: &str, acting: &str) -> Result<()> {
        self.mutate(|snapshot| {
            let resolved = resolve_project_id(snapshot, project_id)?;
            let user = resolve_user_id(snapshot, user_id)?;
            let acting = resolve_user_id(snapshot, acting)?;
            let project = project_mut(snapshot, &resolved)?;
            membership::require_admin(project, &acting)?;
            if project
                .members
                .first()
                .map(|member| member.user_id == user)
                .unwrap_or(false)
            {
                return Err(Error::CreatorImmutable(user));
            }
            let before = project.members.len();
            project.members.retain(|member| member.user_id != user);
            if project.members.len() == before {
                return Err(Error::InvalidArgument(format!(
                    "{user} is not a member of {resolved}"
                )));
            }
            Ok(())
        })
    }

    pub fn request_join(&self, project_id: &str, user_id: &str) -> Result<String> {
        self.mutate(|snapshot| {
            let resolved = resolve_project_id(snapshot, project_id)?;
            let user = resolve_user_id(snapshot, user_id)?;
            let project = project_mut(snapshot, &resolved)?;
            membership::request_join(project, &user)?;
            Ok(resolved)
        })
    }

    pub fn approve_request(&self, project_id: &str, user_id: &str, acting: &str) -> Result<()> {
        self.mutate(|snapshot| {
            let resolved = resolve_project_id(snapshot, project_id)?;
            let user = resolve_user_id(snapshot, user_id)?;
            let acting = resolve_user_id(snapshot, acting)?;
            let project = project_mut(snapshot, &resolved)?;
            membership::require_admin(project, &acting)?;
            membership::approve_request(project, &user)
        })
    }

    pub fn deny_request(&self, project_id: &str, user_id: &str, acting: &str) -> Result<()> {
        self.mutate(|snapshot| {
            let resolved = resolve_project_id(snapshot, project_id)?;
            let user = resolve_user_id(snapshot, user_id)?;
            let acting = resolve_user_id(snapshot, acting)?;
            let project = project_mut(snapshot, &resolved)?;
            membership::require_admin(project, &acting)?;
            membership::deny_request(project, &user)
        })
    }

    // =========================================================================
    // Labels
    // =========================================================================

    pub fn add_label(&self, name: &str, color: &str) -> Result<Label> {
        let name = require_nonempty(name, "label name")?;
        let color = require_nonempty(color, "label color")?;
        self.mutate(|snapshot| {
            let existing: HashSet<String> =
                snapshot.labels.iter().map(|l| l.id.clone()).collect();
            let label = Label {
                id: self.generate_id("label", &existing),
                name,
                color,
            };
            snapshot.labels.push(label.clone());
            Ok(label)
        })
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    pub fn create_task(&self, draft: TaskDraft) -> Result<Task> {
        let title = require_nonempty(&draft.title, "task title")?;
        if draft.project_ids.is_empty() {
            return Err(Error::InvalidArgument(
                "task must belong to at least one project".to_string(),
            ));
        }
        self.mutate(|snapshot| {
            let project_ids = draft
                .project_ids
                .iter()
                .map(|id| resolve_project_id(snapshot, id))
                .collect::<Result<Vec<String>>>()?;
            let parent_id = draft
                .parent_id
                .as_deref()
                .map(|id| resolve_task_id(snapshot, id))
                .transpose()?;
            let assignee_id = draft
                .assignee_id
                .as_deref()
                .map(|id| resolve_user_id(snapshot, id))
                .transpose()?;
            let label_ids = draft
                .label_ids
                .iter()
                .map(|id| resolve_label_id(snapshot, id))
                .collect::<Result<Vec<String>>>()?;
            let depends_on = draft
                .depends_on
                .iter()
                .map(|id| resolve_task_id(snapshot, id))
                .collect::<Result<Vec<String>>>()?;

            let existing: HashSet<String> =
                snapshot.tasks.iter().map(|t| t.id.clone()).collect();
            let task = Task {
                id: self.generate_id("task", &existing),
                project_ids,
                parent_id,
                title,
                description: draft.description.clone(),
                assignee_id,
                due_date: draft.due_date,
                status: draft.status.unwrap_or(TaskStatus::Todo),
                priority: draft.priority.unwrap_or(crate::model::Priority::Medium),
                label_ids,
                depends_on,
                reminder_offset_hours: draft.reminder_offset_hours,
            };
            snapshot.tasks.push(task.clone());
            Ok(task)
        })
    }

    pub fn edit_task(&self, task_id: &str, patch: TaskPatch) -> Result<Task> {
        self.mutate(|snapshot| {
            let resolved = resolve_task_id(snapshot, task_id)?;

            // Validate references against the current snapshot before
            // touching the task.
            let next_projects = patch
                .project_ids
                .as_ref()
                .map(|ids| {
                    if ids.is_empty() {
                        return Err(Error::InvalidArgument(
                            "task must belong to at least one project".to_string(),
                        ));
                    }
                    ids.iter()
                        .map(|id| resolve_project_id(snapshot, id))
                        .collect::<Result<Vec<String>>>()
                })
                .transpose()?;
            let next_parent = match &patch.parent_id {
                None => None,
                Some(None) => Some(None),
                Some(Some(parent)) => {
                    let parent = resolve_task_id(snapshot, parent)?;
                    if hierarchy::creates_parent_cycle(&resolved, &parent, &snapshot.tasks) {
                        return Err(Error::InvalidArgument(format!(
                            "{parent} is {resolved} or one of its descendants"
                        )));
                    }
                    Some(Some(parent))
                }
            };
            let next_assignee = match &patch.assignee_id {
                None => None,
                Some(None) => Some(None),
                Some(Some(user)) => Some(Some(resolve_user_id(snapshot, user)?)),
            };
            let next_labels = patch
                .label_ids
                .as_ref()
                .map(|ids| {
                    ids.iter()
                        .map(|id| resolve_label_id(snapshot, id))
                        .collect::<Result<Vec<String>>>()
                })
                .transpose()?;
            let next_depends = patch
                .depends_on
                .as_ref()
                .map(|ids| {
                    let excluded = hierarchy::descendants_of(&resolved, &snapshot.tasks);
                    ids.iter()
                        .map(|id| {
                            let dep = resolve_task_id(snapshot, id)?;
                            if dep == resolved || excluded.contains(&dep) {
                                return Err(Error::InvalidArgument(format!(
                                    "{dep} is {resolved} or one of its descendants"
                                )));
                            }
                            Ok(dep)
                        })
                        .collect::<Result<Vec<String>>>()
                })
                .transpose()?;

            let task = snapshot
                .tasks
                .iter_mut()
                .find(|t| t.id == resolved)
                .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;

            if let Some(title) = patch.title {
                task.title = require_nonempty(&title, "task title")?;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(projects) = next_projects {
                task.project_ids = projects;
            }
            if let Some(parent) = next_parent {
                task.parent_id = parent;
            }
            if let Some(assignee) = next_assignee {
                task.assignee_id = assignee;
            }
            if let Some(due) = patch.due_date {
                task.due_date = due;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(labels) = next_labels {
                task.label_ids = labels;
            }
            if let Some(depends) = next_depends {
                task.depends_on = depends;
            }
            if let Some(reminder) = patch.reminder_offset_hours {
                task.reminder_offset_hours = reminder;
            }
            Ok(task.clone())
        })
    }

    /// Transition a task's status. Moving to done is refused while the task
    /// is blocked by unfinished prerequisites.
    pub fn set_status(&self, task_id: &str, status: TaskStatus) -> Result<Task> {
        self.mutate(|snapshot| {
            let resolved = resolve_task_id(snapshot, task_id)?;
            if status == TaskStatus::Done {
                let task = snapshot
                    .find_task(&resolved)
                    .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
                if deps::is_blocked(task, &snapshot.tasks) {
                    return Err(Error::TaskBlocked {
                        id: resolved,
                        prerequisites: deps::blocking_titles(task, &snapshot.tasks),
                    });
                }
            }
            let task = snapshot
                .tasks
                .iter_mut()
                .find(|t| t.id == resolved)
                .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
            task.status = status;
            Ok(task.clone())
        })
    }

    /// Delete a task. Children keep their dangling parent id (they render as
    /// roots) and dependency edges pointing here become non-blocking.
    pub fn delete_task(&self, task_id: &str) -> Result<String> {
        self.mutate(|snapshot| {
            let resolved = resolve_task_id(snapshot, task_id)?;
            snapshot.tasks.retain(|task| task.id != resolved);
            Ok(resolved)
        })
    }

    /// Open tasks assigned to a user, grouped per project.
    ///
    /// Groups follow each task's project list; tasks inside a group are
    /// ordered by due date with undated tasks last.
    pub fn my_tasks(&self, user_id: &str) -> Result<Vec<MyTasksGroup>> {
        let snapshot = self.load()?;
        let user = resolve_user_id(&snapshot, user_id)?;

        let assigned: Vec<&Task> = snapshot
            .tasks
            .iter()
            .filter(|task| {
                task.assignee_id.as_deref() == Some(user.as_str())
                    && task.status != TaskStatus::Done
            })
            .collect();

        let mut groups: Vec<MyTasksGroup> = Vec::new();
        for task in &assigned {
            for project_id in &task.project_ids {
                let Some(project) = snapshot.find_project(project_id) else {
                    continue;
                };
                let index = match groups.iter().position(|g| &g.project_id == project_id) {
                    Some(index) => index,
                    None => {
                        groups.push(MyTasksGroup {
                            project_id: project_id.clone(),
                            project_name: project.name.clone(),
                            tasks: Vec::new(),
                        });
                        groups.len() - 1
                    }
                };
                let group = &mut groups[index];
                if !group.tasks.iter().any(|t| t.id == task.id) {
                    group.tasks.push((*task).clone());
                }
            }
        }

        for group in &mut groups {
            group.tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
                (None, _) => std::cmp::Ordering::Greater,
                (_, None) => std::cmp::Ordering::Less,
                (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            });
        }

        Ok(groups)
    }

    // =========================================================================
    // Comments
    // =========================================================================

    pub fn add_comment(&self, task_id: &str, author_id: &str, content: &str) -> Result<Comment> {
        let content = require_nonempty(content, "comment content")?;
        self.mutate(|snapshot| {
            let task = resolve_task_id(snapshot, task_id)?;
            let author = resolve_user_id(snapshot, author_id)?;
            let existing: HashSet<String> =
                snapshot.comments.iter().map(|c| c.id.clone()).collect();
            let comment = Comment {
                id: self.generate_id("comment", &existing),
                task_id: task,
                author_id: author,
                content,
                timestamp: Utc::now(),
            };
            snapshot.comments.push(comment.clone());
            Ok(comment)
        })
    }

    // =========================================================================
    // Attachments
    // =========================================================================

    /// Store a batch of attachments. All drafts arrive fully read; the batch
    /// is inserted in one mutation so a failed file never leaves a partial
    /// batch behind.
    pub fn add_attachments(
        &self,
        task_id: &str,
        uploader_id: &str,
        drafts: Vec<AttachmentDraft>,
    ) -> Result<Vec<Attachment>> {
        if drafts.is_empty() {
            return Err(Error::InvalidArgument(
                "no files to attach".to_string(),
            ));
        }
        self.mutate(|snapshot| {
            let task = resolve_task_id(snapshot, task_id)?;
            let uploader = resolve_user_id(snapshot, uploader_id)?;
            let mut existing: HashSet<String> =
                snapshot.attachments.iter().map(|a| a.id.clone()).collect();

            let now = Utc::now();
            let mut stored = Vec::with_capacity(drafts.len());
            for draft in drafts {
                let id = self.generate_id("att", &existing);
                existing.insert(id.clone());
                let payload = BASE64.encode(&draft.bytes);
                stored.push(Attachment {
                    id,
                    task_id: task.clone(),
                    file_name: draft.file_name,
                    file_type: draft.file_type.clone(),
                    file_url: format!("data:{};base64,{payload}", draft.file_type),
                    uploaded_at: now,
                    uploader_id: uploader.clone(),
                });
            }
            snapshot.attachments.extend(stored.clone());
            Ok(stored)
        })
    }

    pub fn delete_attachment(&self, attachment_id: &str) -> Result<String> {
        self.mutate(|snapshot| {
            let resolved = resolve_id(
                attachment_id,
                snapshot.attachments.iter().map(|a| a.id.as_str()),
            )?
            .ok_or_else(|| Error::AttachmentNotFound(attachment_id.to_string()))?;
            snapshot.attachments.retain(|a| a.id != resolved);
            Ok(resolved)
        })
    }
}

fn require_nonempty(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(format!("{what} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn project_mut<'a>(snapshot: &'a mut Snapshot, project_id: &str) -> Result<&'a mut Project> {
    snapshot
        .projects
        .iter_mut()
        .find(|project| project.id == project_id)
        .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))
}

/// Resolve an id input against a collection: case-insensitive exact match
/// first, then unique-prefix match. Ambiguity is a user error.
fn resolve_id<'a>(
    input: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<Option<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument("id cannot be empty".to_string()));
    }
    let needle = trimmed.to_ascii_lowercase();
    let mut exact = Vec::new();
    let mut prefix = Vec::new();
    for id in ids {
        let lower = id.to_ascii_lowercase();
        if lower == needle {
            exact.push(id.to_string());
            continue;
        }
        if lower.starts_with(&needle) {
            prefix.push(id.to_string());
        }
    }

    if exact.len() == 1 {
        return Ok(Some(exact.remove(0)));
    }
    if exact.len() > 1 {
        return Err(Error::InvalidArgument(format!(
            "ambiguous id '{}': {}",
            trimmed,
            exact.join(", ")
        )));
    }

    prefix.sort();
    prefix.dedup();
    if prefix.len() > 1 {
        return Err(Error::InvalidArgument(format!(
            "ambiguous id '{}': {}",
            trimmed,
            prefix.join(", ")
        )));
    }
    Ok(prefix.into_iter().next())
}

pub fn resolve_user_id(snapshot: &Snapshot, input: &str) -> Result<String> {
    resolve_id(input, snapshot.users.iter().map(|u| u.id.as_str()))?
        .ok_or_else(|| Error::UserNotFound(input.trim().to_string()))
}

pub fn resolve_project_id(snapshot: &Snapshot, input: &str) -> Result<String> {
    resolve_id(input, snapshot.projects.iter().map(|p| p.id.as_str()))?
        .ok_or_else(|| Error::ProjectNotFound(input.trim().to_string()))
}

pub fn resolve_task_id(snapshot: &Snapshot, input: &str) -> Result<String> {
    resolve_id(input, snapshot.tasks.iter().map(|t| t.id.as_str()))?
        .ok_or_else(|| Error::TaskNotFound(input.trim().to_string()))
}

pub fn resolve_label_id(snapshot: &Snapshot, input: &str) -> Result<String> {
    resolve_id(input, snapshot.labels.iter().map(|l| l.id.as_str()))?
        .ok_or_else(|| Error::LabelNotFound(input.trim().to_string()))
}
