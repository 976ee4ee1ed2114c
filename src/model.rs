//! Entity model for anasa
//!
//! All entities live in one [`Snapshot`] keyed by string ids. Cross-references
//! are by id lookup only; dangling references are tolerated and filtered
//! defensively at read time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Schema tag written into every persisted snapshot. Never validated on read;
/// a future migration would key off it.
pub const STORE_SCHEMA_VERSION: &str = "anasa.store.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Sort rank: todo=1, in_progress=2, done=3
    pub fn rank(self) -> u8 {
        match self {
            TaskStatus::Todo => 1,
            TaskStatus::InProgress => 2,
            TaskStatus::Done => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(crate::error::Error::InvalidArgument(format!(
                "invalid status '{}': must be todo, in_progress, or done",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort rank: low=1, medium=2, high=3
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(crate::error::Error::InvalidArgument(format!(
                "invalid priority '{}': must be low, medium, or high",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privacy {
    Public,
    Restricted,
}

impl Privacy {
    pub fn as_str(self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::Restricted => "restricted",
        }
    }
}

impl std::str::FromStr for Privacy {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Privacy::Public),
            "restricted" => Ok(Privacy::Restricted),
            _ => Err(crate::error::Error::InvalidArgument(format!(
                "invalid privacy '{}': must be public or restricted",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    Admin,
    Member,
}

impl ProjectRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectRole::Admin => "admin",
            ProjectRole::Member => "member",
        }
    }
}

impl std::str::FromStr for ProjectRole {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(ProjectRole::Admin),
            "member" => Ok(ProjectRole::Member),
            _ => Err(crate::error::Error::InvalidArgument(format!(
                "invalid role '{}': must be admin or member",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub user_id: String,
    pub role: ProjectRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub user_id: String,
    pub requested_at: DateTime<Utc>,
}

/// A project. The first entry in `members` is the creator/owner by
/// convention: its role is not editable and it cannot be removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub privacy: Privacy,
    pub members: Vec<ProjectMember>,
    #[serde(default)]
    pub join_requests: Vec<JoinRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_ids: Vec<String>,
    pub parent_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assignee_id: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub label_ids: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_offset_hours: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub task_id: String,
    pub author_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// File attachment with the payload embedded as a `data:` URL, so the
/// snapshot stays self-contained with no external blob store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub task_id: String,
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
    pub uploader_id: String,
}

/// The full persisted entity collection. Read once per command, overwritten
/// in full after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub labels: Vec<Label>,
    pub comments: Vec<Comment>,
    pub attachments: Vec<Attachment>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            schema_version: STORE_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            users: Vec::new(),
            projects: Vec::new(),
            tasks: Vec::new(),
            labels: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn find_label(&self, id: &str) -> Option<&Label> {
        self.labels.iter().find(|label| label.id == id)
    }

    /// Demo fixture: three users, three projects, four labels, five tasks
    /// (one blocked by two prerequisites), two comments, one attachment.
    pub fn demo() -> Self {
        let now = Utc::now();
        let mut snapshot = Self::empty();

        snapshot.users = vec![
            User {
                id: "user-1".into(),
                first_name: "Alice".into(),
                last_name: "Smith".into(),
                email: "alice@example.com".into(),
            },
            User {
                id: "user-2".into(),
                first_name: "Bob".into(),
                last_name: "Johnson".into(),
                email: "bob@example.com".into(),
            },
            User {
                id: "user-3".into(),
                first_name: "Charlie".into(),
                last_name: "Day".into(),
                email: "charlie@example.com".into(),
            },
        ];

        snapshot.projects = vec![
            Project {
                id: "proj-1".into(),
                name: "Website Redesign".into(),
                privacy: Privacy::Restricted,
                members: vec![
                    ProjectMember {
                        user_id: "user-1".into(),
                        role: ProjectRole::Admin,
                    },
                    ProjectMember {
                        user_id: "user-2".into(),
                        role: ProjectRole::Member,
                    },
                ],
                join_requests: vec![JoinRequest {
                    user_id: "user-3".into(),
                    requested_at: now,
                }],
            },
            Project {
                id: "proj-2".into(),
                name: "Mobile App V2".into(),
                privacy: Privacy::Restricted,
                members: vec![ProjectMember {
                    user_id: "user-2".into(),
                    role: ProjectRole::Admin,
                }],
                join_requests: Vec::new(),
            },
            Project {
                id: "proj-3".into(),
                name: "Public API".into(),
                privacy: Privacy::Public,
                members: vec![ProjectMember {
                    user_id: "user-1".into(),
                    role: ProjectRole::Admin,
                }],
                join_requests: Vec::new(),
            },
        ];

        snapshot.labels = vec![
            Label {
                id: "label-1".into(),
                name: "Frontend".into(),
                color: "#4299e1".into(),
            },
            Label {
                id: "label-2".into(),
                name: "Backend".into(),
                color: "#f6ad55".into(),
            },
            Label {
                id: "label-3".into(),
                name: "Bug".into(),
                color: "#e53e3e".into(),
            },
            Label {
                id: "label-4".into(),
                name: "Feature".into(),
                color: "#48bb78".into(),
            },
        ];

        snapshot.tasks = vec![
            Task {
                id: "task-1".into(),
                project_ids: vec!["proj-1".into()],
                parent_id: None,
                title: "Design new homepage".into(),
                description: "Create mockups and wireframes for the new homepage layout.".into(),
                assignee_id: Some("user-1".into()),
                due_date: Some(now + Duration::days(3)),
                status: TaskStatus::InProgress,
                priority: Priority::High,
                label_ids: vec!["label-1".into(), "label-4".into()],
                depends_on: Vec::new(),
                reminder_offset_hours: Some(24),
            },
            Task {
                id: "task-1-1".into(),
                project_ids: vec!["proj-1".into()],
                parent_id: Some("task-1".into()),
                title: "Create color palette".into(),
                description: String::new(),
                assignee_id: Some("user-1".into()),
                due_date: Some(now),
                status: TaskStatus::Todo,
                priority: Priority::Medium,
                label_ids: vec!["label-1".into()],
                depends_on: Vec::new(),
                reminder_offset_hours: None,
            },
            Task {
                id: "task-2".into(),
                project_ids: vec!["proj-1".into()],
                parent_id: None,
                title: "Develop authentication flow".into(),
                description: "Implement user registration and login functionality.".into(),
                assignee_id: Some("user-2".into()),
                due_date: Some(now - Duration::days(2)),
                status: TaskStatus::Todo,
                priority: Priority::High,
                label_ids: vec!["label-2".into()],
                depends_on: Vec::new(),
                reminder_offset_hours: None,
            },
            Task {
                id: "task-3".into(),
                project_ids: vec!["proj-1".into()],
                parent_id: None,
                title: "Setup staging environment".into(),
                description: "Configure the server and deployment pipeline for staging.".into(),
                assignee_id: None,
                due_date: None,
                status: TaskStatus::Todo,
                priority: Priority::Medium,
                label_ids: Vec::new(),
                depends_on: Vec::new(),
                reminder_offset_hours: None,
            },
            Task {
                id: "task-4".into(),
                project_ids: vec!["proj-1".into()],
                parent_id: None,
                title: "Deploy to production".into(),
                description: String::new(),
                assignee_id: Some("user-1".into()),
                due_date: Some(now + Duration::days(10)),
                status: TaskStatus::Todo,
                priority: Priority::High,
                label_ids: Vec::new(),
                depends_on: vec!["task-2".into(), "task-3".into()],
                reminder_offset_hours: None,
            },
        ];

        snapshot.comments = vec![
            Comment {
                id: "comment-1".into(),
                task_id: "task-1".into(),
                author_id: "user-2".into(),
                content: "Looks great! Can we try a version with a darker background?".into(),
                timestamp: now - Duration::hours(2),
            },
            Comment {
                id: "comment-2".into(),
                task_id: "task-1".into(),
                author_id: "user-1".into(),
                content: "Good idea, I'll mock that up now.".into(),
                timestamp: now - Duration::hours(1),
            },
        ];

        snapshot.attachments = vec![Attachment {
            id: "att-1".into(),
            task_id: "task-1".into(),
            file_name: "homepage-mockup-v1.png".into(),
            file_type: "image/png".into(),
            file_url: "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=".into(),
            uploaded_at: now - Duration::hours(3),
            uploader_id: "user-1".into(),
        }];

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_priority_ranks() {
        assert!(TaskStatus::Todo.rank() < TaskStatus::InProgress.rank());
        assert!(TaskStatus::InProgress.rank() < TaskStatus::Done.rank());
        assert!(Priority::Low.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::High.rank());
    }

    #[test]
    fn enums_parse_from_str() {
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("public".parse::<Privacy>().unwrap(), Privacy::Public);
        assert_eq!("admin".parse::<ProjectRole>().unwrap(), ProjectRole::Admin);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn demo_fixture_is_consistent() {
        let snapshot = Snapshot::demo();
        assert_eq!(snapshot.users.len(), 3);
        assert_eq!(snapshot.projects.len(), 3);
        assert_eq!(snapshot.labels.len(), 4);
        assert_eq!(snapshot.tasks.len(), 5);

        // Every member and author resolves to a seeded user.
        for project in &snapshot.projects {
            for member in &project.members {
                assert!(snapshot.find_user(&member.user_id).is_some());
            }
        }
        for comment in &snapshot.comments {
            assert!(snapshot.find_task(&comment.task_id).is_some());
            assert!(snapshot.find_user(&comment.author_id).is_some());
        }

        // task-4 is blocked by two unfinished prerequisites.
        let deploy = snapshot.find_task("task-4").expect("task-4");
        assert_eq!(deploy.depends_on.len(), 2);
    }

    #[test]
    fn snapshot_serde_round_trip() {
        let snapshot = Snapshot::demo();
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let restored: Snapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(snapshot, restored);
    }
}
