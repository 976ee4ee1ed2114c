//! Error types for anasa
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown ids, invalid config)
//! - 3: Blocked by policy (blocked task, admin gating, join lifecycle)
//! - 4: Operation failed (IO, serialization, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the anasa CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const POLICY_BLOCKED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for anasa operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Store not initialized in {0} (run `anasa init`)")]
    StoreNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Label not found: {0}")]
    LabelNotFound(String),

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(String),

    #[error("No acting user: pass --user, set ANASA_USER, or run `anasa user use <id>`")]
    NoActingUser,

    // Policy blocks (exit code 3)
    #[error("Task {id} is blocked by unfinished prerequisites")]
    TaskBlocked {
        id: String,
        prerequisites: Vec<String>,
    },

    #[error("User {user} is not an admin of project {project}")]
    NotAnAdmin { project: String, user: String },

    #[error("User {user} already has a pending join request for project {project}")]
    JoinRequestPending { project: String, user: String },

    #[error("User {user} is already a member of project {project}")]
    AlreadyMember { project: String, user: String },

    #[error("Project {project} is restricted: user {user} is not a member")]
    NotAMember { project: String, user: String },

    #[error("The project creator cannot be demoted or removed: {0}")]
    CreatorImmutable(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::StoreNotFound(_)
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::UserNotFound(_)
            | Error::ProjectNotFound(_)
            | Error::TaskNotFound(_)
            | Error::LabelNotFound(_)
            | Error::AttachmentNotFound(_)
            | Error::NoActingUser => exit_codes::USER_ERROR,

            // Policy blocks
            Error::TaskBlocked { .. }
            | Error::NotAnAdmin { .. }
            | Error::JoinRequestPending { .. }
            | Error::AlreadyMember { .. }
            | Error::NotAMember { .. }
            | Error::CreatorImmutable(_) => exit_codes::POLICY_BLOCKED,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured payload for the JSON error envelope
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::TaskBlocked { prerequisites, .. } => Some(serde_json::json!({
                "blocking": prerequisites,
            })),
            Error::NotAnAdmin { project, user }
            | Error::JoinRequestPending { project, user }
            | Error::AlreadyMember { project, user }
            | Error::NotAMember { project, user } => Some(serde_json::json!({
                "project": project,
                "user": user,
            })),
            _ => None,
        }
    }
}

/// Result type alias for anasa operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_class() {
        assert_eq!(Error::InvalidArgument("x".into()).exit_code(), 2);
        assert_eq!(Error::TaskNotFound("task-1".into()).exit_code(), 2);
        assert_eq!(
            Error::TaskBlocked {
                id: "task-1".into(),
                prerequisites: vec!["Setup".into()],
            }
            .exit_code(),
            3
        );
        assert_eq!(
            Error::NotAnAdmin {
                project: "proj-1".into(),
                user: "user-1".into(),
            }
            .exit_code(),
            3
        );
        assert_eq!(Error::LockFailed(PathBuf::from("/tmp/x")).exit_code(), 4);
    }

    #[test]
    fn blocked_details_list_prerequisites() {
        let err = Error::TaskBlocked {
            id: "task-1".into(),
            prerequisites: vec!["Design".into(), "Review".into()],
        };
        let details = err.details().expect("details");
        assert_eq!(details["blocking"][0], "Design");
        assert_eq!(details["blocking"][1], "Review");
    }
}
