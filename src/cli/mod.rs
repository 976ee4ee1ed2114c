//! Command-line interface for anasa
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand group is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::query::{SortDirection, SortKey};
use crate::storage::Storage;
use crate::store::EntityStore;

mod attach;
mod comment;
mod init;
mod label;
mod project;
mod task;
mod user;

/// anasa - task and project tracking
///
/// A CLI for multi-project task tracking with subtasks, dependencies,
/// labels, comments, attachments, and per-project membership.
#[derive(Parser, Debug)]
#[command(name = "anasa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store root (defaults to current directory)
    #[arg(long, global = true, env = "ANASA_DIR")]
    pub dir: Option<PathBuf>,

    /// Acting user for gated operations
    #[arg(long, global = true, env = "ANASA_USER")]
    pub user: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a store in the current (or given) directory
    Init {
        /// Seed the store with demo users, projects, and tasks
        #[arg(long)]
        demo: bool,
    },

    /// User management
    #[command(subcommand)]
    User(UserCommands),

    /// Project management and membership
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Label management
    #[command(subcommand)]
    Label(LabelCommands),

    /// Task comments
    #[command(subcommand)]
    Comment(CommentCommands),

    /// Task attachments
    #[command(subcommand)]
    Attach(AttachCommands),
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Add a user
    Add {
        /// First name
        first_name: String,

        /// Last name
        last_name: String,

        /// Email address
        #[arg(long)]
        email: String,
    },

    /// List users
    List,

    /// Edit a user
    Edit {
        /// User id
        id: String,

        /// New first name
        #[arg(long)]
        first_name: Option<String>,

        /// New last name
        #[arg(long)]
        last_name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Set the persisted acting user for this store
    Use {
        /// User id
        id: String,
    },

    /// Show the resolved acting user
    Current,
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project (the acting user becomes its admin)
    New {
        /// Project name
        name: String,

        /// Privacy: public or restricted
        #[arg(long, default_value = "restricted")]
        privacy: String,
    },

    /// List projects
    List,

    /// Show project details, members, and pending join requests
    Show {
        /// Project id
        id: String,
    },

    /// Rename a project (admin only)
    Rename {
        /// Project id
        id: String,

        /// New name
        name: String,
    },

    /// Change project privacy (admin only)
    Privacy {
        /// Project id
        id: String,

        /// Privacy: public or restricted
        privacy: String,
    },

    /// Delete a project and all tasks referencing it (admin only)
    Delete {
        /// Project id
        id: String,
    },

    /// Change a member's role (admin only; not the creator)
    Role {
        /// Project id
        id: String,

        /// Member user id
        #[arg(value_name = "USER")]
        member: String,

        /// Role: admin or member
        role: String,
    },

    /// Remove a member (admin only; not the creator)
    RemoveMember {
        /// Project id
        id: String,

        /// Member user id
        #[arg(value_name = "USER")]
        member: String,
    },

    /// Request to join a project as the acting user
    Join {
        /// Project id
        id: String,
    },

    /// Approve a pending join request (admin only)
    Approve {
        /// Project id
        id: String,

        /// Requesting user id
        #[arg(value_name = "USER")]
        requester: String,
    },

    /// Deny a pending join request (admin only)
    Deny {
        /// Project id
        id: String,

        /// Requesting user id
        #[arg(value_name = "USER")]
        requester: String,
    },

    /// List pending join requests for a project
    Requests {
        /// Project id
        id: String,
    },

    /// List projects the acting user could ask to join
    Joinable,

    /// List users assignable to a task spanning the given projects
    Assignable {
        /// Project ids
        #[arg(required = true)]
        projects: Vec<String>,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    New {
        /// Task title
        title: String,

        /// Projects the task belongs to (at least one)
        #[arg(long = "project", required = true)]
        projects: Vec<String>,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Parent task id (makes this a subtask)
        #[arg(long)]
        parent: Option<String>,

        /// Assignee user id
        #[arg(long)]
        assignee: Option<String>,

        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        due: Option<String>,

        /// Status: todo, in_progress, done
        #[arg(long)]
        status: Option<String>,

        /// Priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Label ids
        #[arg(long = "label")]
        labels: Vec<String>,

        /// Prerequisite task ids
        #[arg(long = "depends-on")]
        depends_on: Vec<String>,

        /// Reminder offset in hours before the due date
        #[arg(long)]
        remind_hours: Option<i64>,
    },

    /// List a project's tasks
    List {
        /// Project id
        project: String,

        /// Case-insensitive title search
        #[arg(long, default_value = "")]
        search: String,

        /// Filter by assignee user id
        #[arg(long)]
        assignee: Option<String>,

        /// Filter by status: todo, in_progress, done
        #[arg(long)]
        status: Option<String>,

        /// Sort key (defaults to config)
        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        /// Sort direction (defaults to config)
        #[arg(long, value_enum)]
        direction: Option<SortDirection>,

        /// Render the subtask hierarchy instead of a flat list
        #[arg(long)]
        tree: bool,
    },

    /// Show task details, dependencies, comments, and attachments
    Show {
        /// Task id
        id: String,
    },

    /// Edit task fields
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Replace the project list
        #[arg(long = "project")]
        projects: Vec<String>,

        /// New parent task id
        #[arg(long, conflicts_with = "no_parent")]
        parent: Option<String>,

        /// Detach from the current parent
        #[arg(long)]
        no_parent: bool,

        /// New assignee user id
        #[arg(long, conflicts_with = "unassign")]
        assignee: Option<String>,

        /// Clear the assignee
        #[arg(long)]
        unassign: bool,

        /// New due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, conflicts_with = "no_due")]
        due: Option<String>,

        /// Clear the due date
        #[arg(long)]
        no_due: bool,

        /// New priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Replace the label list
        #[arg(long = "label")]
        labels: Vec<String>,

        /// Clear all labels
        #[arg(long, conflicts_with = "labels")]
        no_labels: bool,

        /// Replace the prerequisite list
        #[arg(long = "depends-on")]
        depends_on: Vec<String>,

        /// Clear all prerequisites
        #[arg(long, conflicts_with = "depends_on")]
        no_depends: bool,

        /// Reminder offset in hours before the due date
        #[arg(long, conflicts_with = "no_reminder")]
        remind_hours: Option<i64>,

        /// Clear the reminder
        #[arg(long)]
        no_reminder: bool,
    },

    /// Change a task's status
    Status {
        /// Task id
        id: String,

        /// Status: todo, in_progress, done
        status: String,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },

    /// Show the acting user's open tasks grouped by project
    Mine,

    /// List tasks a given task may declare as prerequisites
    Candidates {
        /// Task id
        id: String,
    },
}

/// Label subcommands
#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// Add a label
    Add {
        /// Label name
        name: String,

        /// Display color (hex)
        #[arg(long, default_value = "#808080")]
        color: String,
    },

    /// List labels
    List,
}

/// Comment subcommands
#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// Add a comment to a task as the acting user
    Add {
        /// Task id
        task: String,

        /// Comment text
        content: String,
    },

    /// List a task's comments
    List {
        /// Task id
        task: String,
    },
}

/// Attachment subcommands
#[derive(Subcommand, Debug)]
pub enum AttachCommands {
    /// Attach files to a task as the acting user
    Add {
        /// Task id
        task: String,

        /// Files to attach
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// MIME type applied to every file in the batch
        #[arg(long = "type", default_value = "application/octet-stream")]
        file_type: String,
    },

    /// List a task's attachments
    List {
        /// Task id
        task: String,
    },

    /// Remove an attachment
    Rm {
        /// Attachment id
        id: String,
    },
}

/// Resolved per-invocation context shared by command implementations.
pub(crate) struct CliContext {
    pub store: EntityStore,
    pub storage: Storage,
    pub config: Config,
    pub user: Option<String>,
}

impl CliContext {
    /// The acting user id, or an error for commands that need one.
    pub fn require_user(&self) -> Result<String> {
        crate::identity::require(self.user.as_deref(), &self.storage, &self.config)
    }

    /// The acting user id when one is configured, without requiring it.
    pub fn acting_user(&self) -> Option<String> {
        crate::identity::resolve(self.user.as_deref(), &self.storage, &self.config)
            .map(|(id, _)| id)
    }
}

pub(crate) fn load_context(dir: Option<PathBuf>, user: Option<String>) -> Result<CliContext> {
    let root = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let config = Config::load_from_root(&root);
    let storage = Storage::new(root, config.store.dir.clone());
    let store = EntityStore::with_id_suffix_len(storage.clone(), config.ids.suffix_len);
    Ok(CliContext {
        store,
        storage,
        config,
        user,
    })
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let out = crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        match self.command {
            Commands::Init { demo } => init::run(init::InitOptions {
                demo,
                dir: self.dir,
                user: self.user,
                out,
            }),
            Commands::User(cmd) => match cmd {
                UserCommands::Add {
                    first_name,
                    last_name,
                    email,
                } => user::run_add(user::AddOptions {
                    first_name,
                    last_name,
                    email,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                UserCommands::List => user::run_list(user::ListOptions {
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                UserCommands::Edit {
                    id,
                    first_name,
                    last_name,
                    email,
                } => user::run_edit(user::EditOptions {
                    id,
                    first_name,
                    last_name,
                    email,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                UserCommands::Use { id } => user::run_use(user::UseOptions {
                    id,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                UserCommands::Current => user::run_current(user::CurrentOptions {
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
            },
            Commands::Project(cmd) => match cmd {
                ProjectCommands::New { name, privacy } => project::run_new(project::NewOptions {
                    name,
                    privacy,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                ProjectCommands::List => project::run_list(project::ListOptions {
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                ProjectCommands::Show { id } => project::run_show(project::ShowOptions {
                    id,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                ProjectCommands::Rename { id, name } => {
                    project::run_rename(project::RenameOptions {
                        id,
                        name,
                        dir: self.dir,
                        user: self.user,
                        out,
                    })
                }
                ProjectCommands::Privacy { id, privacy } => {
                    project::run_privacy(project::PrivacyOptions {
                        id,
                        privacy,
                        dir: self.dir,
                        user: self.user,
                        out,
                    })
                }
                ProjectCommands::Delete { id } => project::run_delete(project::DeleteOptions {
                    id,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                ProjectCommands::Role { id, member, role } => {
                    project::run_role(project::RoleOptions {
                        id,
                        member,
                        role,
                        dir: self.dir,
                        user: self.user,
                        out,
                    })
                }
                ProjectCommands::RemoveMember { id, member } => {
                    project::run_remove_member(project::RemoveMemberOptions {
                        id,
                        member,
                        dir: self.dir,
                        user: self.user,
                        out,
                    })
                }
                ProjectCommands::Join { id } => project::run_join(project::JoinOptions {
                    id,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                ProjectCommands::Approve { id, requester } => {
                    project::run_decide(project::DecideOptions {
                        id,
                        requester,
                        approve: true,
                        dir: self.dir,
                        user: self.user,
                        out,
                    })
                }
                ProjectCommands::Deny { id, requester } => {
                    project::run_decide(project::DecideOptions {
                        id,
                        requester,
                        approve: false,
                        dir: self.dir,
                        user: self.user,
                        out,
                    })
                }
                ProjectCommands::Requests { id } => {
                    project::run_requests(project::RequestsOptions {
                        id,
                        dir: self.dir,
                        user: self.user,
                        out,
                    })
                }
                ProjectCommands::Joinable => project::run_joinable(project::JoinableOptions {
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                ProjectCommands::Assignable { projects } => {
                    project::run_assignable(project::AssignableOptions {
                        projects,
                        dir: self.dir,
                        user: self.user,
                        out,
                    })
                }
            },
            Commands::Task(cmd) => match cmd {
                TaskCommands::New {
                    title,
                    projects,
                    description,
                    parent,
                    assignee,
                    due,
                    status,
                    priority,
                    labels,
                    depends_on,
                    remind_hours,
                } => task::run_new(task::NewOptions {
                    title,
                    projects,
                    description,
                    parent,
                    assignee,
                    due,
                    status,
                    priority,
                    labels,
                    depends_on,
                    remind_hours,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                TaskCommands::List {
                    project,
                    search,
                    assignee,
                    status,
                    sort,
                    direction,
                    tree,
                } => task::run_list(task::ListOptions {
                    project,
                    search,
                    assignee,
                    status,
                    sort,
                    direction,
                    tree,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                TaskCommands::Show { id } => task::run_show(task::ShowOptions {
                    id,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                TaskCommands::Edit {
                    id,
                    title,
                    description,
                    projects,
                    parent,
                    no_parent,
                    assignee,
                    unassign,
                    due,
                    no_due,
                    priority,
                    labels,
                    no_labels,
                    depends_on,
                    no_depends,
                    remind_hours,
                    no_reminder,
                } => task::run_edit(task::EditOptions {
                    id,
                    title,
                    description,
                    projects,
                    parent,
                    no_parent,
                    assignee,
                    unassign,
                    due,
                    no_due,
                    priority,
                    labels,
                    no_labels,
                    depends_on,
                    no_depends,
                    remind_hours,
                    no_reminder,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                TaskCommands::Status { id, status } => task::run_status(task::StatusOptions {
                    id,
                    status,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                TaskCommands::Delete { id } => task::run_delete(task::DeleteOptions {
                    id,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                TaskCommands::Mine => task::run_mine(task::MineOptions {
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                TaskCommands::Candidates { id } => {
                    task::run_candidates(task::CandidatesOptions {
                        id,
                        dir: self.dir,
                        user: self.user,
                        out,
                    })
                }
            },
            Commands::Label(cmd) => match cmd {
                LabelCommands::Add { name, color } => label::run_add(label::AddOptions {
                    name,
                    color,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                LabelCommands::List => label::run_list(label::ListOptions {
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
            },
            Commands::Comment(cmd) => match cmd {
                CommentCommands::Add { task, content } => comment::run_add(comment::AddOptions {
                    task,
                    content,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                CommentCommands::List { task } => comment::run_list(comment::ListOptions {
                    task,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
            },
            Commands::Attach(cmd) => match cmd {
                AttachCommands::Add {
                    task,
                    files,
                    file_type,
                } => attach::run_add(attach::AddOptions {
                    task,
                    files,
                    file_type,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                AttachCommands::List { task } => attach::run_list(attach::ListOptions {
                    task,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
                AttachCommands::Rm { id } => attach::run_rm(attach::RmOptions {
                    id,
                    dir: self.dir,
                    user: self.user,
                    out,
                }),
            },
        }
    }
}
