//! anasa project command implementations.

use std::path::PathBuf;

use crate::cli::load_context;
use crate::error::Result;
use crate::membership;
use crate::model::{Privacy, Project, ProjectRole};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::resolve_project_id;

pub struct NewOptions {
    pub name: String,
    pub privacy: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct ListOptions {
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

pub struct RenameOptions {
    pub id: String,
    pub name: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct PrivacyOptions {
    pub id: String,
    pub privacy: String,
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

pub struct RoleOptions {
    pub id: String,
    pub member: String,
    pub role: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct RemoveMemberOptions {
    pub id: String,
    pub member: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct JoinOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct DecideOptions {
    pub id: String,
    pub requester: String,
    pub approve: bool,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct RequestsOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct JoinableOptions {
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct AssignableOptions {
    pub projects: Vec<String>,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

#[derive(serde::Serialize)]
struct ProjectListOutput {
    total: usize,
    projects: Vec<ProjectSummary>,
}

#[derive(serde::Serialize)]
struct ProjectSummary {
    id: String,
    name: String,
    privacy: Privacy,
    members: usize,
    pending_requests: usize,
}

#[derive(serde::Serialize)]
struct ProjectChangeOutput {
    id: String,
}

#[derive(serde::Serialize)]
struct ProjectDeleteOutput {
    id: String,
    tasks_removed: usize,
}

#[derive(serde::Serialize)]
struct MembershipChangeOutput {
    project: String,
    user: String,
}

#[derive(serde::Serialize)]
struct RequestsOutput {
    project: String,
    total: usize,
    requests: Vec<RequestEntry>,
}

#[derive(serde::Serialize)]
struct RequestEntry {
    user_id: String,
    display_name: Option<String>,
    requested_at: chrono::DateTime<chrono::Utc>,
}

#[derive(serde::Serialize)]
struct AssignableOutput {
    projects: Vec<String>,
    total: usize,
    users: Vec<AssignableUser>,
}

#[derive(serde::Serialize)]
struct AssignableUser {
    id: String,
    display_name: String,
}

fn summarize(project: &Project) -> ProjectSummary {
    ProjectSummary {
        id: project.id.clone(),
        name: project.name.clone(),
        privacy: project.privacy,
        members: project.members.len(),
        pending_requests: project.join_requests.len(),
    }
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    let privacy: Privacy = options.privacy.parse()?;
    let project = ctx.store.create_project(&options.name, privacy, &acting)?;

    let mut human = HumanOutput::new("Project created");
    human.push_summary("ID", project.id.clone());
    human.push_summary("Name", project.name.clone());
    human.push_summary("Privacy", project.privacy.as_str());
    human.push_summary("Admin", project.members[0].user_id.clone());
    emit_success(options.out, "project new", &project, Some(&human))
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let output = ProjectListOutput {
        total: snapshot.projects.len(),
        projects: snapshot.projects.iter().map(summarize).collect(),
    };

    let mut human = HumanOutput::new("Projects");
    human.push_summary("Total", output.total.to_string());
    for project in &output.projects {
        human.push_detail(format!(
            "{} {} [{}] ({} members)",
            project.id,
            project.name,
            project.privacy.as_str(),
            project.members
        ));
    }
    emit_success(options.out, "project list", &output, Some(&human))
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let resolved = resolve_project_id(&snapshot, &options.id)?;
    let project = snapshot
        .find_project(&resolved)
        .ok_or_else(|| crate::error::Error::ProjectNotFound(options.id.clone()))?;

    let mut human = HumanOutput::new(format!("Project {}", project.id));
    human.push_summary("Name", project.name.clone());
    human.push_summary("Privacy", project.privacy.as_str());
    for member in &project.members {
        let name = snapshot
            .find_user(&member.user_id)
            .map(|user| user.display_name())
            .unwrap_or_else(|| member.user_id.clone());
        human.push_detail(format!("{} ({})", name, member.role.as_str()));
    }
    for request in &project.join_requests {
        human.push_warning(format!("pending join request from {}", request.user_id));
    }
    if !project.join_requests.is_empty() {
        human.push_next_step(format!("anasa project requests {}", project.id));
    }
    emit_success(options.out, "project show", project, Some(&human))
}

pub fn run_rename(options: RenameOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    let resolved = ctx.store.rename_project(&options.id, &options.name, &acting)?;

    let output = ProjectChangeOutput { id: resolved.clone() };
    let mut human = HumanOutput::new("Project renamed");
    human.push_summary("ID", resolved);
    human.push_summary("Name", options.name);
    emit_success(options.out, "project rename", &output, Some(&human))
}

pub fn run_privacy(options: PrivacyOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    let privacy: Privacy = options.privacy.parse()?;
    let resolved = ctx.store.set_privacy(&options.id, privacy, &acting)?;

    let output = ProjectChangeOutput { id: resolved.clone() };
    let mut human = HumanOutput::new("Project privacy changed");
    human.push_summary("ID", resolved);
    human.push_summary("Privacy", privacy.as_str());
    emit_success(options.out, "project privacy", &output, Some(&human))
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    let snapshot = ctx.store.load()?;
    let resolved = resolve_project_id(&snapshot, &options.id)?;
    let tasks_removed = ctx.store.delete_project(&options.id, &acting)?;

    let output = ProjectDeleteOutput {
        id: resolved.clone(),
        tasks_removed,
    };
    let mut human = HumanOutput::new("Project deleted");
    human.push_summary("ID", resolved);
    human.push_summary("Tasks removed", tasks_removed.to_string());
    emit_success(options.out, "project delete", &output, Some(&human))
}

pub fn run_role(options: RoleOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    let role: ProjectRole = options.role.parse()?;
    ctx.store
        .set_member_role(&options.id, &options.member, role, &acting)?;

    let output = MembershipChangeOutput {
        project: options.id.clone(),
        user: options.member.clone(),
    };
    let mut human = HumanOutput::new("Member role changed");
    human.push_summary("Project", options.id);
    human.push_summary("User", options.member);
    human.push_summary("Role", role.as_str());
    emit_success(options.out, "project role", &output, Some(&human))
}

pub fn run_remove_member(options: RemoveMemberOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    ctx.store
        .remove_member(&options.id, &options.member, &acting)?;

    let output = MembershipChangeOutput {
        project: options.id.clone(),
        user: options.member.clone(),
    };
    let mut human = HumanOutput::new("Member removed");
    human.push_summary("Project", options.id);
    human.push_summary("User", options.member);
    emit_success(options.out, "project remove-member", &output, Some(&human))
}

pub fn run_join(options: JoinOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    let resolved = ctx.store.request_join(&options.id, &acting)?;

    let output = MembershipChangeOutput {
        project: resolved.clone(),
        user: acting.clone(),
    };
    let mut human = HumanOutput::new("Join request filed");
    human.push_summary("Project", resolved.clone());
    human.push_summary("User", acting);
    human.push_next_step(format!("anasa project requests {resolved}"));
    emit_success(options.out, "project join", &output, Some(&human))
}

pub fn run_decide(options: DecideOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    if options.approve {
        ctx.store
            .approve_request(&options.id, &options.requester, &acting)?;
    } else {
        ctx.store
            .deny_request(&options.id, &options.requester, &acting)?;
    }

    let output = MembershipChangeOutput {
        project: options.id.clone(),
        user: options.requester.clone(),
    };
    let mut human = HumanOutput::new(if options.approve {
        "Join request approved"
    } else {
        "Join request denied"
    });
    human.push_summary("Project", options.id);
    human.push_summary("User", options.requester);
    emit_success(
        options.out,
        if options.approve {
            "project approve"
        } else {
            "project deny"
        },
        &output,
        Some(&human),
    )
}

pub fn run_requests(options: RequestsOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let resolved = resolve_project_id(&snapshot, &options.id)?;
    let project = snapshot
        .find_project(&resolved)
        .ok_or_else(|| crate::error::Error::ProjectNotFound(options.id.clone()))?;

    let requests: Vec<RequestEntry> = project
        .join_requests
        .iter()
        .map(|request| RequestEntry {
            user_id: request.user_id.clone(),
            display_name: snapshot
                .find_user(&request.user_id)
                .map(|user| user.display_name()),
            requested_at: request.requested_at,
        })
        .collect();
    let output = RequestsOutput {
        project: resolved.clone(),
        total: requests.len(),
        requests,
    };

    let mut human = HumanOutput::new(format!("Join requests for {resolved}"));
    human.push_summary("Total", output.total.to_string());
    for request in &output.requests {
        let name = request
            .display_name
            .clone()
            .unwrap_or_else(|| request.user_id.clone());
        human.push_detail(format!("{} ({})", name, request.user_id));
    }
    if output.total > 0 {
        human.push_next_step(format!("anasa project approve {resolved} <user>"));
    }
    emit_success(options.out, "project requests", &output, Some(&human))
}

pub fn run_joinable(options: JoinableOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    let snapshot = ctx.store.load()?;
    let user = crate::store::resolve_user_id(&snapshot, &acting)?;

    let joinable: Vec<ProjectSummary> = membership::joinable_projects(&snapshot.projects, &user)
        .into_iter()
        .map(summarize)
        .collect();
    let output = ProjectListOutput {
        total: joinable.len(),
        projects: joinable,
    };

    let mut human = HumanOutput::new("Joinable projects");
    human.push_summary("Total", output.total.to_string());
    for project in &output.projects {
        human.push_detail(format!(
            "{} {} [{}]",
            project.id,
            project.name,
            project.privacy.as_str()
        ));
    }
    emit_success(options.out, "project joinable", &output, Some(&human))
}

pub fn run_assignable(options: AssignableOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let project_ids: Vec<String> = options
        .projects
        .iter()
        .map(|id| resolve_project_id(&snapshot, id))
        .collect::<Result<_>>()?;

    let users: Vec<AssignableUser> =
        membership::assignable_users(&snapshot.users, &snapshot.projects, &project_ids)
            .into_iter()
            .map(|user| AssignableUser {
                id: user.id.clone(),
                display_name: user.display_name(),
            })
            .collect();
    let output = AssignableOutput {
        projects: project_ids,
        total: users.len(),
        users,
    };

    let mut human = HumanOutput::new("Assignable users");
    human.push_summary("Total", output.total.to_string());
    for user in &output.users {
        human.push_detail(format!("{} {}", user.id, user.display_name));
    }
    emit_success(options.out, "project assignable", &output, Some(&human))
}
