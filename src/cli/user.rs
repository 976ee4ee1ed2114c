//! anasa user command implementations.

use std::path::PathBuf;

use crate::cli::load_context;
use crate::error::Result;
use crate::identity;
use crate::model::User;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::resolve_user_id;

pub struct AddOptions {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct ListOptions {
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct EditOptions {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct UseOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct CurrentOptions {
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

#[derive(serde::Serialize)]
struct UserListOutput {
    total: usize,
    users: Vec<User>,
}

#[derive(serde::Serialize)]
struct UserChangeOutput {
    id: String,
    changed: bool,
}

#[derive(serde::Serialize)]
struct CurrentUserOutput {
    id: Option<String>,
    source: Option<String>,
    display_name: Option<String>,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let user = ctx
        .store
        .add_user(&options.first_name, &options.last_name, &options.email)?;

    let mut human = HumanOutput::new("User added");
    human.push_summary("ID", user.id.clone());
    human.push_summary("Name", user.display_name());
    human.push_summary("Email", user.email.clone());
    human.push_next_step(format!("anasa user use {}", user.id));
    emit_success(options.out, "user add", &user, Some(&human))
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let output = UserListOutput {
        total: snapshot.users.len(),
        users: snapshot.users,
    };

    let mut human = HumanOutput::new("Users");
    human.push_summary("Total", output.total.to_string());
    for user in &output.users {
        human.push_detail(format!("{} {} <{}>", user.id, user.display_name(), user.email));
    }
    emit_success(options.out, "user list", &output, Some(&human))
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let changed = ctx.store.edit_user(
        &options.id,
        options.first_name,
        options.last_name,
        options.email,
    )?;
    let snapshot = ctx.store.load()?;
    let resolved = resolve_user_id(&snapshot, &options.id)?;
    let output = UserChangeOutput {
        id: resolved.clone(),
        changed,
    };

    let mut human = HumanOutput::new(if changed {
        "User updated"
    } else {
        "No user changes"
    });
    human.push_summary("ID", resolved);
    emit_success(options.out, "user edit", &output, Some(&human))
}

pub fn run_use(options: UseOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let resolved = resolve_user_id(&snapshot, &options.id)?;
    ctx.storage.write_user(&resolved)?;

    let user = snapshot.find_user(&resolved);
    let output = UserChangeOutput {
        id: resolved.clone(),
        changed: true,
    };
    let mut human = HumanOutput::new("Acting user set");
    human.push_summary("ID", resolved.clone());
    if let Some(user) = user {
        human.push_summary("Name", user.display_name());
    }
    emit_success(options.out, "user use", &output, Some(&human))
}

pub fn run_current(options: CurrentOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let resolved = identity::resolve(ctx.user.as_deref(), &ctx.storage, &ctx.config);

    let display_name = match (&resolved, ctx.store.load()) {
        (Some((id, _)), Ok(snapshot)) => snapshot.find_user(id).map(User::display_name),
        _ => None,
    };
    let output = CurrentUserOutput {
        id: resolved.as_ref().map(|(id, _)| id.clone()),
        source: resolved.as_ref().map(|(_, src)| src.as_str().to_string()),
        display_name: display_name.clone(),
    };

    let mut human = HumanOutput::new(match &output.id {
        Some(_) => "Acting user",
        None => "No acting user configured",
    });
    if let Some(id) = &output.id {
        human.push_summary("ID", id.clone());
    }
    if let Some(source) = &output.source {
        human.push_summary("Source", source.clone());
    }
    if let Some(name) = &display_name {
        human.push_summary("Name", name.clone());
    }
    if output.id.is_none() {
        human.push_next_step("anasa user use <id>");
    }
    emit_success(options.out, "user current", &output, Some(&human))
}
