//! anasa init command implementation.

use std::path::PathBuf;

use crate::cli::load_context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct InitOptions {
    pub demo: bool,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

#[derive(serde::Serialize)]
struct InitOutput {
    root: String,
    demo: bool,
    users: usize,
    projects: usize,
    tasks: usize,
}

pub fn run(options: InitOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.init(options.demo)?;

    let output = InitOutput {
        root: ctx.storage.root().display().to_string(),
        demo: options.demo,
        users: snapshot.users.len(),
        projects: snapshot.projects.len(),
        tasks: snapshot.tasks.len(),
    };
    let mut human = HumanOutput::new(if options.demo {
        "Store initialized with demo data"
    } else {
        "Store initialized"
    });
    human.push_summary("Root", output.root.clone());
    human.push_summary("Users", output.users.to_string());
    human.push_summary("Projects", output.projects.to_string());
    human.push_summary("Tasks", output.tasks.to_string());
    if snapshot.users.is_empty() {
        human.push_next_step("anasa user add <first> <last> --email <email>");
    } else {
        human.push_next_step("anasa user use <id>");
    }
    emit_success(options.out, "init", &output, Some(&human))
}
