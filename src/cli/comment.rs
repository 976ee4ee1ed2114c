//! anasa comment command implementations.

use std::path::PathBuf;

use crate::cli::load_context;
use crate::error::Result;
use crate::model::Comment;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::resolve_task_id;

pub struct AddOptions {
    pub task: String,
    pub content: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct ListOptions {
    pub task: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

#[derive(serde::Serialize)]
struct CommentListOutput {
    task: String,
    total: usize,
    comments: Vec<Comment>,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;
    let comment = ctx.store.add_comment(&options.task, &acting, &options.content)?;

    let mut human = HumanOutput::new("Comment added");
    human.push_summary("ID", comment.id.clone());
    human.push_summary("Task", comment.task_id.clone());
    human.push_summary("Author", comment.author_id.clone());
    emit_success(options.out, "comment add", &comment, Some(&human))
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let resolved = resolve_task_id(&snapshot, &options.task)?;

    // Chronological: stored order is append order, but sort on the stamp so
    // imported snapshots read correctly too.
    let mut comments: Vec<Comment> = snapshot
        .comments
        .iter()
        .filter(|comment| comment.task_id == resolved)
        .cloned()
        .collect();
    comments.sort_by_key(|comment| comment.timestamp);

    let output = CommentListOutput {
        task: resolved.clone(),
        total: comments.len(),
        comments,
    };
    let mut human = HumanOutput::new(format!("Comments on {resolved}"));
    human.push_summary("Total", output.total.to_string());
    for comment in &output.comments {
        let author = snapshot
            .find_user(&comment.author_id)
            .map(|user| user.display_name())
            .unwrap_or_else(|| comment.author_id.clone());
        human.push_detail(format!(
            "[{}] {author}: {}",
            comment.timestamp.format("%Y-%m-%d %H:%M"),
            comment.content
        ));
    }
    emit_success(options.out, "comment list", &output, Some(&human))
}
