//! anasa attach command implementations.

use std::fs;
use std::path::PathBuf;

use crate::cli::load_context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::store::{resolve_task_id, AttachmentDraft};

pub struct AddOptions {
    pub task: String,
    pub files: Vec<PathBuf>,
    pub file_type: String,
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

pub struct RmOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

#[derive(serde::Serialize)]
struct AttachAddOutput {
    task: String,
    stored: Vec<AttachmentSummary>,
}

#[derive(serde::Serialize)]
struct AttachmentSummary {
    id: String,
    file_name: String,
    file_type: String,
    uploaded_at: chrono::DateTime<chrono::Utc>,
    uploader_id: String,
}

#[derive(serde::Serialize)]
struct AttachListOutput {
    task: String,
    total: usize,
    attachments: Vec<AttachmentSummary>,
}

#[derive(serde::Serialize)]
struct AttachRmOutput {
    id: String,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let acting = ctx.require_user()?;

    // Read every file before storing anything so a missing file fails the
    // whole batch up front.
    let mut drafts = Vec::with_capacity(options.files.len());
    for path in &options.files {
        let bytes = fs::read(path).map_err(|err| {
            Error::InvalidArgument(format!("cannot read {}: {err}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::InvalidArgument(format!("not a file path: {}", path.display()))
            })?;
        drafts.push(AttachmentDraft {
            file_name,
            file_type: options.file_type.clone(),
            bytes,
        });
    }
    let stored = ctx.store.add_attachments(&options.task, &acting, drafts)?;

    let output = AttachAddOutput {
        task: stored
            .first()
            .map(|attachment| attachment.task_id.clone())
            .unwrap_or_default(),
        stored: stored
            .iter()
            .map(|attachment| AttachmentSummary {
                id: attachment.id.clone(),
                file_name: attachment.file_name.clone(),
                file_type: attachment.file_type.clone(),
                uploaded_at: attachment.uploaded_at,
                uploader_id: attachment.uploader_id.clone(),
            })
            .collect(),
    };
    let mut human = HumanOutput::new("Attachments stored");
    human.push_summary("Task", output.task.clone());
    human.push_summary("Files", output.stored.len().to_string());
    for attachment in &output.stored {
        human.push_detail(format!("{} {}", attachment.id, attachment.file_name));
    }
    emit_success(options.out, "attach add", &output, Some(&human))
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let resolved = resolve_task_id(&snapshot, &options.task)?;

    let attachments: Vec<AttachmentSummary> = snapshot
        .attachments
        .iter()
        .filter(|attachment| attachment.task_id == resolved)
        .map(|attachment| AttachmentSummary {
            id: attachment.id.clone(),
            file_name: attachment.file_name.clone(),
            file_type: attachment.file_type.clone(),
            uploaded_at: attachment.uploaded_at,
            uploader_id: attachment.uploader_id.clone(),
        })
        .collect();
    let output = AttachListOutput {
        task: resolved.clone(),
        total: attachments.len(),
        attachments,
    };

    let mut human = HumanOutput::new(format!("Attachments on {resolved}"));
    human.push_summary("Total", output.total.to_string());
    for attachment in &output.attachments {
        human.push_detail(format!(
            "{} {} ({})",
            attachment.id, attachment.file_name, attachment.file_type
        ));
    }
    emit_success(options.out, "attach list", &output, Some(&human))
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let resolved = ctx.store.delete_attachment(&options.id)?;

    let output = AttachRmOutput { id: resolved.clone() };
    let mut human = HumanOutput::new("Attachment removed");
    human.push_summary("ID", resolved);
    emit_success(options.out, "attach rm", &output, Some(&human))
}
