//! anasa label command implementations.

use std::path::PathBuf;

use crate::cli::load_context;
use crate::error::Result;
use crate::model::Label;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct AddOptions {
    pub name: String,
    pub color: String,
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

pub struct ListOptions {
    pub dir: Option<PathBuf>,
    pub user: Option<String>,
    pub out: OutputOptions,
}

#[derive(serde::Serialize)]
struct LabelListOutput {
    total: usize,
    labels: Vec<Label>,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let label = ctx.store.add_label(&options.name, &options.color)?;

    let mut human = HumanOutput::new("Label added");
    human.push_summary("ID", label.id.clone());
    human.push_summary("Name", label.name.clone());
    human.push_summary("Color", label.color.clone());
    emit_success(options.out, "label add", &label, Some(&human))
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.dir, options.user)?;
    let snapshot = ctx.store.load()?;
    let output = LabelListOutput {
        total: snapshot.labels.len(),
        labels: snapshot.labels,
    };

    let mut human = HumanOutput::new("Labels");
    human.push_summary("Total", output.total.to_string());
    for label in &output.labels {
        human.push_detail(format!("{} {} ({})", label.id, label.name, label.color));
    }
    emit_success(options.out, "label list", &output, Some(&human))
}
