//! anasa - task and project tracking
//!
//! Library crate backing the `anasa` CLI: a local, single-snapshot task
//! tracker with multi-project tasks, subtask hierarchies, dependencies that
//! block completion, labels, comments, file attachments, and per-project
//! membership with join requests.

pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod hierarchy;
pub mod identity;
pub mod lock;
pub mod membership;
pub mod model;
pub mod output;
pub mod query;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
