//! Output writers for reconcile runs.
//!
//! This module persists and presents reconciliation results:
//! - [`skiplist`] - regenerated skip.txt in the loader's line format
//! - [`audit`] - JSON audit snapshot of the updated groups
//! - [`terminal`] - colored operator summary

mod audit;
mod skiplist;
mod terminal;

pub use audit::write_audit_snapshot;
pub use skiplist::{render_skip_list, write_skip_list};
pub use terminal::print_summary;

use std::path::PathBuf;
use thiserror::Error;

/// Errors from writing reconcile outputs; surfaced to the caller unretried.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize audit snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
