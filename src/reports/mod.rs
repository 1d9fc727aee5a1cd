//! Input parsing for reconcile runs.
//!
//! This module reads the two report sources a reconciliation consumes:
//! - [`skipfile`] - the persisted skip-list text format
//! - [`junit`] - JUnit XML result documents

mod junit;
mod skipfile;

// Re-export public types and functions
pub use junit::{collect_junit_results, parse_junit_file, JunitError};
pub use skipfile::{load_skip_list, parse_skip_list, LineEnding, SkipFile, SkipFileError};
