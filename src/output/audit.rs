//! JSON audit snapshot of a reconcile run.

use crate::models::TestGroup;
use super::OutputError;
use std::path::Path;

/// Write the updated groups as a pretty-printed JSON array.
pub fn write_audit_snapshot(
    path: impl AsRef<Path>,
    groups: &[TestGroup],
) -> Result<(), OutputError> {
    let path = path.as_ref();
    log::info!("Writing audit snapshot to {path:?}");
    let json = serde_json::to_string_pretty(groups)?;
    std::fs::write(path, json).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}
