//! Skip-list text regeneration.
//!
//! Writes the same line format the loader reads: an optional `# comment`
//! line, `## [name]` subtest lines, then the group name. The trivial
//! self-named singleton is written as the bare name only, since loading
//! normalization regenerates it.

use crate::models::TestGroup;
use crate::reports::LineEnding;
use super::OutputError;
use std::path::Path;

/// Render groups into skip-list text using the given line ending.
pub fn render_skip_list(groups: &[TestGroup], line_ending: LineEnding) -> String {
    let eol = line_ending.as_str();
    let mut text = String::new();

    for group in groups {
        if !group.comment.is_empty() {
            text.push_str(&format!("# {comment}{eol}", comment = group.comment.trim()));
        }
        let trivial = group.subtests.len() == 1 && group.subtests[0].name == group.name;
        if !trivial {
            for subtest in &group.subtests {
                text.push_str(&format!("## [{name}]{eol}", name = subtest.name));
            }
        }
        text.push_str(&format!("{name}{eol}", name = group.name.trim()));
    }
    text
}

/// Write the regenerated skip list to `path`.
pub fn write_skip_list(
    path: impl AsRef<Path>,
    groups: &[TestGroup],
    line_ending: LineEnding,
) -> Result<(), OutputError> {
    let path = path.as_ref();
    log::info!("Writing skip list to {path:?}");
    std::fs::write(path, render_skip_list(groups, line_ending)).map_err(|source| {
        OutputError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}
