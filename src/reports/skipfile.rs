//! Persisted skip-list loading.
//!
//! The skip list is a line-oriented text file. `#`-prefixed lines
//! accumulate a comment, `## [name]` lines add a subtest, and a bare line
//! completes a group under that name with whatever accumulated before it.
//! An empty line resets the pending comment. The file's line ending is
//! detected and remembered so regeneration round-trips byte conventions.

use crate::models::{SubtestReport, TestGroup, TestStatus};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Line delimiter convention of a skip-list file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// CRLF wins when any CRLF sequence is present.
    pub fn detect(text: &str) -> LineEnding {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

/// A loaded skip list with its delimiter convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipFile {
    pub groups: Vec<TestGroup>,
    pub line_ending: LineEnding,
}

/// Errors from loading a skip-list file.
#[derive(Error, Debug)]
pub enum SkipFileError {
    /// The file could not be read at all; fatal to the run.
    #[error("failed to read skip list {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A `##` line does not carry a bracketed subtest name.
    #[error("malformed subtest entry at line {line}: {text:?} (expected \"## [name]\")")]
    MalformedSubtest { line: usize, text: String },
}

/// Load and parse a skip-list file.
pub fn load_skip_list(path: impl AsRef<Path>) -> Result<SkipFile, SkipFileError> {
    let path = path.as_ref();
    log::info!("Reading skip list from {path:?}");
    let text = std::fs::read_to_string(path).map_err(|source| SkipFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_skip_list(&text)
}

/// Parse skip-list text.
///
/// Groups without any subtest lines are normalized to a single self-named
/// entry with status `skip`, so every group has at least one member to
/// merge against.
pub fn parse_skip_list(text: &str) -> Result<SkipFile, SkipFileError> {
    let line_ending = LineEnding::detect(text);
    let mut groups: Vec<TestGroup> = Vec::new();
    let mut comment = String::new();
    let mut subtests: Vec<SubtestReport> = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        if line.is_empty() {
            comment.clear();
        } else if let Some(rest) = line.strip_prefix("##") {
            let name = rest
                .trim()
                .strip_prefix('[')
                .and_then(|r| r.strip_suffix(']'))
                .filter(|name| !name.is_empty())
                .ok_or_else(|| SkipFileError::MalformedSubtest {
                    line: number + 1,
                    text: line.to_string(),
                })?;
            subtests.push(SubtestReport::new(name, TestStatus::Skip));
        } else if let Some(rest) = line.strip_prefix('#') {
            comment.push_str(rest.strip_prefix(' ').unwrap_or(rest));
        } else {
            groups.push(TestGroup {
                name: line.trim().to_string(),
                comment: std::mem::take(&mut comment).trim().to_string(),
                subtests: std::mem::take(&mut subtests),
            });
        }
    }

    // To avoid no subtest
    for group in &mut groups {
        if group.subtests.is_empty() {
            group
                .subtests
                .push(SubtestReport::new(group.name.clone(), TestStatus::Skip));
        }
    }

    log::info!("Loaded {count} skip groups", count = groups.len());
    Ok(SkipFile {
        groups,
        line_ending,
    })
}
