//! Test report data model.
//!
//! These types mirror the JSON audit snapshot written after a reconcile run:
//! an array of [`TestGroup`] objects with `Name`/`Comment`/`Subtest` keys.

use serde::{Deserialize, Serialize};

/// Outcome recorded for a single test case.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Ran and succeeded.
    Pass,
    /// Not run by the test runner (elapsed time of exactly zero).
    Skip,
    /// Ran with one or more failure records.
    Fail,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text = match self {
            TestStatus::Pass => "pass",
            TestStatus::Skip => "skip",
            TestStatus::Fail => "fail",
        };
        write!(f, "{text}")
    }
}

/// A single test case name with its observed or recorded status.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubtestReport {
    /// Full test name, e.g. `"TestFoo/caseA"`.
    #[serde(rename = "Name")]
    pub name: String,
    /// Recorded status.
    #[serde(rename = "Status")]
    pub status: TestStatus,
}

impl SubtestReport {
    pub fn new(name: impl Into<String>, status: TestStatus) -> SubtestReport {
        SubtestReport {
            name: name.into(),
            status,
        }
    }
}

/// A named skip-list entry with its tracked subtests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TestGroup {
    /// Top-level suite or test name matched against report names.
    #[serde(rename = "Name")]
    pub name: String,
    /// Free-text operator comment carried through reconciliation.
    #[serde(rename = "Comment", default)]
    pub comment: String,
    /// Subtests tracked under this group.
    #[serde(rename = "Subtest", default)]
    pub subtests: Vec<SubtestReport>,
}

impl TestGroup {
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> TestGroup {
        TestGroup {
            name: name.into(),
            comment: comment.into(),
            subtests: Vec::new(),
        }
    }
}
