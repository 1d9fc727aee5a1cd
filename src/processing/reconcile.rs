//! Skip-list reconciliation against observed JUnit results.
//!
//! Each recorded group is merge-joined with the reports observed for it:
//! tests that still fail stay tracked, tests that now pass break the group
//! apart into singletons, and tests with no recorded disposition are routed
//! to a focus list for manual attention on the first pass.

use crate::models::{SubtestReport, TestGroup, TestStatus};
use itertools::Itertools;

/// Result of one reconciliation run.
///
/// Focus entries are test names seen skipping in the reports without a
/// recorded disposition; they are surfaced separately instead of being
/// folded into a group.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Updated skip-list groups.
    pub groups: Vec<TestGroup>,
    /// Test names needing manual attention.
    pub focus: Vec<String>,
}

/// Collect the observed reports belonging to each skip group.
///
/// A report belongs to a group when its name contains the group name.
/// Duplicate report names within a group keep the first occurrence.
pub fn group_observed_reports(
    groups: &[TestGroup],
    reports: &[SubtestReport],
) -> Vec<TestGroup> {
    groups
        .iter()
        .map(|group| TestGroup {
            name: group.name.clone(),
            comment: group.comment.clone(),
            subtests: reports
                .iter()
                .filter(|report| report.name.contains(&group.name))
                .unique_by(|report| report.name.clone())
                .cloned()
                .collect(),
        })
        .collect()
}

/// Reconcile recorded skip groups against freshly observed reports.
///
/// `if_second` folds undispositioned skips into their group instead of
/// routing them to the focus list (second-pass mode).
pub fn reconcile(
    skip_groups: &[TestGroup],
    observed: &[SubtestReport],
    if_second: bool,
) -> ReconcileOutcome {
    log::info!(
        "#Start reconcile() with {groups} groups and {reports} observed reports",
        groups = skip_groups.len(),
        reports = observed.len()
    );

    let observed_groups = group_observed_reports(skip_groups, observed);
    let mut outcome = ReconcileOutcome::default();

    for (group, observed_group) in skip_groups.iter().zip(&observed_groups) {
        reconcile_group(group, observed_group, if_second, &mut outcome);
    }

    log::info!(
        "reconcile produced {groups} groups, {focus} focus entries",
        groups = outcome.groups.len(),
        focus = outcome.focus.len()
    );
    outcome
}

/// Merge-join one group's recorded subtests with its observed reports.
fn reconcile_group(
    group: &TestGroup,
    observed_group: &TestGroup,
    if_second: bool,
    outcome: &mut ReconcileOutcome,
) {
    let expected: Vec<&SubtestReport> = group
        .subtests
        .iter()
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect();
    let reports: Vec<&SubtestReport> = observed_group
        .subtests
        .iter()
        .sorted_by(|a, b| a.name.cmp(&b.name))
        .collect();

    let mut kept: Vec<SubtestReport> = Vec::new();
    let mut to_split = false;
    let mut i = 0;

    for report in reports {
        while i < expected.len() && expected[i].name < report.name {
            // Recorded subtest absent from this run; it drops off the list.
            i += 1;
        }
        let matched = i < expected.len() && expected[i].name == report.name;

        match report.status {
            TestStatus::Pass => to_split = true,
            TestStatus::Fail => kept.push(report.clone()),
            TestStatus::Skip => {
                if matched || if_second {
                    kept.push(report.clone());
                } else {
                    outcome.focus.push(report.name.clone());
                }
            }
        }
        if matched {
            i += 1;
        }
    }

    if !to_split {
        outcome.groups.push(TestGroup {
            name: group.name.clone(),
            comment: group.comment.clone(),
            subtests: kept,
        });
    } else {
        // A pass inside the group means the batch no longer skips as one
        // unit; every surviving subtest is tracked on its own from here.
        log::info!("splitting group {name}", name = group.name);
        for subtest in kept {
            outcome.groups.push(TestGroup {
                name: subtest.name.clone(),
                comment: group.comment.clone(),
                subtests: vec![subtest],
            });
        }
    }
}
