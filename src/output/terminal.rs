//! Terminal summary of a reconcile run.

use crate::models::TestStatus;
use crate::processing::ReconcileOutcome;
use colored::{ColoredString, Colorize};

/// Print the updated skip list and focus entries to stdout.
pub fn print_summary(outcome: &ReconcileOutcome) {
    log::info!(
        "skip list now tracks {count} groups",
        count = outcome.groups.len()
    );

    for group in &outcome.groups {
        if group.subtests.is_empty() {
            println!("{status} {name}", status = "gone".dimmed(), name = group.name);
            continue;
        }
        for subtest in &group.subtests {
            println!(
                "{status} {name}",
                status = colorize_status(subtest.status),
                name = subtest.name
            );
        }
    }

    if !outcome.focus.is_empty() {
        println!("{}", "Needs attention:".on_red());
        for name in &outcome.focus {
            println!("  {}", name.yellow());
        }
    }
}

fn colorize_status(status: TestStatus) -> ColoredString {
    match status {
        TestStatus::Pass => "pass".green(),
        TestStatus::Skip => "skip".yellow(),
        TestStatus::Fail => "fail".red(),
    }
}
