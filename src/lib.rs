// cargo watch -x 'fmt' -x 'test'

//! Shared cores for the Azure Kubernetes e2e suites: unused-subnet
//! allocation inside a cluster vnet, and reconciliation of the persisted
//! skip list against JUnit results.

pub mod models;
pub mod output;
pub mod processing;
pub mod reports;

use processing::ReconcileOutcome;
use reports::LineEnding;
use std::error::Error;
use std::path::Path;

/// Load the skip list and JUnit reports, then reconcile them.
///
/// Returns the outcome together with the skip file's line ending so the
/// caller can regenerate the file in the same convention.
pub fn reconcile_skip_list(
    skip_path: &Path,
    junit_dir: &Path,
    if_second: bool,
) -> Result<(ReconcileOutcome, LineEnding), Box<dyn Error>> {
    let skip_file = reports::load_skip_list(skip_path)?;
    let observed = reports::collect_junit_results(junit_dir);
    let outcome = processing::reconcile(&skip_file.groups, &observed, if_second);
    Ok((outcome, skip_file.line_ending))
}

/// Persist both reconcile outputs into `out_dir`.
///
/// Writes the regenerated `skip.txt` and the `skip.log.json` audit
/// snapshot.
pub fn write_skip_outputs(
    out_dir: &Path,
    outcome: &ReconcileOutcome,
    line_ending: LineEnding,
) -> Result<(), Box<dyn Error>> {
    output::write_skip_list(out_dir.join("skip.txt"), &outcome.groups, line_ending)?;
    output::write_audit_snapshot(out_dir.join("skip.log.json"), &outcome.groups)?;
    Ok(())
}
