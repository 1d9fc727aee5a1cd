//! JUnit XML report collection.
//!
//! Reads `junit_*.xml` files out of a report directory and classifies each
//! test case: an elapsed time of exactly zero means the runner skipped it,
//! any `<failure>` record means it failed, anything else passed.

use crate::models::{SubtestReport, TestStatus};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use walkdir::WalkDir;

/// Regex matching report file names produced by the CI upload step.
static JUNIT_FILE_REGEX: OnceLock<Regex> = OnceLock::new();

fn junit_file_regex() -> &'static Regex {
    JUNIT_FILE_REGEX.get_or_init(|| Regex::new(r"^junit_.*\.xml$").expect("Invalid Regex"))
}

/// Errors from reading a single JUnit report file.
#[derive(Error, Debug)]
pub enum JunitError {
    #[error("failed to read report {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse report {path:?}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },
}

#[derive(Debug, Deserialize)]
struct TestSuite {
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "@tests", default)]
    tests: u32,
    #[serde(rename = "@failures", default)]
    failures: u32,
    #[serde(rename = "testcase", default)]
    test_cases: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@time", default)]
    time: f64,
    #[serde(rename = "failure", default)]
    failures: Vec<Failure>,
}

#[derive(Debug, Deserialize)]
struct Failure {
    #[serde(rename = "@message", default)]
    message: Option<String>,
}

fn classify(case: &TestCase) -> TestStatus {
    if case.time == 0.0 {
        TestStatus::Skip
    } else if !case.failures.is_empty() {
        if let Some(message) = case.failures[0].message.as_deref() {
            log::debug!("{name} failed: {message}", name = case.name);
        }
        TestStatus::Fail
    } else {
        TestStatus::Pass
    }
}

/// Parse one JUnit report file into classified subtest reports.
pub fn parse_junit_file(path: impl AsRef<Path>) -> Result<Vec<SubtestReport>, JunitError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| JunitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let suite: TestSuite = quick_xml::de::from_str(&text).map_err(|source| JunitError::Xml {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "parsed suite {name:?}: {tests} tests, {failures} failures",
        name = suite.name,
        tests = suite.tests,
        failures = suite.failures
    );
    Ok(suite
        .test_cases
        .iter()
        .map(|case| SubtestReport::new(case.name.clone(), classify(case)))
        .collect())
}

/// Collect classified reports from every `junit_*.xml` under `dir`.
///
/// A file that fails to read or parse is logged and skipped; the rest of
/// the batch still contributes results.
pub fn collect_junit_results(dir: impl AsRef<Path>) -> Vec<SubtestReport> {
    let dir = dir.as_ref();
    log::info!("Collecting JUnit reports under {dir:?}");
    let mut reports = Vec::new();

    // Lexical order keeps collection deterministic across platforms.
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Can't walk here, but continue walking elsewhere.
                log::error!("walk error under {dir:?}: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let matched = entry
            .file_name()
            .to_str()
            .is_some_and(|name| junit_file_regex().is_match(name));
        if !matched {
            continue;
        }
        match parse_junit_file(entry.path()) {
            Ok(cases) => reports.extend(cases),
            Err(err) => log::error!("skipping report: {err}"),
        }
    }

    log::info!("Collected {count} test case reports", count = reports.len());
    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="sample" tests="3" failures="1" time="45.2">
  <testcase name="TestFoo/caseA" time="30.1">
    <failure message="assertion failed" type="Failure">expected 1 got 2</failure>
  </testcase>
  <testcase name="TestFoo/caseB" time="15.1"></testcase>
  <testcase name="TestFoo/caseC" time="0"></testcase>
</testsuite>"#;

    #[test]
    fn test_classification_convention() {
        let suite: TestSuite = quick_xml::de::from_str(SAMPLE).expect("sample should parse");
        assert_eq!(suite.test_cases.len(), 3);
        assert_eq!(classify(&suite.test_cases[0]), TestStatus::Fail);
        assert_eq!(classify(&suite.test_cases[1]), TestStatus::Pass);
        assert_eq!(classify(&suite.test_cases[2]), TestStatus::Skip);
    }

    #[test]
    fn test_junit_file_name_match() {
        assert!(junit_file_regex().is_match("junit_01.xml"));
        assert!(junit_file_regex().is_match("junit_e2e_node.xml"));
        assert!(!junit_file_regex().is_match("results_other.xml"));
        assert!(!junit_file_regex().is_match("junit_01.xml.bak"));
    }

    #[test]
    fn test_collect_fixture_directory() {
        let reports = collect_junit_results("src/tests/test_data/junit");
        // junit_e2e_01.xml has 4 cases, junit_e2e_02.xml has 2; the
        // malformed file is skipped and results_other.xml never matches.
        assert_eq!(reports.len(), 6, "unexpected reports: {reports:?}");

        let skipped: Vec<&str> = reports
            .iter()
            .filter(|r| r.status == TestStatus::Skip)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(
            skipped,
            vec![
                "Cluster size autoscaling",
                "Kubernetes should support type LoadBalancer/should set session affinity",
            ]
        );
    }

    #[test]
    fn test_missing_directory_collects_nothing() {
        let reports = collect_junit_results("src/tests/test_data/no_such_dir");
        assert!(reports.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let result = parse_junit_file("src/tests/test_data/junit/junit_malformed.xml");
        assert!(matches!(result, Err(JunitError::Xml { .. })));
    }
}
