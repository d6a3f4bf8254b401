//! Console narration.
//!
//! Everything a run tells its operator goes to stdout as plain text. Lines
//! are built by pure functions so the wording can be tested; the printing
//! helpers are thin wrappers.

use crate::classifier::Verdict;

/// Printed once before the first scenario
pub const SUITE_BANNER: &str = "Starting user-creation tests...";

/// Separator printed after every scenario
pub const SCENARIO_SEPARATOR: &str = "                         ";

/// Print one narration line
pub fn line(text: &str) {
    println!("{text}");
}

/// Print the line separating two scenarios
pub fn separator() {
    println!("{SCENARIO_SEPARATOR}");
}

/// Line reporting a scenario verdict
#[must_use]
pub fn verdict_line(verdict: &Verdict) -> String {
    let status = if verdict.is_passed() {
        "Test Passed"
    } else {
        "Test Failed"
    };
    format!("{status}: {}", verdict.describe())
}

/// Line reporting whether a verdict met the scenario's expectation
#[must_use]
pub fn expectation_line(scenario: &str, met: bool) -> String {
    if met {
        format!("[{scenario}] outcome matched expectation")
    } else {
        format!("[{scenario}] outcome did NOT match expectation")
    }
}

/// Closing summary line
#[must_use]
pub fn summary_line(met: usize, total: usize) -> String {
    format!("{met}/{total} scenarios met expectations")
}
