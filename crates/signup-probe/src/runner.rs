//! Sequential suite runner.

use crate::classifier::Verdict;
use crate::config::ProbeConfig;
use crate::driver::SessionLauncher;
use crate::identity::{Identity, IdentityGenerator};
use crate::report;
use crate::scenario::{run_scenario, ScenarioSpec, SharedCredentials};
use crate::signup_page::SignupPage;
use std::time::{Duration, Instant};

/// Result of one scenario
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Scenario name
    pub name: &'static str,
    /// Identity that was submitted
    pub identity: Identity,
    /// Diagnostics printed while building the identity
    pub diagnostics: Vec<String>,
    /// Observed verdict
    pub verdict: Verdict,
    /// Whether the verdict met the scenario's expectation
    pub expectation_met: bool,
    /// Wall-clock duration of the scenario
    pub duration: Duration,
}

/// Results of a whole suite run
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    /// Outcomes in execution order
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Number of scenarios run
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of scenarios whose verdict met expectations
    #[must_use]
    pub fn met(&self) -> usize {
        self.outcomes.iter().filter(|o| o.expectation_met).count()
    }
}

/// Runs scenarios one at a time, each in its own browser session
#[derive(Debug)]
pub struct SuiteRunner<L> {
    launcher: L,
    config: ProbeConfig,
    page: SignupPage,
}

impl<L: SessionLauncher> SuiteRunner<L> {
    /// Create a runner with the live site's page layout
    #[must_use]
    pub fn new(launcher: L, config: ProbeConfig) -> Self {
        Self {
            launcher,
            config,
            page: SignupPage::new(),
        }
    }

    /// Run `scenarios` in order, narrating to stdout
    pub async fn run(
        &self,
        scenarios: &[ScenarioSpec],
        gen: &mut IdentityGenerator,
    ) -> SuiteReport {
        report::line(report::SUITE_BANNER);
        let shared = SharedCredentials::generate(gen);
        gen.take_diagnostics();
        let mut suite = SuiteReport::default();

        for spec in scenarios {
            let identity = spec.resolve(&shared, gen);
            let diagnostics = gen.take_diagnostics();
            report::line(&spec.narration(&identity));

            let start = Instant::now();
            let verdict = run_scenario(&self.launcher, &self.page, &self.config, &identity).await;
            let duration = start.elapsed();
            let expectation_met = spec.expectation.is_met(&verdict);

            report::line(&report::verdict_line(&verdict));
            report::line(&report::expectation_line(spec.name, expectation_met));
            report::separator();
            tracing::info!(
                scenario = spec.name,
                verdict = %verdict,
                expectation_met,
                elapsed_ms = duration.as_millis() as u64,
                "scenario finished"
            );

            suite.outcomes.push(ScenarioOutcome {
                name: spec.name,
                identity,
                diagnostics,
                verdict,
                expectation_met,
                duration,
            });
        }

        report::line(&report::summary_line(suite.met(), suite.total()));
        suite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &'static str, verdict: Verdict, met: bool) -> ScenarioOutcome {
        ScenarioOutcome {
            name,
            identity: Identity::new("Ada", "ada@example.com", "pw"),
            diagnostics: Vec::new(),
            verdict,
            expectation_met: met,
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_report_counts() {
        let report = SuiteReport {
            outcomes: vec![
                outcome("a", Verdict::DuplicateUserError, true),
                outcome("b", Verdict::NoNotificationFound, false),
            ],
        };
        assert_eq!(report.total(), 2);
        assert_eq!(report.met(), 1);
    }

    #[test]
    fn test_empty_report() {
        let report = SuiteReport::default();
        assert_eq!(report.total(), 0);
        assert_eq!(report.met(), 0);
    }
}
