//! signup-probe: run the signup scenario suite against the live site.
//!
//! ## Usage
//!
//! ```bash
//! signup-probe                    # Run every scenario, narrate to stdout
//! RUST_LOG=debug signup-probe     # Same, with driver diagnostics on stderr
//! ```
//!
//! Takes no arguments and always exits 0; verdicts are reported as text.

use signup_probe::{
    report, standard_suite, ChromiumLauncher, IdentityGenerator, Oracle, ProbeConfig, SuiteRunner,
};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() {
    let oracle = match Oracle::new() {
        Ok(oracle) => oracle,
        Err(e) => {
            report::line(&format!("Error: {e}"));
            return;
        }
    };
    let mut gen = IdentityGenerator::new(oracle);
    let runner = SuiteRunner::new(ChromiumLauncher, ProbeConfig::default());
    let suite = runner.run(&standard_suite(), &mut gen).await;
    tracing::debug!(met = suite.met(), total = suite.total(), "suite finished");
}

fn main() {
    init_tracing();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            report::line(&format!("Error: failed to start async runtime: {e}"));
            return;
        }
    };
    runtime.block_on(run());
}
