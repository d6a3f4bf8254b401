//! signup-probe: browser-driven checks of a web signup form.
//!
//! Generates synthetic identities, submits them through the live signup form,
//! and classifies what the page shows afterwards.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Identity     │──►│ Oracle   │   │ SignupDriver │──►│ Outcome      │──► console
//! │ Generator    │   │ (diag.)  │   │ (per session)│   │ Classifier   │    verdict
//! └──────┬───────┘   └──────────┘   └──────▲───────┘   └──────────────┘
//!        │                                 │
//!        └──────── ScenarioSpec ───────────┘  run one at a time by SuiteRunner
//! ```
//!
//! Real browser control lives behind the `browser` feature (chromiumoxide);
//! `MockDriver` covers everything else in tests.

#![warn(missing_docs)]

#[cfg(feature = "browser")]
mod browser;
mod classifier;
mod config;
mod driver;
mod identity;
mod locator;
mod oracle;
/// Console narration helpers
pub mod report;
mod result;
mod runner;
mod scenario;
mod signup_page;
mod wait;

#[cfg(feature = "browser")]
pub use browser::{ChromiumDriver, ChromiumLauncher};
pub use classifier::{
    classify_notification, NotificationKind, OutcomeClassifier, Verdict, DUPLICATE_EMAIL_TEXT,
    SUCCESS_TEXT,
};
pub use config::{
    ProbeConfig, DEFAULT_BASE_URL, DEFAULT_ELEMENT_TIMEOUT_MS, DEFAULT_NOTIFICATION_TIMEOUT_MS,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_SIGN_OUT_TIMEOUT_MS,
};
pub use driver::{
    ElementHandle, MockDriver, MockLauncher, SessionLauncher, SessionLog, SignupDriver,
};
pub use identity::{
    EmailClass, Identity, IdentityGenerator, PasswordClass, Seed, USERNAME_LEN,
    VALID_EMAIL_DOMAIN, WEAK_PASSWORD_CHAR,
};
pub use locator::Selector;
pub use oracle::{
    is_strong_password, EmailDiagnostic, Oracle, PasswordDiagnostic, EMAIL_PATTERN,
    KNOWN_REGISTERED_EMAILS, MIN_PASSWORD_LEN, PASSWORD_SYMBOLS,
};
pub use result::{ProbeError, ProbeResult};
pub use runner::{ScenarioOutcome, SuiteReport, SuiteRunner};
pub use scenario::{
    run_scenario, standard_suite, EmailRule, Expectation, Narrate, PasswordRule, ScenarioSpec,
    SharedCredentials, DUPLICATE_EMAIL, MALFORMED_EMAIL_LITERAL,
};
pub use signup_page::{field_error, input, SignupPage, SIGN_OUT_TEXT};
pub use wait::{poll_until, WaitOptions};
