//! Signup scenarios.
//!
//! A scenario is an identity rule plus the verdict it is expected to produce.
//! `run_scenario` owns one browser session from launch to close; whatever
//! happens in between, the session is closed exactly once and the outcome is
//! folded into a `Verdict`.

use crate::classifier::{OutcomeClassifier, Verdict};
use crate::config::ProbeConfig;
use crate::driver::{SessionLauncher, SignupDriver};
use crate::identity::{EmailClass, Identity, IdentityGenerator, PasswordClass};
use crate::result::ProbeResult;
use crate::signup_page::SignupPage;

/// Email already registered on the live site
pub const DUPLICATE_EMAIL: &str = "testuser@example.com";

/// Hand-picked malformed email with symbols in the domain
pub const MALFORMED_EMAIL_LITERAL: &str = "invalid_email@example!!!.com";

/// Where a scenario's email comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailRule {
    /// Freshly generated of the given class
    Generate(EmailClass),
    /// Fixed literal
    Literal(&'static str),
}

/// Where a scenario's password comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    /// The strong password shared across the suite
    Shared,
    /// Freshly generated of the given class
    Generate(PasswordClass),
}

/// Which identity fields the scenario narration shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrate {
    /// Email only
    Email,
    /// Email and password
    EmailAndPassword,
    /// Password only
    Password,
}

/// Verdict a scenario is expected to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Any registration-success verdict
    RegistrationSuccess,
    /// The duplicate-email toast
    DuplicateUser,
    /// The inline email error
    EmailError,
    /// The inline password error
    PasswordError,
}

impl Expectation {
    /// Whether `verdict` satisfies this expectation
    #[must_use]
    pub const fn is_met(&self, verdict: &Verdict) -> bool {
        match self {
            Self::RegistrationSuccess => verdict.is_registration_success(),
            Self::DuplicateUser => matches!(verdict, Verdict::DuplicateUserError),
            Self::EmailError => matches!(verdict, Verdict::EmailErrorShown(_)),
            Self::PasswordError => matches!(verdict, Verdict::PasswordErrorShown(_)),
        }
    }
}

/// Name and password reused across scenarios of one suite run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedCredentials {
    /// Full name typed in every scenario
    pub full_name: String,
    /// Strong password reused where the rule says `Shared`
    pub password: String,
}

impl SharedCredentials {
    /// Generate a full name and a strong password
    pub fn generate(gen: &mut IdentityGenerator) -> Self {
        Self {
            full_name: gen.full_name(),
            password: gen.password(PasswordClass::Strong),
        }
    }
}

/// One scenario specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSpec {
    /// Short name used in expectation lines
    pub name: &'static str,
    /// Narration prefix printed before the run
    pub label: &'static str,
    /// Email source
    pub email: EmailRule,
    /// Password source
    pub password: PasswordRule,
    /// Fields shown in the narration
    pub narrate: Narrate,
    /// Expected verdict
    pub expectation: Expectation,
}

impl ScenarioSpec {
    /// Build this scenario's identity
    pub fn resolve(&self, shared: &SharedCredentials, gen: &mut IdentityGenerator) -> Identity {
        let email = match self.email {
            EmailRule::Generate(class) => gen.email(class),
            EmailRule::Literal(email) => {
                gen.inspect_email(email);
                email.to_string()
            }
        };
        let password = match self.password {
            PasswordRule::Shared => shared.password.clone(),
            PasswordRule::Generate(class) => gen.password(class),
        };
        Identity::new(shared.full_name.clone(), email, password)
    }

    /// Line announcing the scenario and the identity under test
    #[must_use]
    pub fn narration(&self, identity: &Identity) -> String {
        match self.narrate {
            Narrate::Email => format!("{}: {}", self.label, identity.email),
            Narrate::EmailAndPassword => {
                format!("{}: {}, {}", self.label, identity.email, identity.password)
            }
            Narrate::Password => format!("{}: {}", self.label, identity.password),
        }
    }
}

/// The standard suite, in execution order
#[must_use]
pub fn standard_suite() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec {
            name: "valid identity",
            label: "Testing with a valid user",
            email: EmailRule::Generate(EmailClass::Valid),
            password: PasswordRule::Shared,
            narrate: Narrate::EmailAndPassword,
            expectation: Expectation::RegistrationSuccess,
        },
        ScenarioSpec {
            name: "known duplicate",
            label: "Testing with an already registered email",
            email: EmailRule::Literal(DUPLICATE_EMAIL),
            password: PasswordRule::Shared,
            narrate: Narrate::Email,
            expectation: Expectation::DuplicateUser,
        },
        ScenarioSpec {
            name: "malformed email",
            label: "Testing with an invalid email",
            email: EmailRule::Generate(EmailClass::Malformed),
            password: PasswordRule::Shared,
            narrate: Narrate::Email,
            expectation: Expectation::EmailError,
        },
        ScenarioSpec {
            name: "malformed email literal",
            label: "Testing with an invalid email (special characters)",
            email: EmailRule::Literal(MALFORMED_EMAIL_LITERAL),
            password: PasswordRule::Shared,
            narrate: Narrate::Email,
            expectation: Expectation::EmailError,
        },
        ScenarioSpec {
            name: "weak password",
            label: "Testing with an invalid password",
            email: EmailRule::Generate(EmailClass::Valid),
            password: PasswordRule::Generate(PasswordClass::Weak),
            narrate: Narrate::Password,
            expectation: Expectation::PasswordError,
        },
    ]
}

async fn drive(
    driver: &mut dyn SignupDriver,
    page: &SignupPage,
    config: &ProbeConfig,
    identity: &Identity,
) -> ProbeResult<Verdict> {
    page.open(driver, config).await?;
    page.fill(driver, identity).await?;
    page.submit(driver).await?;
    OutcomeClassifier::new(page, config).classify(driver).await
}

/// Run one identity through the signup form in a fresh session.
///
/// Never fails: launch and driver errors become `Verdict::DriverError`. A
/// session that was launched is closed exactly once on every path.
pub async fn run_scenario(
    launcher: &dyn SessionLauncher,
    page: &SignupPage,
    config: &ProbeConfig,
    identity: &Identity,
) -> Verdict {
    let mut driver = match launcher.launch(config).await {
        Ok(driver) => driver,
        Err(e) => {
            tracing::warn!(error = %e, "session launch failed");
            return Verdict::DriverError(e.to_string());
        }
    };

    let outcome = drive(&mut *driver, page, config, identity).await;

    if let Err(e) = driver.close().await {
        tracing::warn!(error = %e, "session close failed");
    }

    match outcome {
        Ok(verdict) => verdict,
        Err(e) => {
            tracing::debug!(error = %e, "scenario aborted");
            Verdict::DriverError(e.to_string())
        }
    }
}
