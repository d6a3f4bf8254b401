//! Local validity checks for generated identities.
//!
//! These checks only produce diagnostics before a form is submitted. The live
//! site decides the verdict; nothing here gates execution.

use crate::result::{ProbeError, ProbeResult};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// Email format rule
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9.-]+$";

/// Symbols a strong password must draw from
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Minimum length of a strong password
pub const MIN_PASSWORD_LEN: usize = 14;

/// Emails treated as already registered on the target site
pub const KNOWN_REGISTERED_EMAILS: [&str; 2] = ["testuser@example.com", "user1@example.com"];

/// Diagnostic raised for an email before submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailDiagnostic {
    /// Email fails the local format rule
    Malformed(String),
    /// Email is in the known-registered set
    AlreadyRegistered(String),
}

impl fmt::Display for EmailDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(email) => write!(f, "Error: the email {email} is not valid."),
            Self::AlreadyRegistered(email) => {
                write!(f, "Error: the email {email} is already registered.")
            }
        }
    }
}

/// Diagnostic raised for a password before submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordDiagnostic {
    /// Password fails the strength policy
    Weak(String),
}

impl fmt::Display for PasswordDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak(password) => write!(
                f,
                "Error: the password {password} does not meet the strength policy."
            ),
        }
    }
}

/// Immutable validity oracle, built once per run
#[derive(Debug, Clone)]
pub struct Oracle {
    email_rule: Regex,
    known_registered: HashSet<String>,
}

impl Oracle {
    /// Build the oracle with the standard rule set and known-registered emails
    pub fn new() -> ProbeResult<Self> {
        Self::with_known_registered(KNOWN_REGISTERED_EMAILS)
    }

    /// Build the oracle with a custom known-registered set
    pub fn with_known_registered<I, S>(emails: I) -> ProbeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let email_rule = Regex::new(EMAIL_PATTERN)
            .map_err(|e| ProbeError::config(format!("email rule: {e}")))?;
        Ok(Self {
            email_rule,
            known_registered: emails.into_iter().map(Into::into).collect(),
        })
    }

    /// Check an email against the local format rule
    #[must_use]
    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email_rule.is_match(email)
    }

    /// Whether the email is in the known-registered set
    #[must_use]
    pub fn is_known_registered(&self, email: &str) -> bool {
        self.known_registered.contains(email)
    }

    /// Diagnostic for an email, if any. Format failures take precedence.
    #[must_use]
    pub fn diagnose_email(&self, email: &str) -> Option<EmailDiagnostic> {
        if !self.is_valid_email(email) {
            Some(EmailDiagnostic::Malformed(email.to_string()))
        } else if self.is_known_registered(email) {
            Some(EmailDiagnostic::AlreadyRegistered(email.to_string()))
        } else {
            None
        }
    }

    /// Diagnostic for a password, if it fails the strength policy
    #[must_use]
    pub fn diagnose_password(&self, password: &str) -> Option<PasswordDiagnostic> {
        if is_strong_password(password) {
            None
        } else {
            Some(PasswordDiagnostic::Weak(password.to_string()))
        }
    }
}

/// Check a password against the strength policy
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}
