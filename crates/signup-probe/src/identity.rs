//! Synthetic identity generation.
//!
//! Produces the full name, email and password typed into the signup form.
//! Each class guarantees its predicate by construction:
//!
//! | Class                  | Guarantee                                          |
//! |------------------------|----------------------------------------------------|
//! | `EmailClass::Valid`     | `<8 alphanumerics>@example.com`, passes the rule   |
//! | `EmailClass::Malformed` | symbols in the domain, fails the rule              |
//! | `PasswordClass::Strong` | 14 chars, lower + upper + digit + symbol, shuffled |
//! | `PasswordClass::Weak`   | 14 × `a`                                           |
//!
//! # Example
//!
//! ```ignore
//! let mut gen = IdentityGenerator::with_seed(Seed::from_u64(7), Oracle::new()?);
//! let id = gen.identity(EmailClass::Valid, PasswordClass::Strong);
//! ```

use crate::oracle::{Oracle, MIN_PASSWORD_LEN, PASSWORD_SYMBOLS};
use crate::report;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Symbols embedded in malformed domains. Disjoint from `[A-Za-z0-9_.+-]`.
const MALFORMED_DOMAIN_SYMBOLS: &[u8] = b"!#$%&*=?^~";

/// Domain of every valid generated email
pub const VALID_EMAIL_DOMAIN: &str = "example.com";

/// Length of generated usernames
pub const USERNAME_LEN: usize = 8;

/// Character repeated to build a weak password
pub const WEAK_PASSWORD_CHAR: char = 'a';

/// Deterministic seed for reproducible identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Seed(u64);

impl Seed {
    /// Create a seed from a u64 value
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw seed value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Email validity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailClass {
    /// `username@example.com`
    Valid,
    /// Symbol characters embedded in the domain
    Malformed,
}

/// Password validity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordClass {
    /// Satisfies the strength policy
    Strong,
    /// Single repeated lowercase letter
    Weak,
}

/// Values typed into the signup form for one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Full name
    pub full_name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

impl Identity {
    /// Create an identity from explicit values
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Generator for synthetic identities
///
/// Diagnostics raised while generating are printed as they occur and kept
/// until drained with `take_diagnostics`.
#[derive(Debug)]
pub struct IdentityGenerator {
    rng: StdRng,
    oracle: Oracle,
    diagnostics: Vec<String>,
}

impl IdentityGenerator {
    /// Create a generator seeded from OS entropy
    #[must_use]
    pub fn new(oracle: Oracle) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            oracle,
            diagnostics: Vec::new(),
        }
    }

    /// Create a reproducible generator
    #[must_use]
    pub fn with_seed(seed: Seed, oracle: Oracle) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed.value()),
            oracle,
            diagnostics: Vec::new(),
        }
    }

    /// The oracle used for diagnostics
    #[must_use]
    pub const fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    /// Drain the diagnostics raised since the last call
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    fn emit(&mut self, diagnostic: impl fmt::Display) {
        let line = diagnostic.to_string();
        report::line(&line);
        self.diagnostics.push(line);
    }

    // Alphabets are non-empty constants.
    fn pick(&mut self, alphabet: &[u8]) -> char {
        alphabet
            .choose(&mut self.rng)
            .map_or(char::default(), |&b| char::from(b))
    }

    fn pick_n(&mut self, alphabet: &[u8], n: usize) -> String {
        (0..n).map(|_| self.pick(alphabet)).collect()
    }

    /// Generate a realistic full name
    pub fn full_name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }

    /// Generate an email of the requested class.
    ///
    /// Prints a diagnostic line when the result fails the format rule or
    /// collides with a known-registered address. Never fails.
    pub fn email(&mut self, class: EmailClass) -> String {
        let username = self.pick_n(ALPHANUMERIC, USERNAME_LEN);
        let domain = match class {
            EmailClass::Valid => VALID_EMAIL_DOMAIN.to_string(),
            EmailClass::Malformed => format!(
                "inva{}li{}.com",
                self.pick_n(ALPHANUMERIC, 3),
                self.pick_n(MALFORMED_DOMAIN_SYMBOLS, 2)
            ),
        };
        let email = format!("{username}@{domain}");
        tracing::trace!(%email, ?class, "generated email");
        self.inspect_email(&email);
        email
    }

    /// Print a diagnostic if `email` fails the format rule or is known registered
    pub fn inspect_email(&mut self, email: &str) {
        if let Some(diagnostic) = self.oracle.diagnose_email(email) {
            tracing::debug!(%email, "email raised a diagnostic");
            self.emit(diagnostic);
        }
    }

    /// Generate a password of the requested class.
    ///
    /// Prints a diagnostic line when the result fails the strength policy.
    pub fn password(&mut self, class: PasswordClass) -> String {
        let password = match class {
            PasswordClass::Strong => {
                let mut chars = vec![
                    self.pick(LOWERCASE),
                    self.pick(UPPERCASE),
                    self.pick(DIGITS),
                    self.pick(PASSWORD_SYMBOLS.as_bytes()),
                ];
                let all: Vec<u8> = [LOWERCASE, UPPERCASE, DIGITS, PASSWORD_SYMBOLS.as_bytes()]
                    .concat();
                while chars.len() < MIN_PASSWORD_LEN {
                    chars.push(self.pick(&all));
                }
                chars.shuffle(&mut self.rng);
                chars.into_iter().collect()
            }
            PasswordClass::Weak => WEAK_PASSWORD_CHAR.to_string().repeat(MIN_PASSWORD_LEN),
        };

        if let Some(diagnostic) = self.oracle.diagnose_password(&password) {
            tracing::debug!(?class, "generated password raised a diagnostic");
            self.emit(diagnostic);
        }
        password
    }

    /// Generate a complete identity
    pub fn identity(&mut self, email: EmailClass, password: PasswordClass) -> Identity {
        Identity {
            full_name: self.full_name(),
            email: self.email(email),
            password: self.password(password),
        }
    }
}
