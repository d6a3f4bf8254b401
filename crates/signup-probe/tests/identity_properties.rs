//! Property tests for identity generation.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use signup_probe::{
    is_strong_password, EmailClass, IdentityGenerator, Oracle, PasswordClass, Seed,
    MIN_PASSWORD_LEN, PASSWORD_SYMBOLS, VALID_EMAIL_DOMAIN,
};

fn generator(seed: u64) -> IdentityGenerator {
    IdentityGenerator::with_seed(Seed::from_u64(seed), Oracle::new().unwrap())
}

proptest! {
    #[test]
    fn valid_emails_pass_format_rule(seed in any::<u64>()) {
        let mut gen = generator(seed);
        let email = gen.email(EmailClass::Valid);
        prop_assert!(gen.oracle().is_valid_email(&email));
        let suffix = format!("@{VALID_EMAIL_DOMAIN}");
        prop_assert!(email.ends_with(&suffix));
    }

    #[test]
    fn malformed_emails_fail_format_rule(seed in any::<u64>()) {
        let mut gen = generator(seed);
        let email = gen.email(EmailClass::Malformed);
        prop_assert!(!gen.oracle().is_valid_email(&email));
    }

    #[test]
    fn strong_passwords_cover_every_class(seed in any::<u64>()) {
        let mut gen = generator(seed);
        let pw = gen.password(PasswordClass::Strong);
        prop_assert_eq!(pw.chars().count(), MIN_PASSWORD_LEN);
        prop_assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
        prop_assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
        prop_assert!(pw.chars().any(|c| c.is_ascii_digit()));
        prop_assert!(pw.chars().any(|c| PASSWORD_SYMBOLS.contains(c)));
        prop_assert!(is_strong_password(&pw));
    }

    #[test]
    fn weak_passwords_are_lowercase_only(seed in any::<u64>()) {
        let mut gen = generator(seed);
        let pw = gen.password(PasswordClass::Weak);
        prop_assert_eq!(pw.chars().count(), MIN_PASSWORD_LEN);
        prop_assert!(pw.chars().all(|c| c.is_ascii_lowercase()));
        prop_assert!(!is_strong_password(&pw));
    }

    #[test]
    fn repeated_calls_keep_class(seed in any::<u64>(), n in 2usize..8) {
        let mut gen = generator(seed);
        for _ in 0..n {
            let valid = gen.email(EmailClass::Valid);
            let malformed = gen.email(EmailClass::Malformed);
            prop_assert!(gen.oracle().is_valid_email(&valid));
            prop_assert!(!gen.oracle().is_valid_email(&malformed));
            prop_assert!(is_strong_password(&gen.password(PasswordClass::Strong)));
        }
    }
}
