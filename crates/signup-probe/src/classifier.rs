//! Outcome classification.
//!
//! After the form is submitted the page is inspected in a fixed order:
//!
//! 1. inline email error, then inline password error (either short-circuits)
//! 2. the toast notification, bounded by the notification timeout
//! 3. on a success toast, the user menu's "Sign Out" entry, bounded by the
//!    sign-out timeout
//!
//! Absence at any step is a normal result. Only driver faults surface as
//! errors, and the scenario layer turns those into `Verdict::DriverError`.

use crate::config::ProbeConfig;
use crate::driver::SignupDriver;
use crate::report;
use crate::result::{ProbeError, ProbeResult};
use crate::signup_page::SignupPage;
use crate::wait::WaitOptions;
use std::fmt;

/// Toast text reported when the email is taken
pub const DUPLICATE_EMAIL_TEXT: &str = "Email is already in use";

/// Toast text (lowercase) reported on successful registration
pub const SUCCESS_TEXT: &str = "successfully";

/// Outcome of one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Inline error shown under the email field
    EmailErrorShown(String),
    /// Inline error shown under the password field
    PasswordErrorShown(String),
    /// Toast reported the email as already in use
    DuplicateUserError,
    /// Toast reported success; follow-up check not yet run
    RegistrationSuccess,
    /// Success toast and the user menu offers "Sign Out"
    RegistrationSuccessAndSignedIn,
    /// Success toast but no "Sign Out" entry appeared
    RegistrationSuccessButNotSignedIn,
    /// Toast text matched no known pattern
    UnexpectedNotification(String),
    /// No toast appeared before the timeout
    NoNotificationFound,
    /// Session setup, navigation or interaction failed
    DriverError(String),
}

impl Verdict {
    /// Short machine-style name of the verdict category
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::EmailErrorShown(_) => "email-error-shown",
            Self::PasswordErrorShown(_) => "password-error-shown",
            Self::DuplicateUserError => "duplicate-user-error",
            Self::RegistrationSuccess => "registration-success",
            Self::RegistrationSuccessAndSignedIn => "registration-success-and-signed-in",
            Self::RegistrationSuccessButNotSignedIn => "registration-success-but-not-signed-in",
            Self::UnexpectedNotification(_) => "unexpected-notification",
            Self::NoNotificationFound => "no-notification-found",
            Self::DriverError(_) => "driver-error",
        }
    }

    /// Whether the console reports this verdict as a passed check
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(
            self,
            Self::EmailErrorShown(_)
                | Self::PasswordErrorShown(_)
                | Self::DuplicateUserError
                | Self::RegistrationSuccess
                | Self::RegistrationSuccessAndSignedIn
        )
    }

    /// Any of the registration-success verdicts
    #[must_use]
    pub const fn is_registration_success(&self) -> bool {
        matches!(
            self,
            Self::RegistrationSuccess
                | Self::RegistrationSuccessAndSignedIn
                | Self::RegistrationSuccessButNotSignedIn
        )
    }

    /// Human-readable description
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::EmailErrorShown(text) => format!("email field error: {text}"),
            Self::PasswordErrorShown(text) => format!("password field error: {text}"),
            Self::DuplicateUserError => {
                "error notification found; the user already exists.".to_string()
            }
            Self::RegistrationSuccess => "registration successful.".to_string(),
            Self::RegistrationSuccessAndSignedIn => {
                "Sign Out present, confirming a successful sign-in.".to_string()
            }
            Self::RegistrationSuccessButNotSignedIn => {
                "Sign Out not found after registration.".to_string()
            }
            Self::UnexpectedNotification(text) => format!("unexpected notification: {text}"),
            Self::NoNotificationFound => "no success or error notification found.".to_string(),
            Self::DriverError(message) => format!("error running the signup scenario: {message}"),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category())
    }
}

/// Known toast notification kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Email already registered
    DuplicateUser,
    /// Account created
    Success,
}

/// Classify raw toast text
///
/// # Errors
///
/// Returns `UnexpectedNotificationText` when no known pattern matches.
pub fn classify_notification(text: &str) -> ProbeResult<NotificationKind> {
    if text.contains(DUPLICATE_EMAIL_TEXT) {
        Ok(NotificationKind::DuplicateUser)
    } else if text.to_lowercase().contains(SUCCESS_TEXT) {
        Ok(NotificationKind::Success)
    } else {
        Err(ProbeError::UnexpectedNotificationText {
            text: text.to_string(),
        })
    }
}

/// Inspects the page after submission
#[derive(Debug, Clone)]
pub struct OutcomeClassifier<'a> {
    page: &'a SignupPage,
    config: &'a ProbeConfig,
}

impl<'a> OutcomeClassifier<'a> {
    /// Create a classifier for one page layout and configuration
    #[must_use]
    pub const fn new(page: &'a SignupPage, config: &'a ProbeConfig) -> Self {
        Self { page, config }
    }

    /// Derive the verdict from the current page state
    pub async fn classify(&self, driver: &mut dyn SignupDriver) -> ProbeResult<Verdict> {
        if let Some(el) = driver.query_selector(&self.page.email_error).await? {
            return Ok(Verdict::EmailErrorShown(el.text().trim().to_string()));
        }
        if let Some(el) = driver.query_selector(&self.page.password_error).await? {
            return Ok(Verdict::PasswordErrorShown(el.text().trim().to_string()));
        }

        let toast = match driver
            .wait_for_selector(
                &self.page.notification,
                WaitOptions::notification(self.config),
            )
            .await
        {
            Ok(el) => el,
            Err(e) if e.is_timeout() => return Ok(Verdict::NoNotificationFound),
            Err(e) => return Err(e),
        };

        match classify_notification(toast.text()) {
            Ok(NotificationKind::DuplicateUser) => Ok(Verdict::DuplicateUserError),
            Ok(NotificationKind::Success) => {
                report::line(&report::verdict_line(&Verdict::RegistrationSuccess));
                if self.is_signed_in(driver).await {
                    Ok(Verdict::RegistrationSuccessAndSignedIn)
                } else {
                    Ok(Verdict::RegistrationSuccessButNotSignedIn)
                }
            }
            Err(ProbeError::UnexpectedNotificationText { text }) => {
                tracing::warn!(%text, "notification matched no known pattern");
                Ok(Verdict::UnexpectedNotification(text))
            }
            Err(e) => Err(e),
        }
    }

    /// Open the user menu and look for "Sign Out". Any failure reads as `false`.
    pub async fn is_signed_in(&self, driver: &mut dyn SignupDriver) -> bool {
        match self.open_user_menu(driver).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "sign-out entry not confirmed");
                false
            }
        }
    }

    async fn open_user_menu(&self, driver: &mut dyn SignupDriver) -> ProbeResult<()> {
        driver
            .wait_for_selector(&self.page.user_nav, WaitOptions::element(self.config))
            .await?;
        driver.click(&self.page.user_nav).await?;
        driver
            .wait_for_selector(&self.page.sign_out, WaitOptions::sign_out(self.config))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use std::time::Duration;

    fn fast_config() -> ProbeConfig {
        ProbeConfig::default()
            .with_element_timeout(Duration::from_millis(20))
            .with_notification_timeout(Duration::from_millis(20))
            .with_sign_out_timeout(Duration::from_millis(20))
            .with_poll_interval(Duration::from_millis(2))
    }

    mod notification_text_tests {
        use super::*;

        #[test]
        fn test_duplicate() {
            assert_eq!(
                classify_notification("Error: Email is already in use by another account.")
                    .unwrap(),
                NotificationKind::DuplicateUser
            );
        }

        #[test]
        fn test_success_is_case_insensitive() {
            assert_eq!(
                classify_notification("Account Created SUCCESSFULLY").unwrap(),
                NotificationKind::Success
            );
        }

        #[test]
        fn test_duplicate_checked_first() {
            assert_eq!(
                classify_notification("Email is already in use, not successfully created")
                    .unwrap(),
                NotificationKind::DuplicateUser
            );
        }

        #[test]
        fn test_unexpected() {
            let err = classify_notification("Too many requests").unwrap_err();
            match err {
                ProbeError::UnexpectedNotificationText { text } => {
                    assert_eq!(text, "Too many requests");
                }
                other => panic!("unexpected error {other:?}"),
            }
        }

        #[test]
        fn test_duplicate_match_is_case_sensitive() {
            assert!(classify_notification("email is already in use").is_err());
        }
    }

    mod verdict_tests {
        use super::*;

        #[test]
        fn test_categories() {
            assert_eq!(Verdict::DuplicateUserError.category(), "duplicate-user-error");
            assert_eq!(
                Verdict::DriverError("x".into()).to_string(),
                "driver-error"
            );
            assert_eq!(
                Verdict::RegistrationSuccessButNotSignedIn.category(),
                "registration-success-but-not-signed-in"
            );
        }

        #[test]
        fn test_passed_flags() {
            assert!(Verdict::EmailErrorShown("bad".into()).is_passed());
            assert!(Verdict::RegistrationSuccessAndSignedIn.is_passed());
            assert!(!Verdict::RegistrationSuccessButNotSignedIn.is_passed());
            assert!(!Verdict::UnexpectedNotification("x".into()).is_passed());
            assert!(!Verdict::NoNotificationFound.is_passed());
            assert!(!Verdict::DriverError("x".into()).is_passed());
        }

        #[test]
        fn test_registration_success_family() {
            assert!(Verdict::RegistrationSuccess.is_registration_success());
            assert!(Verdict::RegistrationSuccessButNotSignedIn.is_registration_success());
            assert!(!Verdict::DuplicateUserError.is_registration_success());
        }
    }

    mod classify_tests {
        use super::*;

        #[tokio::test]
        async fn test_email_error_short_circuits() {
            let page = SignupPage::new();
            let config = fast_config();
            let mut driver = MockDriver::new()
                .with_element(page.email_error.clone(), "  Email is invalid. ")
                .with_element(page.password_error.clone(), "Password is weak")
                .with_element(page.notification.clone(), "Account created successfully");
            let verdict = OutcomeClassifier::new(&page, &config)
                .classify(&mut driver)
                .await
                .unwrap();
            assert_eq!(verdict, Verdict::EmailErrorShown("Email is invalid.".into()));
        }

        #[tokio::test]
        async fn test_password_error() {
            let page = SignupPage::new();
            let config = fast_config();
            let mut driver = MockDriver::new()
                .with_element(page.password_error.clone(), "Password should be strong");
            let verdict = OutcomeClassifier::new(&page, &config)
                .classify(&mut driver)
                .await
                .unwrap();
            assert!(matches!(verdict, Verdict::PasswordErrorShown(_)));
        }

        #[tokio::test]
        async fn test_no_notification() {
            let page = SignupPage::new();
            let config = fast_config();
            let mut driver = MockDriver::new();
            let verdict = OutcomeClassifier::new(&page, &config)
                .classify(&mut driver)
                .await
                .unwrap();
            assert_eq!(verdict, Verdict::NoNotificationFound);
        }

        #[tokio::test]
        async fn test_success_and_signed_in() {
            let page = SignupPage::new();
            let config = fast_config();
            let mut driver = MockDriver::new()
                .with_element(page.notification.clone(), "Account created successfully")
                .with_element(page.user_nav.clone(), "Ada")
                .reveal_on_click(page.user_nav.clone(), page.sign_out.clone(), "Sign Out");
            let verdict = OutcomeClassifier::new(&page, &config)
                .classify(&mut driver)
                .await
                .unwrap();
            assert_eq!(verdict, Verdict::RegistrationSuccessAndSignedIn);
        }

        #[tokio::test]
        async fn test_success_without_user_menu() {
            let page = SignupPage::new();
            let config = fast_config();
            let mut driver = MockDriver::new()
                .with_element(page.notification.clone(), "Successfully signed up");
            let verdict = OutcomeClassifier::new(&page, &config)
                .classify(&mut driver)
                .await
                .unwrap();
            assert_eq!(verdict, Verdict::RegistrationSuccessButNotSignedIn);
        }

        #[tokio::test]
        async fn test_sign_out_fault_is_negative_not_error() {
            let page = SignupPage::new();
            let config = fast_config();
            let mut driver = MockDriver::new()
                .with_element(page.notification.clone(), "Successfully signed up")
                .with_element(page.user_nav.clone(), "Ada")
                .fail_on(page.user_nav.clone());
            let verdict = OutcomeClassifier::new(&page, &config)
                .classify(&mut driver)
                .await
                .unwrap();
            assert_eq!(verdict, Verdict::RegistrationSuccessButNotSignedIn);
        }

        #[tokio::test]
        async fn test_unexpected_notification() {
            let page = SignupPage::new();
            let config = fast_config();
            let mut driver =
                MockDriver::new().with_element(page.notification.clone(), "Server on fire");
            let verdict = OutcomeClassifier::new(&page, &config)
                .classify(&mut driver)
                .await
                .unwrap();
            assert_eq!(
                verdict,
                Verdict::UnexpectedNotification("Server on fire".into())
            );
        }

        #[tokio::test]
        async fn test_driver_fault_propagates() {
            let page = SignupPage::new();
            let config = fast_config();
            let mut driver = MockDriver::new().fail_on(page.notification.clone());
            let result = OutcomeClassifier::new(&page, &config)
                .classify(&mut driver)
                .await;
            assert!(matches!(result, Err(ProbeError::DriverFault { .. })));
        }
    }
}
