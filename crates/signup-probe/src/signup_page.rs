//! Page object for the signup form.
//!
//! Holds every selector the scenario flow touches and the steps that drive
//! the form. Inline field errors are located through the input's parent so
//! the error `span` is found whether it precedes or follows the input.

use crate::config::ProbeConfig;
use crate::driver::SignupDriver;
use crate::identity::Identity;
use crate::locator::Selector;
use crate::report;
use crate::result::ProbeResult;
use crate::wait::WaitOptions;

/// Form input names
pub const FULL_NAME_FIELD: &str = "fullname";
/// Email input name
pub const EMAIL_FIELD: &str = "email";
/// Password input name
pub const PASSWORD_FIELD: &str = "password";

/// Text that marks the signed-in user menu entry
pub const SIGN_OUT_TEXT: &str = "Sign Out";

/// Selector for a named form input
#[must_use]
pub fn input(name: &str) -> Selector {
    Selector::css(format!("input[name=\"{name}\"]"))
}

/// Selector for the inline error attached to a named input
#[must_use]
pub fn field_error(name: &str) -> Selector {
    Selector::xpath(format!(
        "//input[@name='{name}']/../span[contains(concat(' ', normalize-space(@class), ' '), ' label-error ')]"
    ))
}

/// Signup form selectors and actions
#[derive(Debug, Clone)]
pub struct SignupPage {
    /// Link that opens the signup route
    pub signup_link: Selector,
    /// Element whose presence marks the form as rendered
    pub form_ready: Selector,
    /// Full name input
    pub full_name_input: Selector,
    /// Email input
    pub email_input: Selector,
    /// Password input
    pub password_input: Selector,
    /// Submit control
    pub submit_button: Selector,
    /// Inline email error
    pub email_error: Selector,
    /// Inline password error
    pub password_error: Selector,
    /// Success or error toast
    pub notification: Selector,
    /// User navigation menu
    pub user_nav: Selector,
    /// "Sign Out" entry inside the user menu
    pub sign_out: Selector,
}

impl Default for SignupPage {
    fn default() -> Self {
        Self {
            signup_link: Selector::css("a[href=\"/signup\"]"),
            form_ready: Selector::css("#fullname"),
            full_name_input: input(FULL_NAME_FIELD),
            email_input: input(EMAIL_FIELD),
            password_input: input(PASSWORD_FIELD),
            submit_button: Selector::css(".auth-button"),
            email_error: field_error(EMAIL_FIELD),
            password_error: field_error(PASSWORD_FIELD),
            notification: Selector::css(".toast-error, .toast-success"),
            user_nav: Selector::css(".user-nav"),
            sign_out: Selector::xpath(format!("//h6[contains(text(), '{SIGN_OUT_TEXT}')]")),
        }
    }
}

impl SignupPage {
    /// Create the page object with the live site's selectors
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the site and follow the signup link until the form renders
    pub async fn open(
        &self,
        driver: &mut dyn SignupDriver,
        config: &ProbeConfig,
    ) -> ProbeResult<()> {
        driver.navigate(&config.base_url).await?;
        report::line("Site opened");

        let waits = WaitOptions::element(config);
        driver.wait_for_selector(&self.signup_link, waits).await?;
        driver.click(&self.signup_link).await?;
        report::line("Signup link found and clicked.");

        driver.wait_for_selector(&self.form_ready, waits).await?;
        Ok(())
    }

    /// Type the identity into the three form fields
    pub async fn fill(&self, driver: &mut dyn SignupDriver, identity: &Identity) -> ProbeResult<()> {
        driver
            .type_text(&self.full_name_input, &identity.full_name)
            .await?;
        driver.type_text(&self.email_input, &identity.email).await?;
        driver
            .type_text(&self.password_input, &identity.password)
            .await?;
        report::line("Signup fields filled");
        Ok(())
    }

    /// Submit the form
    pub async fn submit(&self, driver: &mut dyn SignupDriver) -> ProbeResult<()> {
        driver.click(&self.submit_button).await?;
        report::line("Form submitted");
        Ok(())
    }
}
