//! Probe configuration.
//!
//! All values are fixed at build time; `Default` carries the literals used
//! against the live signup form. The builder methods exist for tests.

use std::time::Duration;

/// Site under test
pub const DEFAULT_BASE_URL: &str = "https://salinaka-ecommerce.web.app/";

/// Bound on element waits that gate the form flow (10 seconds)
pub const DEFAULT_ELEMENT_TIMEOUT_MS: u64 = 10_000;

/// Bound on the toast notification wait (10 seconds)
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 10_000;

/// Bound on the "Sign Out" confirmation wait (5 seconds)
pub const DEFAULT_SIGN_OUT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval for selector waits (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Configuration shared by every scenario of a run
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Site to open at the start of each scenario
    pub base_url: String,
    /// Run the browser without a window
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Timeout for form-critical element waits
    pub element_timeout: Duration,
    /// Timeout for the toast notification
    pub notification_timeout: Duration,
    /// Timeout for the signed-in confirmation
    pub sign_out_timeout: Duration,
    /// Polling interval for selector waits
    pub poll_interval: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            chromium_path: None,
            sandbox: true,
            viewport_width: 1280,
            viewport_height: 800,
            element_timeout: Duration::from_millis(DEFAULT_ELEMENT_TIMEOUT_MS),
            notification_timeout: Duration::from_millis(DEFAULT_NOTIFICATION_TIMEOUT_MS),
            sign_out_timeout: Duration::from_millis(DEFAULT_SIGN_OUT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl ProbeConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the site under test
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set element wait timeout
    #[must_use]
    pub const fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }

    /// Set notification wait timeout
    #[must_use]
    pub const fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout = timeout;
        self
    }

    /// Set sign-out confirmation timeout
    #[must_use]
    pub const fn with_sign_out_timeout(mut self, timeout: Duration) -> Self {
        self.sign_out_timeout = timeout;
        self
    }

    /// Set polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
