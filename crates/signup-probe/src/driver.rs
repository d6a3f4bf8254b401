//! SignupDriver - Abstract Browser Session Trait
//!
//! The scenario flow talks to the browser only through `SignupDriver`, and
//! opens sessions only through `SessionLauncher`. `ChromiumDriver` (feature
//! `browser`) drives a real Chromium over CDP; `MockDriver` serves a scripted
//! DOM for tests.
//!
//! ```text
//! ┌────────────────┐  launch   ┌──────────────────────────────────┐
//! │ SessionLauncher│──────────►│ SignupDriver (one per scenario)  │
//! └────────────────┘           │  navigate / query / wait / click │
//!                              │  type_text / close               │
//!                              └──────────────┬───────────────────┘
//!                                  ┌──────────┴──────────┐
//!                            ChromiumDriver          MockDriver
//! ```

use crate::config::ProbeConfig;
use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{poll_until, WaitOptions};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

/// Handle to a located DOM element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    /// Selector the element was found by
    pub selector: Selector,
    /// Element text content
    pub text_content: Option<String>,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            text_content: None,
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Text content, or an empty string
    #[must_use]
    pub fn text(&self) -> &str {
        self.text_content.as_deref().unwrap_or_default()
    }
}

/// Browser session used by one scenario
#[async_trait]
pub trait SignupDriver: Send + Sync {
    /// Navigate to URL
    async fn navigate(&mut self, url: &str) -> ProbeResult<()>;

    /// Query DOM element by selector. Absence is `Ok(None)`.
    async fn query_selector(&self, selector: &Selector) -> ProbeResult<Option<ElementHandle>>;

    /// Click element
    async fn click(&mut self, selector: &Selector) -> ProbeResult<()>;

    /// Type text into element
    async fn type_text(&mut self, selector: &Selector, text: &str) -> ProbeResult<()>;

    /// Close the session
    async fn close(&mut self) -> ProbeResult<()>;

    /// Wait for selector to appear
    async fn wait_for_selector(
        &self,
        selector: &Selector,
        options: WaitOptions,
    ) -> ProbeResult<ElementHandle> {
        tracing::debug!(%selector, timeout_ms = options.timeout_ms(), "waiting for selector");
        poll_until(options, || self.query_selector(selector)).await
    }
}

/// Opens an isolated browser session per scenario
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    /// Launch a new session
    async fn launch(&self, config: &ProbeConfig) -> ProbeResult<Box<dyn SignupDriver>>;
}

/// Shared record of what a mock session did
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl SessionLog {
    fn record(&self, call: String) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// All recorded calls in order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Check if a call with this prefix was made
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }

    /// Number of times the session was closed
    #[must_use]
    pub fn close_count(&self) -> usize {
        self.calls().iter().filter(|c| *c == "close").count()
    }
}

/// Mock driver serving a scripted DOM
///
/// Elements are either present from the start or revealed when another
/// selector is clicked (e.g. a toast that appears after submit).
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Current URL
    pub current_url: String,
    elements: Vec<ElementHandle>,
    reveals: HashMap<Selector, Vec<ElementHandle>>,
    faults: HashSet<Selector>,
    navigation_fault: Option<String>,
    log: SessionLog,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element present from the start
    #[must_use]
    pub fn with_element(mut self, selector: Selector, text: impl Into<String>) -> Self {
        self.elements
            .push(ElementHandle::new(selector).with_text(text));
        self
    }

    /// Reveal an element once `trigger` is clicked
    #[must_use]
    pub fn reveal_on_click(
        mut self,
        trigger: Selector,
        selector: Selector,
        text: impl Into<String>,
    ) -> Self {
        self.reveals
            .entry(trigger)
            .or_default()
            .push(ElementHandle::new(selector).with_text(text));
        self
    }

    /// Make every operation on `selector` fail with a driver fault
    #[must_use]
    pub fn fail_on(mut self, selector: Selector) -> Self {
        self.faults.insert(selector);
        self
    }

    /// Make navigation fail
    #[must_use]
    pub fn fail_navigation(mut self, message: impl Into<String>) -> Self {
        self.navigation_fault = Some(message.into());
        self
    }

    /// Handle to this session's call log
    #[must_use]
    pub fn session_log(&self) -> SessionLog {
        self.log.clone()
    }

    fn check_fault(&self, selector: &Selector) -> ProbeResult<()> {
        if self.faults.contains(selector) {
            return Err(ProbeError::driver_fault(format!(
                "scripted fault on {selector}"
            )));
        }
        Ok(())
    }

    fn find(&self, selector: &Selector) -> Option<&ElementHandle> {
        self.elements.iter().find(|e| &e.selector == selector)
    }
}

#[async_trait]
impl SignupDriver for MockDriver {
    async fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        self.log.record(format!("navigate:{url}"));
        if let Some(message) = &self.navigation_fault {
            return Err(ProbeError::Navigation {
                url: url.to_string(),
                message: message.clone(),
            });
        }
        self.current_url = url.to_string();
        Ok(())
    }

    async fn query_selector(&self, selector: &Selector) -> ProbeResult<Option<ElementHandle>> {
        self.check_fault(selector)?;
        Ok(self.find(selector).cloned())
    }

    async fn click(&mut self, selector: &Selector) -> ProbeResult<()> {
        self.log.record(format!("click:{selector}"));
        self.check_fault(selector)?;
        if self.find(selector).is_none() {
            return Err(ProbeError::element_not_found(selector.to_string()));
        }
        if let Some(revealed) = self.reveals.remove(selector) {
            self.elements.extend(revealed);
        }
        Ok(())
    }

    async fn type_text(&mut self, selector: &Selector, text: &str) -> ProbeResult<()> {
        self.log.record(format!("type:{selector}:{text}"));
        self.check_fault(selector)?;
        if self.find(selector).is_none() {
            return Err(ProbeError::element_not_found(selector.to_string()));
        }
        Ok(())
    }

    async fn close(&mut self) -> ProbeResult<()> {
        self.log.record("close".to_string());
        Ok(())
    }
}

/// Launcher handing out prepared mock sessions in order
#[derive(Debug, Default)]
pub struct MockLauncher {
    sessions: Mutex<VecDeque<MockDriver>>,
}

impl MockLauncher {
    /// Create a launcher from prepared sessions
    #[must_use]
    pub fn new(sessions: impl IntoIterator<Item = MockDriver>) -> Self {
        Self {
            sessions: Mutex::new(sessions.into_iter().collect()),
        }
    }

    /// Sessions not yet launched
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl SessionLauncher for MockLauncher {
    async fn launch(&self, _config: &ProbeConfig) -> ProbeResult<Box<dyn SignupDriver>> {
        let next = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(driver) => Ok(Box::new(driver)),
            None => Err(ProbeError::BrowserLaunch {
                message: "no mock session left".to_string(),
            }),
        }
    }
}
