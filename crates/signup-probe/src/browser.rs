//! Chromium session control over CDP.
//!
//! Compiled with the `browser` feature. Each `ChromiumLauncher::launch` starts
//! a fresh Chromium process with one page, so scenarios never share cookies,
//! storage or login state.

use crate::config::ProbeConfig;
use crate::driver::{ElementHandle, SessionLauncher, SignupDriver};
use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use tokio::sync::Mutex;

fn fault(e: impl std::fmt::Display) -> ProbeError {
    ProbeError::driver_fault(e.to_string())
}

/// Launches one Chromium process per session
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromiumLauncher;

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    async fn launch(&self, config: &ProbeConfig) -> ProbeResult<Box<dyn SignupDriver>> {
        Ok(Box::new(ChromiumDriver::launch(config).await?))
    }
}

/// Browser session with a real CDP connection
#[derive(Debug)]
pub struct ChromiumDriver {
    browser: Mutex<CdpBrowser>,
    page: Mutex<CdpPage>,
    handle: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch a new browser instance with one blank page
    ///
    /// # Errors
    ///
    /// Returns error if browser cannot be launched
    pub async fn launch(config: &ProbeConfig) -> ProbeResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|message| ProbeError::BrowserLaunch { message })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| ProbeError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        // The CDP event loop must be driven for any command to complete
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handle.abort();
                return Err(ProbeError::BrowserLaunch {
                    message: e.to_string(),
                });
            }
        };

        tracing::debug!(headless = config.headless, "chromium session launched");
        Ok(Self {
            browser: Mutex::new(browser),
            page: Mutex::new(page),
            handle,
        })
    }

    async fn find_css(&self, selector: &Selector) -> ProbeResult<chromiumoxide::Element> {
        match selector {
            Selector::Css(css) => self
                .page
                .lock()
                .await
                .find_element(css.as_str())
                .await
                .map_err(fault),
            Selector::XPath(_) => Err(ProbeError::driver_fault(format!(
                "{selector} cannot receive keyboard input"
            ))),
        }
    }
}

#[async_trait]
impl SignupDriver for ChromiumDriver {
    async fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        self.page
            .lock()
            .await
            .goto(url)
            .await
            .map_err(|e| ProbeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn query_selector(&self, selector: &Selector) -> ProbeResult<Option<ElementHandle>> {
        // Stringified so that a missing element comes back as the text "null"
        let expr = format!("JSON.stringify({})", selector.to_text_query());
        let raw: String = self
            .page
            .lock()
            .await
            .evaluate(expr)
            .await
            .map_err(fault)?
            .into_value()
            .map_err(fault)?;
        let text: Option<String> = serde_json::from_str(&raw)?;
        Ok(text.map(|t| ElementHandle::new(selector.clone()).with_text(t)))
    }

    async fn click(&mut self, selector: &Selector) -> ProbeResult<()> {
        if self.query_selector(selector).await?.is_none() {
            return Err(ProbeError::element_not_found(selector.to_string()));
        }
        match selector {
            Selector::Css(_) => {
                self.find_css(selector).await?.click().await.map_err(fault)?;
            }
            Selector::XPath(_) => {
                let clicked: bool = self
                    .page
                    .lock()
                    .await
                    .evaluate(selector.to_click_query())
                    .await
                    .map_err(fault)?
                    .into_value()
                    .map_err(fault)?;
                if !clicked {
                    return Err(ProbeError::element_not_found(selector.to_string()));
                }
            }
        }
        Ok(())
    }

    async fn type_text(&mut self, selector: &Selector, text: &str) -> ProbeResult<()> {
        if self.query_selector(selector).await?.is_none() {
            return Err(ProbeError::element_not_found(selector.to_string()));
        }
        let element = self.find_css(selector).await?;
        element.click().await.map_err(fault)?;
        element.type_str(text).await.map_err(fault)?;
        Ok(())
    }

    async fn close(&mut self) -> ProbeResult<()> {
        let mut browser = self.browser.lock().await;
        let closed = browser.close().await.map_err(fault);
        if closed.is_ok() {
            let _ = browser.wait().await;
        }
        self.handle.abort();
        tracing::debug!("chromium session closed");
        closed.map(|_| ())
    }
}
