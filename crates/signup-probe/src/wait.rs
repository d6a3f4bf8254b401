//! Bounded polling waits.
//!
//! Every wait in a scenario polls a probe until it yields a value or the
//! deadline passes. Expiry is reported as `ProbeError::Timeout`; callers decide
//! whether that is a failure or a normal negative result.

use crate::config::ProbeConfig;
use crate::result::{ProbeError, ProbeResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Upper bound on the wait
    pub timeout: Duration,
    /// Delay between probes
    pub poll_interval: Duration,
}

impl WaitOptions {
    /// Create wait options
    #[must_use]
    pub const fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Options for form-critical element waits
    #[must_use]
    pub const fn element(config: &ProbeConfig) -> Self {
        Self::new(config.element_timeout, config.poll_interval)
    }

    /// Options for the toast notification wait
    #[must_use]
    pub const fn notification(config: &ProbeConfig) -> Self {
        Self::new(config.notification_timeout, config.poll_interval)
    }

    /// Options for the signed-in confirmation wait
    #[must_use]
    pub const fn sign_out(config: &ProbeConfig) -> Self {
        Self::new(config.sign_out_timeout, config.poll_interval)
    }

    /// Timeout in whole milliseconds
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Poll `probe` until it yields `Some`, an error, or the timeout elapses.
///
/// The probe always runs at least once, even with a zero timeout.
pub async fn poll_until<T, F, Fut>(options: WaitOptions, mut probe: F) -> ProbeResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProbeResult<Option<T>>>,
{
    let deadline = Instant::now() + options.timeout;
    loop {
        if let Some(value) = probe().await? {
            return Ok(value);
        }
        if Instant::now() >= deadline {
            return Err(ProbeError::Timeout {
                ms: options.timeout_ms(),
            });
        }
        tokio::time::sleep(options.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> WaitOptions {
        WaitOptions::new(Duration::from_millis(30), Duration::from_millis(5))
    }

    #[test]
    fn test_options_from_config() {
        let config = ProbeConfig::default();
        assert_eq!(WaitOptions::notification(&config).timeout_ms(), 10_000);
        assert_eq!(WaitOptions::sign_out(&config).timeout_ms(), 5_000);
        assert_eq!(WaitOptions::element(&config).timeout_ms(), 10_000);
    }

    #[tokio::test]
    async fn test_poll_returns_first_value() {
        let mut calls = 0;
        let value = poll_until(fast(), || {
            calls += 1;
            let ready = calls >= 3;
            async move { Ok(ready.then_some("found")) }
        })
        .await
        .unwrap();
        assert_eq!(value, "found");
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_poll_times_out() {
        let err = poll_until(fast(), || async { Ok::<Option<()>, _>(None) })
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::Timeout { ms: 30 }));
    }

    #[tokio::test]
    async fn test_poll_propagates_errors() {
        let err = poll_until(fast(), || async {
            Err::<Option<()>, _>(ProbeError::driver_fault("gone"))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ProbeError::DriverFault { .. }));
    }

    #[tokio::test]
    async fn test_zero_timeout_probes_once() {
        let mut calls = 0;
        let options = WaitOptions::new(Duration::ZERO, Duration::from_millis(1));
        let result = poll_until(options, || {
            calls += 1;
            async { Ok::<Option<()>, _>(None) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
