//! # Loader configuration.
//!
//! Provides [`LoaderConfig`] centralized settings for a [`Loader`](crate::Loader).
//!
//! The configuration is fixed for the lifetime of a loader: it is read once by
//! [`LoaderBuilder::build`](crate::LoaderBuilder::build) and turned into a
//! [`RetryPolicy`]. The mount point and subscribers are not part of the config;
//! they are passed to the builder.
//!
//! ## Sentinel values
//! - `max_retries = 0` → a failed first attempt is terminal
//! - `retry_delay = 0s` → retry on the next timer tick

use std::time::Duration;

use crate::policies::{BackoffPolicy, JitterPolicy, RetryPolicy};

/// Configuration for a loader instance.
///
/// ## Field semantics
/// - `max_retries`: retries after the first attempt (default 2)
/// - `retry_delay`: delay before the first retry (default 1s)
/// - `backoff_factor`: growth of the delay between later retries (default 1.0, constant)
/// - `max_retry_delay`: cap on any single delay (default 30s)
/// - `jitter`: randomization of each delay (default none)
#[derive(Clone, Debug)]
pub struct LoaderConfig {
    /// Number of retries after the first attempt.
    pub max_retries: u32,

    /// Delay before the first retry.
    pub retry_delay: Duration,

    /// Multiplicative growth factor between consecutive retry delays.
    pub backoff_factor: f64,

    /// Upper bound on a single retry delay.
    pub max_retry_delay: Duration,

    /// Jitter applied to each retry delay.
    pub jitter: JitterPolicy,
}

impl LoaderConfig {
    /// Sets the retry delay from fractional seconds.
    ///
    /// Negative or NaN values clamp to zero; values too large for a [`Duration`]
    /// (including infinity) clamp to [`Duration::MAX`].
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use lazyscript::LoaderConfig;
    ///
    /// let cfg = LoaderConfig::default().with_retry_delay_secs(0.25);
    /// assert_eq!(cfg.retry_delay, Duration::from_millis(250));
    /// ```
    #[must_use]
    pub fn with_retry_delay_secs(mut self, secs: f64) -> Self {
        self.retry_delay = if secs > 0.0 {
            Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        self
    }

    /// Sets the number of retries after the first attempt.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Builds the retry policy described by this configuration.
    #[inline]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            backoff: BackoffPolicy {
                first: self.retry_delay,
                max: self.max_retry_delay.max(self.retry_delay),
                factor: self.backoff_factor,
                jitter: self.jitter,
            },
        }
    }
}

impl Default for LoaderConfig {
    /// Default configuration:
    ///
    /// - `max_retries = 2`
    /// - `retry_delay = 1s`
    /// - `backoff_factor = 1.0`
    /// - `max_retry_delay = 30s`
    /// - `jitter = JitterPolicy::None`
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_secs(1),
            backoff_factor: 1.0,
            max_retry_delay: Duration::from_secs(30),
            jitter: JitterPolicy::None,
        }
    }
}
