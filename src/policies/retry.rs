//! # Retry policy for a single script chain.
//!
//! [`RetryPolicy`] is the transition guard of the retry state machine:
//!
//! ```text
//! Attempting(n) --success-----------------------------> Succeeded
//! Attempting(n) --failure & n < max---------------------> RetryScheduled(n+1) --delay--> Attempting(n+1)
//! Attempting(n) --failure & n >= max--------------------> FailedTerminal
//! ```
//!
//! `max_retries` counts retries **after** the first attempt: `max_retries = 2` means
//! at most three script elements (attempts 0, 1, 2) for one source address.

use std::time::Duration;

use crate::policies::backoff::BackoffPolicy;

/// Outcome of [`RetryPolicy::decide`] for a failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Inject attempt `next_attempt` after `delay`.
    Retry {
        /// Attempt number of the new element.
        next_attempt: u32,
        /// Delay before the new element is injected.
        delay: Duration,
    },
    /// No more retries; fail every waiter.
    Terminal,
}

/// Bounded retry policy.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay schedule between attempts.
    pub backoff: BackoffPolicy,
}

impl Default for RetryPolicy {
    /// Two retries, one second apart.
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: BackoffPolicy::default(),
        }
    }
}

impl RetryPolicy {
    /// Fixed number of retries with a constant delay.
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            backoff: BackoffPolicy::constant(delay),
        }
    }

    /// Decides what happens after attempt `attempt` failed.
    ///
    /// Callers must only ask once per attempt: the attempt's status is the one-shot
    /// "retry initiated" marker, so a failure signal for an attempt that is no longer
    /// pending never reaches this guard.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_retries {
            return RetryDecision::Terminal;
        }
        let next_attempt = attempt + 1;
        RetryDecision::Retry {
            next_attempt,
            delay: self.backoff.delay_for(next_attempt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retries_until_bound() {
        let policy = RetryPolicy::fixed(2, Duration::from_millis(10));
        assert_eq!(
            policy.decide(0),
            RetryDecision::Retry {
                next_attempt: 1,
                delay: Duration::from_millis(10)
            }
        );
        assert_eq!(
            policy.decide(1),
            RetryDecision::Retry {
                next_attempt: 2,
                delay: Duration::from_millis(10)
            }
        );
        assert_eq!(policy.decide(2), RetryDecision::Terminal);
    }

    #[test]
    fn default_allows_two_retries() {
        let policy = RetryPolicy::default();
        assert!(matches!(policy.decide(1), RetryDecision::Retry { next_attempt: 2, .. }));
        assert_eq!(policy.decide(2), RetryDecision::Terminal);
    }

    #[test]
    fn zero_retries_fails_first_attempt() {
        let policy = RetryPolicy::fixed(0, Duration::ZERO);
        assert_eq!(policy.decide(0), RetryDecision::Terminal);
    }

    #[test]
    fn delay_grows_with_backoff_factor() {
        let policy = RetryPolicy {
            max_retries: 3,
            backoff: BackoffPolicy {
                factor: 3.0,
                first: Duration::from_millis(100),
                ..BackoffPolicy::default()
            },
        };
        match policy.decide(1) {
            RetryDecision::Retry { next_attempt, delay } => {
                assert_eq!(next_attempt, 2);
                assert_eq!(delay, Duration::from_millis(300));
            }
            RetryDecision::Terminal => panic!("expected a retry"),
        }
    }
}
