// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Retry engine with doubling backoff for print submission.
//
// Every failed submission is retried until the policy's attempt budget is
// spent. Waits go through `Pause` so callers (and tests) control how time
// passes.

use std::time::Duration;

use spoolswitch_core::types::RetryPolicy;
use tracing::{debug, warn};

/// Result of evaluating whether to retry after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Try again after this delay.
    RetryAfter(Duration),
    /// Attempt budget spent.
    Exhausted,
}

/// Decide what happens after attempt number `attempt` (1-based) failed.
pub fn should_retry(attempt: u32, policy: &RetryPolicy) -> RetryDecision {
    if attempt >= policy.max_retries {
        warn!(attempt, max = policy.max_retries, "retry limit exhausted");
        RetryDecision::Exhausted
    } else {
        let delay = compute_delay(attempt, policy);
        debug!(attempt, delay_ms = delay.as_millis(), "scheduling retry");
        RetryDecision::RetryAfter(delay)
    }
}

/// Wait after failed attempt `attempt`:
///
/// delay = initial_wait * backoff_multiplier^(attempt - 1), saturating.
pub fn compute_delay(attempt: u32, policy: &RetryPolicy) -> Duration {
    let factor = policy
        .backoff_multiplier
        .saturating_pow(attempt.saturating_sub(1));
    policy.initial_wait.saturating_mul(factor)
}

/// Blocking wait, abstracted so tests can record instead of sleep.
pub trait Pause {
    fn pause(&self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<T: Pause + ?Sized> Pause for &T {
    fn pause(&self, duration: Duration) {
        (**self).pause(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_respects_max() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        assert_eq!(
            should_retry(1, &policy),
            RetryDecision::RetryAfter(Duration::from_secs(2))
        );
        assert_eq!(
            should_retry(2, &policy),
            RetryDecision::RetryAfter(Duration::from_secs(4))
        );
        assert_eq!(should_retry(3, &policy), RetryDecision::Exhausted);
    }

    #[test]
    fn single_attempt_never_retries() {
        let policy = RetryPolicy::new(1, Duration::from_secs(2));
        assert_eq!(should_retry(1, &policy), RetryDecision::Exhausted);
    }

    #[test]
    fn delay_doubles_with_attempts() {
        let policy = RetryPolicy::new(10, Duration::from_millis(250));
        let delays: Vec<_> = (1..=4).map(|n| compute_delay(n, &policy)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(250),
                Duration::from_millis(500),
                Duration::from_millis(1000),
                Duration::from_millis(2000),
            ]
        );
    }

    #[test]
    fn delay_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(u32::MAX, Duration::from_secs(u64::MAX / 2));
        assert_eq!(compute_delay(100, &policy), Duration::MAX);
    }

    #[test]
    fn zero_pause_returns_immediately() {
        ThreadPause.pause(Duration::ZERO);
    }
}
