//! # Fibonacci Backoff
//!
//! Retry delays for failed reconciles. Delays grow along the Fibonacci
//! sequence (1, 1, 2, 3, 5, 8 ... times the base step) up to a cap, which
//! backs off more gently than doubling.
//!
//! `RetryBackoff` keeps one sequence per object so a failing object does not
//! slow down the retries of the others. A successful reconcile resets it.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Fibonacci backoff calculator
#[derive(Debug, Clone)]
pub struct FibonacciBackoff {
    step: Duration,
    max: Duration,
    prev_steps: u32,
    current_steps: u32,
}

impl FibonacciBackoff {
    /// Sequence of `step`, `step`, `2*step`, `3*step`, ... capped at `max`.
    #[must_use]
    pub fn new(step: Duration, max: Duration) -> Self {
        Self {
            step,
            max,
            prev_steps: 0,
            current_steps: 1,
        }
    }

    /// Next delay; advances the sequence
    pub fn next_backoff(&mut self) -> Duration {
        let delay = self.step.saturating_mul(self.current_steps).min(self.max);

        // Stop growing once the cap is reached
        if delay < self.max {
            let next = self.prev_steps.saturating_add(self.current_steps);
            self.prev_steps = self.current_steps;
            self.current_steps = next;
        }
        delay
    }

    /// Back to the first delay
    pub fn reset(&mut self) {
        self.prev_steps = 0;
        self.current_steps = 1;
    }
}

/// Per-object retry delays
#[derive(Debug)]
pub struct RetryBackoff {
    step: Duration,
    max: Duration,
    states: Mutex<HashMap<String, FibonacciBackoff>>,
}

impl Default for RetryBackoff {
    /// 15s, 15s, 30s, 45s, 75s ... up to 10 minutes
    fn default() -> Self {
        Self::new(Duration::from_secs(15), Duration::from_secs(600))
    }
}

impl RetryBackoff {
    pub fn new(step: Duration, max: Duration) -> Self {
        Self {
            step,
            max,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Delay before retrying `key` after another failure
    pub fn next_delay(&self, key: &str) -> Duration {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        states
            .entry(key.to_string())
            .or_insert_with(|| FibonacciBackoff::new(self.step, self.max))
            .next_backoff()
    }

    /// Forget the failures of `key` (on successful reconciliation)
    pub fn reset(&self, key: &str) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_fibonacci_backoff_sequence() {
        let mut backoff = FibonacciBackoff::new(secs(60), secs(600));

        // 1m, 1m, 2m, 3m, 5m, 8m, 10m (max)
        let delays: Vec<u64> = (0..7).map(|_| backoff.next_backoff().as_secs()).collect();
        assert_eq!(delays, vec![60, 60, 120, 180, 300, 480, 600]);
        assert_eq!(backoff.next_backoff(), secs(600));
        assert_eq!(backoff.next_backoff(), secs(600));
    }

    #[test]
    fn test_fibonacci_backoff_reset() {
        let mut backoff = FibonacciBackoff::new(secs(60), secs(600));
        for _ in 0..4 {
            backoff.next_backoff();
        }

        backoff.reset();
        assert_eq!(backoff.next_backoff(), secs(60));
        assert_eq!(backoff.next_backoff(), secs(60));
        assert_eq!(backoff.next_backoff(), secs(120));
    }

    #[test]
    fn test_retry_backoff_is_per_object() {
        let retries = RetryBackoff::default();

        assert_eq!(retries.next_delay("default/a"), secs(15));
        assert_eq!(retries.next_delay("default/a"), secs(15));
        assert_eq!(retries.next_delay("default/a"), secs(30));
        assert_eq!(retries.next_delay("default/b"), secs(15));

        retries.reset("default/a");
        assert_eq!(retries.next_delay("default/a"), secs(15));
        assert_eq!(retries.next_delay("default/b"), secs(15));
    }
}
