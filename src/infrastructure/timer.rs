use crate::types::{MAX_RECONNECT_ATTEMPTS, RECONNECT_DELAY};
use std::time::Duration;

/// Reconnection budget with a fixed delay between attempts.
///
/// The budget counts attempts made since the last successful open and is
/// bounded by `max_attempts`. Once exhausted, [`next_delay`](Self::next_delay)
/// returns `None` and the caller must stop retrying.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    attempts: u32,
    max_attempts: u32,
    delay: Duration,
}

impl ReconnectPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: 0,
            max_attempts,
            delay,
        }
    }

    /// Consume one attempt and get the delay to wait before it
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.is_exhausted() {
            return None;
        }

        self.attempts += 1;
        Some(self.delay)
    }

    /// Reset the budget (called on every successful open)
    pub fn reset(&mut self) {
        self.attempts = 0;
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::new(
            MAX_RECONNECT_ATTEMPTS,
            Duration::from_millis(RECONNECT_DELAY),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_is_bounded() {
        let mut policy = ReconnectPolicy::new(3, Duration::from_millis(10));

        for _ in 0..3 {
            assert_eq!(policy.next_delay(), Some(Duration::from_millis(10)));
        }
        assert_eq!(policy.attempts(), 3);
        assert!(policy.is_exhausted());
        assert_eq!(policy.next_delay(), None);
        assert_eq!(policy.attempts(), 3, "exhausted budget must not keep counting");
    }

    #[test]
    fn test_reset_restores_full_budget() {
        let mut policy = ReconnectPolicy::default();
        while policy.next_delay().is_some() {}
        assert_eq!(policy.attempts(), MAX_RECONNECT_ATTEMPTS);

        policy.reset();
        assert_eq!(policy.attempts(), 0);
        assert_eq!(
            policy.next_delay(),
            Some(Duration::from_millis(RECONNECT_DELAY))
        );
    }

    #[test]
    fn test_zero_attempts_never_retries() {
        let mut policy = ReconnectPolicy::new(0, Duration::from_millis(10));
        assert_eq!(policy.next_delay(), None);
    }
}
