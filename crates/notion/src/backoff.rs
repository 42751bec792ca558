//! Retry pacing for a collection watcher whose polls keep failing.
//!
//! A [`PollBackoff`] counts consecutive failed polls. Each failure yields
//! the wait before the next poll, starting at [`BackoffConfig::first_retry`]
//! and multiplied by [`BackoffConfig::factor`] per further failure, capped
//! at [`BackoffConfig::max_retry`]. One successful poll resets it.

use std::time::Duration;

/// Retry pacing after failed polls.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Wait after the first failed poll.
    pub first_retry: Duration,
    /// Longest wait between two polls, however long the outage.
    pub max_retry: Duration,
    /// Growth per consecutive failure.
    pub factor: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            first_retry: Duration::from_secs(1),
            max_retry: Duration::from_secs(30),
            factor: 2,
        }
    }
}

/// Consecutive-failure state of one watcher.
#[derive(Debug)]
pub struct PollBackoff {
    config: BackoffConfig,
    failures: u32,
    next_wait: Duration,
}

impl PollBackoff {
    pub fn new(config: BackoffConfig) -> Self {
        let next_wait = config.first_retry.min(config.max_retry);
        Self {
            config,
            failures: 0,
            next_wait,
        }
    }

    /// Record a failed poll and return how long to wait before the next one.
    pub fn on_failure(&mut self) -> Duration {
        let wait = self.next_wait;
        self.failures = self.failures.saturating_add(1);
        self.next_wait = wait
            .checked_mul(self.config.factor)
            .unwrap_or(self.config.max_retry)
            .min(self.config.max_retry);
        wait
    }

    /// Record a successful poll.
    pub fn on_success(&mut self) {
        self.failures = 0;
        self.next_wait = self.config.first_retry.min(self.config.max_retry);
    }

    /// Failed polls since the last success.
    pub fn failures(&self) -> u32 {
        self.failures
    }
}
