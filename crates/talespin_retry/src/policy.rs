//! Retry policy configuration.

use serde::{Deserialize, Serialize};

/// Fallback question appended when generation gives up.
const DEFAULT_FALLBACK_QUESTION: &str =
    "I'm having trouble connecting. Please try again later.";

/// Backoff parameters for rate-limited generation calls.
///
/// Delays follow `base_delay_ms * 2^attempt` for attempts `0..max_retries`,
/// so the defaults produce the sequence 1s, 2s, 4s, 8s, 16s.
///
/// # Examples
///
/// ```
/// use talespin_retry::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.base_delay_ms(), 1000);
/// assert_eq!(*policy.max_retries(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct RetryPolicy {
    /// Delay before the first retry, in milliseconds (default 1000).
    #[serde(default = "default_base_delay_ms")]
    base_delay_ms: u64,

    /// Hard ceiling on retries after the initial attempt (default 5).
    #[serde(default = "default_max_retries")]
    max_retries: usize,

    /// Question emitted when retries are exhausted or the failure is
    /// terminal.
    #[serde(default = "default_fallback_question")]
    fallback_question: String,
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_retries() -> usize {
    5
}

fn default_fallback_question() -> String {
    DEFAULT_FALLBACK_QUESTION.to_string()
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay_ms: default_base_delay_ms(),
            max_retries: default_max_retries(),
            fallback_question: default_fallback_question(),
        }
    }
}

impl RetryPolicy {
    /// The backoff delay for a given zero-based attempt number.
    pub fn delay_for_attempt(&self, attempt: u32) -> std::time::Duration {
        std::time::Duration::from_millis(self.base_delay_ms * 2u64.pow(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_delays_double_from_one_second() {
        let policy = RetryPolicy::default();
        let delays: Vec<Duration> = (0..5).map(|n| policy.delay_for_attempt(n)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8),
                Duration::from_secs(16),
            ]
        );
    }

    #[test]
    fn partial_toml_keeps_fallback_default() {
        let policy: RetryPolicy = toml::from_str("max_retries = 2").unwrap();
        assert_eq!(*policy.max_retries(), 2);
        assert!(policy.fallback_question().contains("having trouble connecting"));
    }
}
