//! Retry policy with exponential backoff
//!
//! Store queries are not retried by default: a failed query degrades to "no
//! results" and the user retries the action. Enabling more attempts in the
//! `[store]` section switches on exponential backoff with jitter.
//!
//! # Example
//!
//! ```rust
//! use karia_core::retry::RetryConfig;
//! use std::time::Duration;
//!
//! let config = RetryConfig::with_attempts(3);
//! assert_eq!(config.max_attempts, 3);
//! assert_eq!(RetryConfig::no_retry().delay_for_attempt(1), Duration::ZERO);
//! ```

use std::time::Duration;

/// Retry configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add random jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::no_retry()
    }
}

impl RetryConfig {
    /// Create a config with no retries
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// Create a backoff config allowing `attempts` attempts in total
    #[must_use]
    pub fn with_attempts(attempts: u32) -> Self {
        if attempts <= 1 {
            return Self::no_retry();
        }

        Self {
            max_attempts: attempts,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Whether more than one attempt is allowed
    #[must_use]
    pub fn retries_enabled(&self) -> bool {
        self.max_attempts > 1
    }

    /// Calculate delay for a given attempt
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base_delay = self.initial_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        let delay_secs = base_delay.min(self.max_delay.as_secs_f64());

        let final_delay = if self.jitter {
            // Add up to 25% jitter
            let jitter_factor = 1.0 + (rand_simple() * 0.25);
            delay_secs * jitter_factor
        } else {
            delay_secs
        };

        Duration::from_secs_f64(final_delay)
    }
}

/// Simple pseudo-random number generator (0.0 to 1.0)
fn rand_simple() -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u32(nanos);
    #[allow(clippy::cast_precision_loss)]
    let value = (hasher.finish() % 1000) as f64;
    value / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_attempt() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 1);
        assert!(!config.retries_enabled());
    }

    #[test]
    fn test_with_attempts_one_means_no_retry() {
        assert_eq!(RetryConfig::with_attempts(1), RetryConfig::no_retry());
        assert_eq!(RetryConfig::with_attempts(0), RetryConfig::no_retry());
    }

    #[test]
    fn test_delay_calculation() {
        let config = RetryConfig {
            jitter: false,
            ..RetryConfig::with_attempts(5)
        };

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(400));
    }

    #[test]
    fn test_delay_is_capped() {
        let config = RetryConfig {
            jitter: false,
            ..RetryConfig::with_attempts(20)
        };

        assert_eq!(config.delay_for_attempt(15), Duration::from_secs(5));
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let config = RetryConfig::with_attempts(3);
        let delay = config.delay_for_attempt(1);
        assert!(delay >= Duration::from_millis(100));
        assert!(delay <= Duration::from_millis(125));
    }
}
