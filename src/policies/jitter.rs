//! # Jitter policies for arrival intervals.
//!
//! A fixed interval produces a perfectly regular stream of customers. Jitter
//! makes arrivals bunch up and spread out, which is what exercises the
//! capacity bound.
//!
//! - [`JitterPolicy::None`] — exact interval.
//! - [`JitterPolicy::Full`] — random in `[0, interval]`.
//! - [`JitterPolicy::Equal`] — `interval/2 + random[0, interval/2]`.

use std::time::Duration;

use rand::Rng;

/// Randomization applied to the arrival interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// No jitter: exact interval.
    #[default]
    None,
    /// Full jitter: random in `[0, interval]`.
    Full,
    /// Equal jitter: `interval/2 + random[0, interval/2]`.
    Equal,
}

impl JitterPolicy {
    /// Applies jitter to the given interval.
    pub fn apply(&self, interval: Duration) -> Duration {
        match self {
            JitterPolicy::None => interval,
            JitterPolicy::Full => Self::full(interval),
            JitterPolicy::Equal => Self::equal(interval),
        }
    }

    fn full(interval: Duration) -> Duration {
        let ms = interval.as_millis() as u64;
        if ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=ms))
    }

    fn equal(interval: Duration) -> Duration {
        let ms = interval.as_millis() as u64;
        if ms == 0 {
            return Duration::ZERO;
        }
        let half = ms / 2;
        let jitter = if half == 0 {
            0
        } else {
            rand::rng().random_range(0..=half)
        };
        Duration::from_millis(half + jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_exact() {
        assert_eq!(
            JitterPolicy::None.apply(Duration::from_secs(4)),
            Duration::from_secs(4)
        );
    }

    #[test]
    fn test_full_stays_within_interval() {
        let interval = Duration::from_millis(400);
        for _ in 0..200 {
            assert!(JitterPolicy::Full.apply(interval) <= interval);
        }
    }

    #[test]
    fn test_equal_stays_within_upper_half() {
        let interval = Duration::from_millis(400);
        for _ in 0..200 {
            let d = JitterPolicy::Equal.apply(interval);
            assert!(d >= Duration::from_millis(200), "{d:?} below half");
            assert!(d <= interval, "{d:?} above interval");
        }
    }

    #[test]
    fn test_zero_interval() {
        assert_eq!(JitterPolicy::Full.apply(Duration::ZERO), Duration::ZERO);
        assert_eq!(JitterPolicy::Equal.apply(Duration::ZERO), Duration::ZERO);
    }
}
