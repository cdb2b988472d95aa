//! # Arrival policy.
//!
//! [`ArrivalPolicy`] tells the driver how long to wait between customers and
//! when to stop. The reference behavior is one customer every 4 seconds, forever.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use barbershop::{ArrivalPolicy, JitterPolicy};
//!
//! let policy = ArrivalPolicy {
//!     interval: Duration::from_secs(2),
//!     jitter: JitterPolicy::None,
//!     max_arrivals: Some(3),
//! };
//!
//! assert_eq!(policy.next_delay(), Duration::from_secs(2));
//! assert!(policy.allows(2));
//! assert!(!policy.allows(3));
//! ```

use std::time::Duration;

use crate::policies::JitterPolicy;

/// Spacing and count of synthesized arrivals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrivalPolicy {
    /// Base delay between two arrivals.
    pub interval: Duration,
    /// Randomization applied to each delay.
    pub jitter: JitterPolicy,
    /// Stop after this many arrivals (`None` = never stop).
    pub max_arrivals: Option<u64>,
}

impl Default for ArrivalPolicy {
    /// One customer every 4 seconds, no jitter, unbounded.
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(4),
            jitter: JitterPolicy::None,
            max_arrivals: None,
        }
    }
}

impl ArrivalPolicy {
    /// Delay before the next arrival, jitter applied.
    pub fn next_delay(&self) -> Duration {
        self.jitter.apply(self.interval)
    }

    /// True if another customer may arrive after `arrived` so far.
    pub fn allows(&self, arrived: u64) -> bool {
        self.max_arrivals.is_none_or(|max| arrived < max)
    }
}
