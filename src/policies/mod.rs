//! # Arrival policies.
//!
//! Controls how the arrival driver spaces out new customers.
//!
//! - [`ArrivalPolicy`] base interval, jitter and an optional arrival cap.
//! - [`JitterPolicy`] randomization applied to each interval.

mod arrival;
mod jitter;

pub use arrival::ArrivalPolicy;
pub use jitter::JitterPolicy;
