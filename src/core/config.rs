//! # Runtime configuration.
//!
//! Provides [`Config`], the startup parameters of one barbershop run.
//!
//! ## Sentinel values
//! - `capacity = 0` → rejected by [`Config::chairs`] with [`RuntimeError::InvalidCapacity`]
//! - `arrival.max_arrivals = None` → the driver never stops on its own

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::RuntimeError;
use crate::policies::ArrivalPolicy;
use crate::shop::Timing;

/// Startup parameters of the barbershop runtime.
///
/// ## Field semantics
/// - `capacity`: chairs in the waiting room (customers waiting **or** in service)
/// - `service`: haircut window, waited out by both barber and customer
/// - `rest`: barber nap after each session
/// - `arrival`: spacing and count of synthesized customers
/// - `grace`: maximum wait for tasks to stop after shutdown is requested
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `os_signals`: whether SIGINT/SIGTERM/SIGQUIT (Ctrl-C) trigger shutdown
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of chairs (`n > 0`).
    pub capacity: usize,

    /// Fixed service window.
    pub service: Duration,

    /// Fixed rest after each session.
    pub rest: Duration,

    /// Arrival spacing and cap.
    pub arrival: ArrivalPolicy,

    /// Maximum time to wait for a graceful stop.
    ///
    /// When shutdown is requested:
    /// - The barber and every customer are cancelled via `CancellationToken`
    /// - The runtime waits up to `grace` for their tasks to exit
    /// - If that is exceeded, returns `RuntimeError::GraceExceeded`
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Listen for OS termination signals while running.
    pub os_signals: bool,
}

impl Config {
    /// Returns the validated number of chairs.
    pub fn chairs(&self) -> Result<NonZeroUsize, RuntimeError> {
        NonZeroUsize::new(self.capacity).ok_or(RuntimeError::InvalidCapacity)
    }

    /// Service and rest windows.
    #[inline]
    pub fn timing(&self) -> Timing {
        Timing {
            service: self.service,
            rest: self.rest,
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `capacity = 3`
    /// - `service = 5s`, `rest = 3s`
    /// - `arrival = ArrivalPolicy::default()` (every 4s, unbounded)
    /// - `grace = 10s`
    /// - `bus_capacity = 1024`
    /// - `os_signals = true`
    fn default() -> Self {
        Self {
            capacity: 3,
            service: Duration::from_secs(5),
            rest: Duration::from_secs(3),
            arrival: ArrivalPolicy::default(),
            grace: Duration::from_secs(10),
            bus_capacity: 1024,
            os_signals: true,
        }
    }
}
