//! # Events emitted by the waiting room, the barber and customers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Customer events**: admission, rejection, haircut, departure
//! - **Barber events**: service window, rest, halt
//! - **Runtime events**: shutdown flow, subscriber failures
//!
//! The [`Event`] struct carries additional metadata such as the customer id,
//! the room occupancy right after the transition, and durations.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Admission, rejection and departure are published while the room lock is held,
//! so their `seq` order is exactly the order in which occupancy changed.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use barbershop::{CustomerId, Event, EventKind};
//!
//! let ev = Event::new(EventKind::CustomerWaiting)
//!     .with_customer(CustomerId::new(3))
//!     .with_occupancy(2);
//!
//! assert_eq!(ev.kind, EventKind::CustomerWaiting);
//! assert_eq!(ev.customer, Some(CustomerId::new(3)));
//! assert_eq!(ev.occupancy, Some(2));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::shop::CustomerId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of shop events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Customer events ===
    /// Customer was admitted and is waiting in the lobby.
    ///
    /// Sets:
    /// - `customer`: customer id
    /// - `occupancy`: occupancy after admission
    CustomerWaiting,

    /// Customer found the room full and left without entering.
    ///
    /// Sets:
    /// - `customer`: customer id
    /// - `occupancy`: current (unchanged) occupancy
    CustomerRejected,

    /// Customer was woken by the barber and is getting a haircut.
    ///
    /// Sets:
    /// - `customer`: customer id
    /// - `duration_ms`: service window
    HaircutStarted,

    /// Customer left after the session was closed.
    ///
    /// Sets:
    /// - `customer`: customer id
    /// - `occupancy`: occupancy after departure
    CustomerDeparted,

    // === Barber events ===
    /// Barber started the service window for a customer.
    ///
    /// Sets:
    /// - `customer`: customer being served
    /// - `duration_ms`: service window
    ServiceStart,

    /// Barber finished the service window for a customer.
    ///
    /// Sets:
    /// - `customer`: customer being served
    ServiceEnd,

    /// Barber closed the session and takes a nap.
    ///
    /// Sets:
    /// - `duration_ms`: rest duration
    BarberResting,

    /// Barber loop stopped on a protocol defect.
    ///
    /// Sets:
    /// - `reason`: defect description
    BarberHalted,

    // === Runtime events ===
    /// Shutdown requested (OS signal or explicit call).
    ShutdownRequested,

    /// Barber and every customer stopped within the grace period.
    AllStoppedWithin,

    /// Grace period exceeded; some customers did not stop in time.
    ///
    /// Sets:
    /// - `reason`: ids still inside
    GraceExceeded,

    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: panic info
    SubscriberPanicked,
}

/// Shop event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number (starts at 1).
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Customer the event is about, if any.
    pub customer: Option<CustomerId>,
    /// Room occupancy right after the transition.
    pub occupancy: Option<usize>,
    /// Service or rest window in milliseconds (compact).
    pub duration_ms: Option<u32>,
    /// Human-readable reason (defects, panic info, stuck customers).
    pub reason: Option<Arc<str>>,
    /// Name of the emitting subscriber, for subscriber events.
    pub source: Option<&'static str>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed) + 1,
            at: SystemTime::now(),
            kind,
            customer: None,
            occupancy: None,
            duration_ms: None,
            reason: None,
            source: None,
        }
    }

    /// Attaches a customer id.
    #[inline]
    pub fn with_customer(mut self, customer: CustomerId) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Attaches the occupancy observed under the room lock.
    #[inline]
    pub fn with_occupancy(mut self, occupancy: usize) -> Self {
        self.occupancy = Some(occupancy);
        self
    }

    /// Attaches a duration (stored as milliseconds).
    #[inline]
    pub fn with_duration(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.duration_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        let mut ev = Event::new(EventKind::SubscriberPanicked).with_reason(info);
        ev.source = Some(subscriber);
        ev
    }

    /// Returns the attached duration, if any.
    #[inline]
    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(|ms| Duration::from_millis(u64::from(ms)))
    }

    /// True for events that change room occupancy or were refused by it.
    #[inline]
    pub fn is_admission(&self) -> bool {
        matches!(
            self.kind,
            EventKind::CustomerWaiting | EventKind::CustomerRejected | EventKind::CustomerDeparted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::ServiceStart);
        let b = Event::new(EventKind::ServiceEnd);
        assert!(b.seq > a.seq);
        assert!(a.seq >= 1);
    }

    #[test]
    fn test_duration_is_clamped_to_u32_millis() {
        let ev = Event::new(EventKind::BarberResting).with_duration(Duration::from_secs(u64::MAX));
        assert_eq!(ev.duration_ms, Some(u32::MAX));

        let ev = Event::new(EventKind::BarberResting).with_duration(Duration::from_secs(3));
        assert_eq!(ev.duration(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_is_admission() {
        assert!(Event::new(EventKind::CustomerWaiting).is_admission());
        assert!(Event::new(EventKind::CustomerRejected).is_admission());
        assert!(Event::new(EventKind::CustomerDeparted).is_admission());
        assert!(!Event::new(EventKind::ServiceEnd).is_admission());
    }
}
