//! The service protocol: waiting room, barber and customers.
//!
//! ```text
//! Customer::run                      Shop                          Barber::run
//!   admit(id) ──────────► room.enter(id) ──► available.post() ──► available.wait()
//!                                                                   room.summon_next()
//!   gate.pass() ◄───────────────────────────────────────────────── gate.open()
//!   haircut window                                                  service window
//!   session.customer_done.post() ─────────────────────────────────► customer_done.wait()
//!   session.server_done.wait() ◄────────────────────────────────── server_done.post()
//!   room.depart(id)                                                 rest
//! ```
//!
//! - [`WaitingRoom`]: capacity, occupancy, FIFO queue, slot table.
//! - [`Admission`]: outcome of one capacity check.
//! - [`Session`]: shared `customer_done` / `server_done` pair.
//! - [`Barber`]: the single serializing server loop.
//! - [`Customer`]: one arrival's lifecycle.

mod admission;
mod barber;
mod customer;
mod room;
mod session;

pub use admission::{Admission, Ticket};
pub use barber::Barber;
pub use customer::{Customer, CustomerId, CustomerOutcome};
pub use room::{RoomSnapshot, WaitingRoom};
pub use session::Session;

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::events::Bus;
use crate::sync::Signal;

/// Fixed durations of the protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Service window, waited out by both the barber and the customer.
    pub service: Duration,
    /// Barber nap after each session.
    pub rest: Duration,
}

/// Shared state of one barbershop: room, wakeup signals and session gates.
///
/// A shop is served by at most one [`Barber`] over its lifetime.
pub struct Shop {
    room: WaitingRoom,
    available: Signal,
    session: Session,
    timing: Timing,
    bus: Bus,
    /// Cancelled once the barber loop has stopped.
    closed: CancellationToken,
}

impl Shop {
    /// Creates an empty shop publishing to `bus`.
    pub fn new(capacity: NonZeroUsize, timing: Timing, bus: Bus) -> Arc<Self> {
        Arc::new(Self {
            room: WaitingRoom::new(capacity, bus.clone()),
            available: Signal::new(),
            session: Session::new(),
            timing,
            bus,
            closed: CancellationToken::new(),
        })
    }

    /// Runs the capacity check for `customer`.
    ///
    /// On success the customer is seated and queued under the room lock, and the
    /// "customer available" signal is posted after the lock is released.
    /// On rejection nothing changes.
    pub async fn admit(&self, customer: CustomerId) -> Admission {
        let admission = self.room.enter(customer).await;
        if admission.is_admitted() {
            self.available.post();
        }
        admission
    }

    /// Creates the barber loop for this shop.
    pub fn barber(self: &Arc<Self>) -> Barber {
        Barber::new(Arc::clone(self))
    }

    /// Creates the lifecycle of a newly arrived customer.
    pub fn customer(self: &Arc<Self>, id: CustomerId) -> Customer {
        Customer::new(id, Arc::clone(self))
    }

    /// The waiting room (read accessors and the barber's summon).
    pub fn room(&self) -> &WaitingRoom {
        &self.room
    }

    /// Configured service and rest durations.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Bus this shop publishes to.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub(crate) fn available(&self) -> &Signal {
        &self.available
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn closed(&self) -> &CancellationToken {
        &self.closed
    }
}

/// Sleeps for `d` unless `token` is cancelled first.
///
/// Returns `true` if the full duration elapsed.
pub(crate) async fn idle(d: Duration, token: &CancellationToken) -> bool {
    let sleep = time::sleep(d);
    tokio::pin!(sleep);
    select! {
        _ = &mut sleep => true,
        _ = token.cancelled() => false,
    }
}
