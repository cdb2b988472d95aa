//! # Customer lifecycle.
//!
//! ```text
//! Arriving ──► Rejected                                   (room full)
//!     │
//!     └──► Waiting ──► BeingServed ──► AwaitingServerDone ──► Leaving
//!          gate.pass()  haircut window   server_done.wait()    room.depart()
//!                       customer_done.post()
//! ```
//!
//! A customer lives for one admission attempt. Rejected customers leave at once
//! without touching the room; admitted ones leave only after the barber closed
//! their session.
//!
//! ## Cancellation
//! - While waiting: the customer withdraws from the queue and the room.
//! - Once summoned: the haircut is cut short, but `customer_done` is still
//!   posted and the customer still waits for `server_done`, so the barber is
//!   never left waiting on a session nobody finishes. Only a stopped barber
//!   ends that wait early.

use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::ShopError;
use crate::events::{Event, EventKind};
use crate::shop::{Admission, Shop, idle};

/// Identity of one arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(u64);

impl CustomerId {
    /// Wraps a raw id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a customer's visit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerOutcome {
    /// Room was full on arrival.
    Rejected,
    /// Got a haircut and left.
    Served,
    /// Left without a completed session: withdrew while waiting, or the
    /// barber stopped mid-session.
    Cancelled,
}

/// One arrival's walk through the shop.
pub struct Customer {
    id: CustomerId,
    shop: Arc<Shop>,
}

impl Customer {
    pub(crate) fn new(id: CustomerId, shop: Arc<Shop>) -> Self {
        Self { id, shop }
    }

    /// This customer's id.
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Runs the visit from arrival to departure.
    pub async fn run(self, token: CancellationToken) -> Result<CustomerOutcome, ShopError> {
        let shop = &self.shop;

        let ticket = match shop.admit(self.id).await {
            Admission::Admitted(ticket) => ticket,
            Admission::Rejected { .. } => return Ok(CustomerOutcome::Rejected),
        };

        if !ticket.gate.pass(&token).await {
            if shop.room().withdraw(self.id, shop.available()).await {
                return Ok(CustomerOutcome::Cancelled);
            }
            // Summoned in the meantime; the barber opens the gate right after.
            if !ticket.gate.pass(shop.closed()).await {
                return Ok(CustomerOutcome::Cancelled);
            }
        }

        let service = shop.timing().service;
        shop.bus().publish(
            Event::new(EventKind::HaircutStarted)
                .with_customer(self.id)
                .with_duration(service),
        );
        // Cancelled: cut short, the session is still closed properly.
        idle(service, &token).await;
        shop.session().customer_done.post();

        if !shop.session().server_done.wait_or_cancel(shop.closed()).await {
            return Ok(CustomerOutcome::Cancelled);
        }

        shop.room().depart(self.id).await?;
        Ok(CustomerOutcome::Served)
    }
}
