//! # Barber: the single serializing server.
//!
//! ```text
//! Idle ──► Fetching ──► Signaling ──► Servicing ──► AwaitingCustomerDone
//!  ▲                                                        │
//!  └──────────── Resting ◄──────── SignalingServerDone ◄────┘
//! ```
//!
//! ## Rules
//! - One session at a time: the next customer is not summoned before the
//!   current one has posted `customer_done` and been sent `server_done`.
//! - Cancellation is checked at every blocking point (available wait,
//!   service window, `customer_done` wait, rest).
//! - A defect stops the loop with [`ShopError`] and a `BarberHalted` event.
//! - A wakeup left behind by a customer who withdrew is skipped.
//! - Once the loop stops, for any reason, the shop is marked closed so a
//!   customer in session stops waiting for `server_done`.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::ShopError;
use crate::events::{Event, EventKind};
use crate::shop::{CustomerId, Shop, idle};
use crate::sync::Gate;

/// Phase of the barber loop; each carries what the next step needs.
#[derive(Debug)]
enum Phase {
    Idle,
    Fetching,
    Signaling(Arc<Gate>),
    Servicing(CustomerId),
    AwaitingCustomerDone,
    SignalingServerDone,
    Resting,
}

/// Server loop over a [`Shop`].
pub struct Barber {
    shop: Arc<Shop>,
}

impl Barber {
    pub(crate) fn new(shop: Arc<Shop>) -> Self {
        Self { shop }
    }

    /// Serves customers until `token` is cancelled.
    ///
    /// Returns `Ok(())` on cancellation and `Err` on a protocol defect.
    pub async fn run(self, token: CancellationToken) -> Result<(), ShopError> {
        let _closed = self.shop.closed().clone().drop_guard();
        let mut phase = Phase::Idle;
        loop {
            let next = match self.step(phase, &token).await {
                Ok(Some(next)) => next,
                Ok(None) => return Ok(()),
                Err(e) => {
                    self.shop.bus().publish(
                        Event::new(EventKind::BarberHalted).with_reason(format!(
                            "{}: {e}",
                            e.as_label()
                        )),
                    );
                    return Err(e);
                }
            };
            phase = next;
        }
    }

    /// Runs one phase; `None` means the token was cancelled.
    async fn step(
        &self,
        phase: Phase,
        token: &CancellationToken,
    ) -> Result<Option<Phase>, ShopError> {
        let shop = &self.shop;
        let next = match phase {
            Phase::Idle => {
                if !shop.available().wait_or_cancel(token).await {
                    return Ok(None);
                }
                Phase::Fetching
            }
            Phase::Fetching => match shop.room().summon_next().await? {
                Some(gate) => Phase::Signaling(gate),
                None => Phase::Idle,
            },
            Phase::Signaling(gate) => {
                gate.open()?;
                Phase::Servicing(gate.owner())
            }
            Phase::Servicing(customer) => {
                let service = shop.timing().service;
                shop.bus().publish(
                    Event::new(EventKind::ServiceStart)
                        .with_customer(customer)
                        .with_duration(service),
                );
                if !idle(service, token).await {
                    return Ok(None);
                }
                shop.bus()
                    .publish(Event::new(EventKind::ServiceEnd).with_customer(customer));
                Phase::AwaitingCustomerDone
            }
            Phase::AwaitingCustomerDone => {
                if !shop.session().customer_done.wait_or_cancel(token).await {
                    return Ok(None);
                }
                Phase::SignalingServerDone
            }
            Phase::SignalingServerDone => {
                shop.session().server_done.post();
                Phase::Resting
            }
            Phase::Resting => {
                let rest = shop.timing().rest;
                shop.bus()
                    .publish(Event::new(EventKind::BarberResting).with_duration(rest));
                if !idle(rest, token).await {
                    return Ok(None);
                }
                Phase::Idle
            }
        };
        Ok(Some(next))
    }
}
