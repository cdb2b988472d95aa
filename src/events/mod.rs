//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the waiting room, the barber,
//! customers and the runtime.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `WaitingRoom` (admission, rejection, departure, under the room lock),
//!   `Barber`, `Customer`, `Barbershop` (shutdown), `SubscriberSet` workers (panic).
//! - **Consumers**: the runtime listener (fans out to `SubscriberSet`) and anyone
//!   holding a receiver from [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
