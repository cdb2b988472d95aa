//! # barbershop
//!
//! **barbershop** is a bounded-capacity single-server queue (the "sleeping
//! barber") built on tokio: an admission-controlled waiting room, a FIFO queue
//! of customers, one serializing barber, and a two-phase completion handshake
//! that hands each service session safely back and forth.
//!
//! ## Architecture
//! ```text
//!   ArrivalDriver ──spawn──► Customer::run ─┐
//!   (one task per arrival)                  │ admit(id)
//!                                           ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Shop                                                             │
//! │  - WaitingRoom (lock: occupancy, FIFO queue, slot table of gates) │
//! │  - available: Signal ("customer available")                      │
//! │  - Session { customer_done, server_done }  (one shared pair)      │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//!                         Barber::run (single task)
//!
//!   every transition ── publish(Event) ──► Bus ──► SubscriberSet ──► LogWriter, ...
//! ```
//!
//! ### Session
//! ```text
//! Barber:   wait(available) → summon_next → gate.open → service → wait(customer_done)
//!           → post(server_done) → rest → repeat
//! Customer: admit → gate.pass → haircut → post(customer_done) → wait(server_done)
//!           → depart
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types                              |
//! |-------------------|-----------------------------------------------------------|----------------------------------------|
//! | **Protocol**      | Waiting room, barber loop, customer lifecycle.            | [`Shop`], [`Barber`], [`Customer`]     |
//! | **Admission**     | Capacity check with FIFO enqueue under one lock.          | [`Admission`], [`WaitingRoom`]         |
//! | **Events**        | Ordered event stream for presentation and tests.          | [`Event`], [`EventKind`], [`Bus`]      |
//! | **Subscribers**   | Non-blocking fan-out to presentation sinks.               | [`Subscribe`], [`SubscriberSet`]       |
//! | **Runtime**       | Arrival driver, graceful shutdown.                        | [`Barbershop`], [`Config`]             |
//! | **Errors**        | Typed runtime errors and protocol defects.                | [`RuntimeError`], [`ShopError`]        |
//!
//! ## Optional features
//! - `logging` (default): exports the built-in [`LogWriter`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use barbershop::{ArrivalPolicy, Barbershop, Config, Subscribe};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config {
//!         capacity: 3,
//!         service: Duration::from_millis(50),
//!         rest: Duration::from_millis(30),
//!         arrival: ArrivalPolicy {
//!             interval: Duration::from_millis(40),
//!             max_arrivals: Some(5),
//!             ..ArrivalPolicy::default()
//!         },
//!         os_signals: false,
//!         ..Config::default()
//!     };
//!
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(barbershop::LogWriter::new())];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn Subscribe>> = Vec::new();
//!
//!     let shop = Barbershop::builder(cfg).with_subscribers(subs).build()?;
//!     shop.run().await?;
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod policies;
mod shop;
mod subscribers;
mod sync;

// ---- Public re-exports ----

pub use crate::core::{Barbershop, BarbershopBuilder, Config};
pub use error::{RuntimeError, ShopError};
pub use events::{Bus, Event, EventKind};
pub use policies::{ArrivalPolicy, JitterPolicy};
pub use shop::{
    Admission, Barber, Customer, CustomerId, CustomerOutcome, RoomSnapshot, Session, Shop, Ticket,
    Timing, WaitingRoom,
};
pub use subscribers::{Subscribe, SubscriberSet};
pub use sync::{Gate, Signal};

// Optional: built-in stdout writer (demo/reference).
// Enable with: `--features logging` (on by default)
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
