//! # Event subscribers.
//!
//! A subscriber is the presentation side of the shop: it receives every
//! [`Event`](crate::Event) published on the bus through its own bounded queue
//! and worker, so events are rendered one at a time and never interleave.
//!
//! ```text
//!   Bus ──► listener ──► SubscriberSet::emit(&Event)
//!                              ├──► [queue S1] ─► worker S1 ─► on_event()
//!                              └──► [queue SN] ─► worker SN ─► on_event()
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use barbershop::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct Rejections;
//!
//! #[async_trait]
//! impl Subscribe for Rejections {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::CustomerRejected {
//!             // count it...
//!         }
//!     }
//! }
//! ```

mod embedded;
mod set;
mod subscribe;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
