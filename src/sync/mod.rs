//! Signaling primitives shared by the barber and customers.
//!
//! - [`Signal`]: counting wakeup ("customer available", `customer_done`, `server_done`).
//! - [`Gate`]: a customer's personal one-shot rendezvous.
//!
//! Both are thin layers over [`tokio::sync::Semaphore`] with zero initial permits:
//! posting adds a permit, waiting acquires one and forgets it.

mod gate;
mod signal;

pub use gate::Gate;
pub use signal::Signal;
