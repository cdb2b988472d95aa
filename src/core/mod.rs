//! Runtime core: wiring, arrivals and lifecycle.
//!
//! The public API from this module is [`Barbershop`] (with its builder) and
//! [`Config`]. Internal modules:
//! - [`driver`]: synthesizes arrivals and spawns one task per customer;
//! - [`runtime`]: owns the shop, runs the barber and drives shutdown;
//! - [`shutdown`]: cross-platform OS signal handling;
//! - [`builder`]: assembles bus, subscribers and shop;
//! - [`listener`]: forwards bus events to the subscribers until the run ends.

mod builder;
mod config;
mod driver;
mod listener;
mod runtime;
mod shutdown;

pub use builder::BarbershopBuilder;
pub use config::Config;
pub use runtime::Barbershop;
