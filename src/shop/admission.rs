//! # Admission outcome
//!
//! Every arrival is checked against the room capacity exactly once.
//!
//! ## Variants
//! - `Admitted`: the customer took a chair, was queued, and holds a [`Ticket`]
//!   with its personal gate.
//! - `Rejected`: the room was full. Nothing in the room changed.
//!
//! ## Invariants
//! - The capacity check, the occupancy increment and the enqueue happen under one lock.
//! - A rejected customer is never queued, never served and never retried.

use std::sync::Arc;

use crate::shop::CustomerId;
use crate::sync::Gate;

/// Result of one admission attempt.
#[derive(Debug)]
pub enum Admission {
    /// Customer took a chair and is queued.
    Admitted(Ticket),

    /// Room was full; the customer leaves immediately.
    Rejected {
        /// Occupancy observed at the time of the check (equals capacity).
        occupancy: usize,
    },
}

impl Admission {
    /// True if the customer got a chair.
    #[inline]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_))
    }

    /// Occupancy right after the admission check.
    #[inline]
    pub fn occupancy(&self) -> usize {
        match self {
            Admission::Admitted(ticket) => ticket.occupancy,
            Admission::Rejected { occupancy } => *occupancy,
        }
    }
}

/// Proof of admission handed to the customer.
#[derive(Debug)]
pub struct Ticket {
    /// Admitted customer.
    pub customer: CustomerId,
    /// Occupancy right after this customer sat down.
    pub occupancy: usize,
    /// Personal gate the barber will open to summon this customer.
    pub gate: Arc<Gate>,
}
