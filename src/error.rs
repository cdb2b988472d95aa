//! Error types used by the barbershop runtime and the service protocol.
//!
//! This module defines two enums:
//!
//! - [`RuntimeError`] — errors raised by the runtime itself (configuration, shutdown).
//! - [`ShopError`] — protocol defects detected inside the waiting room or at a gate.
//!
//! A customer turned away at a full room is **not** an error; it is the
//! [`Admission::Rejected`](crate::Admission::Rejected) outcome.

use std::time::Duration;
use thiserror::Error;

use crate::shop::CustomerId;

/// # Errors produced by the barbershop runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The waiting room was configured with zero chairs.
    #[error("waiting room capacity must be at least 1")]
    InvalidCapacity,

    /// Shutdown grace period was exceeded; some customers were still inside.
    #[error("shutdown timeout {grace:?} exceeded; still inside: {stuck:?}; forcing termination")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Customers that had not left the shop in time.
        stuck: Vec<CustomerId>,
    },

    /// The barber or a customer hit a protocol defect and the run was aborted.
    #[error("protocol defect: {0}")]
    Defect(#[from] ShopError),
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use barbershop::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::InvalidCapacity.as_label(), "runtime_invalid_capacity");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::InvalidCapacity => "runtime_invalid_capacity",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
            RuntimeError::Defect(_) => "runtime_defect",
        }
    }
}

/// # Protocol defects.
///
/// None of these can happen while the waiting-room invariants hold. They are
/// reported instead of panicking so the runtime can stop every task and surface
/// the defect through [`RuntimeError::Defect`]. They are never retried.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopError {
    /// The barber was woken but the queue was empty.
    #[error("summoned from an empty queue")]
    EmptyQueue,

    /// A queued customer has no gate in the slot table.
    #[error("no gate registered for customer {customer}")]
    MissingSlot {
        /// The customer whose slot is gone.
        customer: CustomerId,
    },

    /// A customer's gate was opened a second time.
    #[error("gate of customer {customer} opened twice")]
    GateReopened {
        /// Owner of the gate.
        customer: CustomerId,
    },

    /// A departure was recorded while the room was already empty.
    #[error("departure from an empty room")]
    Underflow,
}

impl ShopError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use barbershop::ShopError;
    ///
    /// assert_eq!(ShopError::EmptyQueue.as_label(), "shop_empty_queue");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ShopError::EmptyQueue => "shop_empty_queue",
            ShopError::MissingSlot { .. } => "shop_missing_slot",
            ShopError::GateReopened { .. } => "shop_gate_reopened",
            ShopError::Underflow => "shop_underflow",
        }
    }
}
