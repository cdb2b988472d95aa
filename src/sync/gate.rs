//! # Personal rendezvous gate.
//!
//! A [`Gate`] belongs to exactly one customer. The customer blocks on it while
//! waiting in the lobby; the barber opens it once to summon that customer.
//! Gates are never pooled or reused, so a wakeup cannot reach the wrong customer.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;

use super::Signal;
use crate::error::ShopError;
use crate::shop::CustomerId;

/// One-shot wakeup owned by a single customer.
#[derive(Debug)]
pub struct Gate {
    owner: CustomerId,
    opened: AtomicBool,
    signal: Signal,
}

impl Gate {
    /// Creates a closed gate for `owner`.
    pub fn new(owner: CustomerId) -> Self {
        Self {
            owner,
            opened: AtomicBool::new(false),
            signal: Signal::new(),
        }
    }

    /// Customer this gate belongs to.
    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    /// Opens the gate, releasing its waiter.
    ///
    /// Opening a gate twice is a protocol defect and returns
    /// [`ShopError::GateReopened`] without posting a second wakeup.
    pub fn open(&self) -> Result<(), ShopError> {
        if self.opened.swap(true, Ordering::AcqRel) {
            return Err(ShopError::GateReopened {
                customer: self.owner,
            });
        }
        self.signal.post();
        Ok(())
    }

    /// True once [`open`](Self::open) succeeded.
    pub fn is_open(&self) -> bool {
        self.opened.load(Ordering::Acquire)
    }

    /// Blocks until the gate is opened or `token` is cancelled.
    ///
    /// Returns `true` if the gate was opened.
    pub async fn pass(&self, token: &CancellationToken) -> bool {
        self.signal.wait_or_cancel(token).await
    }
}
