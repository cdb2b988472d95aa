//! # Service session handshake
//!
//! A single pair of completion signals is shared by every session:
//!
//! ```text
//! Barber                              Customer
//!   │ open(gate) ───────────────────────► │
//!   │ service window        haircut window │
//!   │                                      │ customer_done.post()
//!   │ ◄──────────────────── customer_done  │
//!   │ server_done.post() ────────────────► │
//!   ▼ rest                                 ▼ depart
//! ```
//!
//! Sharing the pair relies on the barber waiting for `customer_done` before
//! posting `server_done`, and posting `server_done` before it summons anyone
//! else. Each session therefore adds exactly one post to each signal, and every
//! customer that consumes a `server_done` has already finished its haircut.

use crate::sync::Signal;

/// Completion signals shared by all sessions.
#[derive(Debug, Default)]
pub struct Session {
    /// Posted by the customer once the haircut window is over.
    pub customer_done: Signal,
    /// Posted by the barber to let the customer leave.
    pub server_done: Signal,
}

impl Session {
    /// Creates the session pair with no pending posts.
    pub fn new() -> Self {
        Self::default()
    }
}
