//! # LogWriter — the shop's presentation sink
//!
//! Prints one line per [`Event`] to stdout. The subscriber worker handles
//! events one at a time, so lines never interleave.
//!
//! ## Example output
//! ```text
//! [C-#1]---[C-WAIT] Customer is waiting in lobby. (occupancy=1)
//! [B-CUT] Barber is cutting hair of customer #1 for 5s.
//! [C-#1]---[C-HAIRCUT] Customer is getting a haircut for 5s.
//! [B-DONE] Barber is done cutting hair of customer #1.
//! [B-SLEEP] Barber is taking a 3s nap.
//! [C-#1]---[C-LEAVE] Customer has left the barbershop. (occupancy=0)
//! [C-FULL] Barbershop is full, customer #4 leaving. (occupancy=3)
//! ```

use std::time::Duration;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Formats one event as a single line (no trailing newline).
    pub fn render(e: &Event) -> String {
        let who = match e.customer {
            Some(c) => c.to_string(),
            None => "#?".to_string(),
        };
        let occupancy = e
            .occupancy
            .map(|n| format!(" (occupancy={n})"))
            .unwrap_or_default();
        let window = e.duration().map(fmt_secs).unwrap_or_else(|| "?".to_string());

        match e.kind {
            EventKind::CustomerWaiting => {
                format!("[C-{who}]---[C-WAIT] Customer is waiting in lobby.{occupancy}")
            }
            EventKind::CustomerRejected => {
                format!("[C-FULL] Barbershop is full, customer {who} leaving.{occupancy}")
            }
            EventKind::HaircutStarted => {
                format!("[C-{who}]---[C-HAIRCUT] Customer is getting a haircut for {window}.")
            }
            EventKind::CustomerDeparted => {
                format!("[C-{who}]---[C-LEAVE] Customer has left the barbershop.{occupancy}")
            }
            EventKind::ServiceStart => {
                format!("[B-CUT] Barber is cutting hair of customer {who} for {window}.")
            }
            EventKind::ServiceEnd => {
                format!("[B-DONE] Barber is done cutting hair of customer {who}.")
            }
            EventKind::BarberResting => format!("[B-SLEEP] Barber is taking a {window} nap."),
            EventKind::BarberHalted => format!(
                "[B-HALT] Barber stopped: {}",
                e.reason.as_deref().unwrap_or("unknown")
            ),
            EventKind::ShutdownRequested => "[shutdown-requested]".to_string(),
            EventKind::AllStoppedWithin => "[all-stopped-within-grace]".to_string(),
            EventKind::GraceExceeded => format!(
                "[grace-exceeded] inside={}",
                e.reason.as_deref().unwrap_or("[]")
            ),
            EventKind::SubscriberPanicked => format!(
                "[subscriber-panicked] subscriber={} info={}",
                e.source.unwrap_or("unknown"),
                e.reason.as_deref().unwrap_or("unknown"),
            ),
        }
    }
}

fn fmt_secs(d: Duration) -> String {
    if d.subsec_millis() == 0 {
        format!("{}s", d.as_secs())
    } else {
        format!("{}ms", d.as_millis())
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        println!("{}", Self::render(e));
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
