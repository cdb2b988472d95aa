//! # Subscriber listener: forwards bus events to the subscriber set.
//!
//! ```text
//!   Bus.subscribe() ──► listener task ──► SubscriberSet::emit(&Event)
//!                          │
//!                          └─ stop token cancelled → forward what is queued,
//!                                                    SubscriberSet::shutdown()
//! ```
//!
//! The subscriber workers hold bus senders (for panic reports), so the bus never
//! closes while they live. The listener therefore stops on its own token: when
//! the run ends ([`Listener::stop`]) or when the runtime is dropped.

use tokio::sync::{
    Mutex,
    broadcast::{
        Receiver,
        error::{RecvError, TryRecvError},
    },
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{events::Bus, events::Event, subscribers::SubscriberSet};

/// Handle to the background task feeding a [`SubscriberSet`].
pub(super) struct Listener {
    stop: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Listener {
    /// Spawns the listener; with no subscribers nothing is spawned.
    ///
    /// Must be called inside a tokio runtime.
    pub(super) fn spawn(bus: &Bus, subs: SubscriberSet) -> Self {
        let stop = CancellationToken::new();
        let handle = (!subs.is_empty()).then(|| {
            let rx = bus.subscribe();
            tokio::spawn(forward(rx, subs, stop.clone()))
        });
        Self {
            stop,
            handle: Mutex::new(handle),
        }
    }

    /// Stops the listener and waits until every subscriber handled what was
    /// published so far.
    pub(super) async fn stop(&self) {
        self.stop.cancel();
        let handle = self.handle.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

async fn forward(mut rx: Receiver<Event>, subs: SubscriberSet, stop: CancellationToken) {
    loop {
        tokio::select! {
            biased;
            res = rx.recv() => match res {
                Ok(ev) => subs.emit(&ev),
                Err(RecvError::Lagged(n)) => {
                    eprintln!("[barbershop] listener lagged; {n} events skipped");
                }
                Err(RecvError::Closed) => break,
            },
            _ = stop.cancelled() => {
                loop {
                    match rx.try_recv() {
                        Ok(ev) => subs.emit(&ev),
                        Err(TryRecvError::Lagged(n)) => {
                            eprintln!("[barbershop] listener lagged; {n} events skipped");
                        }
                        Err(_) => break,
                    }
                }
                break;
            }
        }
    }
    subs.shutdown().await;
}
