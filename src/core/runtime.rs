//! # Barbershop: runs the barber, the arrival driver and graceful shutdown.
//!
//! ```text
//! Barbershop::run()
//!   ├─► spawn Barber::run(child_token)
//!   ├─► ArrivalDriver::run()  ──► one Customer::run(child_token) task per arrival
//!   ├─► select:
//!   │     ├─ driver drained       → cancel barber, Ok
//!   │     ├─ shutdown() / signal  → publish ShutdownRequested
//!   │     │                         cancel runtime_token
//!   │     │                         wait_all_with_grace(cfg.grace):
//!   │     │                           ├─ all joined → publish AllStoppedWithin, Ok
//!   │     │                           │               (Err(Defect) if the barber had halted)
//!   │     │                           └─ timeout    → publish GraceExceeded,
//!   │     │                                           Err(GraceExceeded { stuck })
//!   │     └─ defect (barber or customer) → cancel, abort, Err(Defect)
//!   └─► stop the subscriber listener (flushes every published event)
//! ```
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use barbershop::{ArrivalPolicy, Barbershop, Config};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config {
//!         capacity: 2,
//!         service: Duration::from_millis(20),
//!         rest: Duration::from_millis(10),
//!         arrival: ArrivalPolicy {
//!             interval: Duration::from_millis(15),
//!             max_arrivals: Some(4),
//!             ..ArrivalPolicy::default()
//!         },
//!         os_signals: false,
//!         ..Config::default()
//!     };
//!
//!     let shop = Barbershop::builder(cfg).build()?;
//!     shop.run().await?;
//!     assert_eq!(shop.shop().room().occupancy().await, 0);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::{sync::broadcast, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use super::{
    builder::BarbershopBuilder,
    driver::{ArrivalDriver, Customers, IdSource},
    listener::Listener,
    shutdown,
};
use crate::{
    core::Config,
    error::{RuntimeError, ShopError},
    events::{Bus, Event, EventKind},
    shop::{CustomerOutcome, Shop},
};

/// Why the main select finished.
enum Stop {
    Drained,
    Requested,
    Defect(ShopError),
}

/// Owns one shop and everything that runs against it.
pub struct Barbershop {
    cfg: Config,
    bus: Bus,
    shop: Arc<Shop>,
    ids: Arc<IdSource>,
    listener: Listener,
    runtime_token: CancellationToken,
}

impl Barbershop {
    /// Starts building a runtime from `cfg`.
    pub fn builder(cfg: Config) -> BarbershopBuilder {
        BarbershopBuilder::new(cfg)
    }

    pub(super) fn new_internal(
        cfg: Config,
        bus: Bus,
        shop: Arc<Shop>,
        ids: Arc<IdSource>,
        listener: Listener,
        runtime_token: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            bus,
            shop,
            ids,
            listener,
            runtime_token,
        }
    }

    /// Runtime configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The shared shop state.
    pub fn shop(&self) -> &Arc<Shop> {
        &self.shop
    }

    /// New receiver for every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Sends one extra customer through the shop and waits for the visit to end.
    ///
    /// Uses the same id source as the arrival driver. The barber must be running
    /// (see [`run`](Self::run)) for an admitted customer to be served.
    pub async fn arrive(&self) -> Result<CustomerOutcome, ShopError> {
        let customer = self.shop.customer(self.ids.next());
        customer.run(self.runtime_token.child_token()).await
    }

    /// Requests a graceful shutdown of [`run`](Self::run).
    pub fn shutdown(&self) {
        self.runtime_token.cancel();
    }

    /// Runs the barber and the arrival driver until the driver is exhausted
    /// and the shop is empty, a shutdown is requested, or a defect occurs.
    ///
    /// Subscribers have handled every event of the run when this returns.
    /// Call once per runtime.
    pub async fn run(&self) -> Result<(), RuntimeError> {
        let res = self.serve().await;
        self.listener.stop().await;
        res
    }

    async fn serve(&self) -> Result<(), RuntimeError> {
        let token = &self.runtime_token;
        let mut barber = tokio::spawn(self.shop.barber().run(token.child_token()));
        let mut barber_joined = false;
        let mut customers = Customers::new();
        let driver = ArrivalDriver::new(
            Arc::clone(&self.shop),
            self.cfg.arrival,
            Arc::clone(&self.ids),
        );

        let stop = tokio::select! {
            res = driver.run(&mut customers, token) => match res {
                Err(e) => Stop::Defect(e),
                Ok(()) if token.is_cancelled() => Stop::Requested,
                Ok(()) => Stop::Drained,
            },
            res = &mut barber => {
                barber_joined = true;
                match res {
                    Ok(Err(e)) => Stop::Defect(e),
                    _ => Stop::Requested,
                }
            },
            _ = shutdown::signalled(self.cfg.os_signals) => Stop::Requested,
        };
        let barber = (!barber_joined).then_some(barber);

        match stop {
            Stop::Drained => {
                token.cancel();
                match barber {
                    Some(barber) => match barber.await {
                        Ok(Err(e)) => Err(e.into()),
                        _ => Ok(()),
                    },
                    None => Ok(()),
                }
            }
            Stop::Requested => {
                self.bus.publish(Event::new(EventKind::ShutdownRequested));
                token.cancel();
                self.wait_all_with_grace(barber, &mut customers).await
            }
            Stop::Defect(e) => {
                token.cancel();
                if let Some(barber) = barber {
                    barber.abort();
                }
                customers.abort_all();
                Err(e.into())
            }
        }
    }

    /// Waits for the barber and all customers within the grace period.
    ///
    /// Publishes [`EventKind::AllStoppedWithin`] on success, or
    /// [`EventKind::GraceExceeded`] on timeout and returns
    /// [`RuntimeError::GraceExceeded`] with the customers still inside.
    /// A barber that had already halted on a defect is reported as
    /// [`RuntimeError::Defect`] rather than as a clean stop.
    async fn wait_all_with_grace(
        &self,
        barber: Option<JoinHandle<Result<(), ShopError>>>,
        customers: &mut Customers,
    ) -> Result<(), RuntimeError> {
        let grace = self.cfg.grace;
        let abort = barber.as_ref().map(JoinHandle::abort_handle);
        let done = async {
            let halted = match barber {
                Some(barber) => barber.await.ok().and_then(Result::err),
                None => None,
            };
            while customers.join_next().await.is_some() {}
            halted
        };

        let timed = time::timeout(grace, done).await;
        match timed {
            Ok(None) => {
                self.bus.publish(Event::new(EventKind::AllStoppedWithin));
                Ok(())
            }
            Ok(Some(e)) => Err(e.into()),
            Err(_) => {
                if let Some(abort) = abort {
                    abort.abort();
                }
                customers.abort_all();
                let stuck = self.shop.room().present().await;
                self.bus.publish(
                    Event::new(EventKind::GraceExceeded).with_reason(format!("{stuck:?}")),
                );
                Err(RuntimeError::GraceExceeded { grace, stuck })
            }
        }
    }
}
