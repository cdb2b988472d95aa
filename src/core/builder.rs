use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{driver::IdSource, listener::Listener, runtime::Barbershop};
use crate::{
    core::Config,
    error::RuntimeError,
    events::Bus,
    shop::Shop,
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`Barbershop`] runtime.
pub struct BarbershopBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl BarbershopBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers (presentation sinks, recorders).
    ///
    /// Subscribers receive every shop event through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Validates the configuration and builds the runtime.
    ///
    /// Initializes the event bus, the subscriber workers and the listener that
    /// forwards bus events to them, and the empty shop. Must be called inside a
    /// tokio runtime.
    pub fn build(self) -> Result<Arc<Barbershop>, RuntimeError> {
        let chairs = self.cfg.chairs()?;
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        let listener = Listener::spawn(&bus, subs);

        let shop = Shop::new(chairs, self.cfg.timing(), bus.clone());

        Ok(Arc::new(Barbershop::new_internal(
            self.cfg,
            bus,
            shop,
            Arc::new(IdSource::default()),
            listener,
            CancellationToken::new(),
        )))
    }
}
