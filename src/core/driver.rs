//! # Arrival driver: synthesizes customers.
//!
//! ```text
//! loop while policy.allows(arrived) {
//!   ├─► id = ids.next()
//!   ├─► customers.spawn(Customer::run(child_token))
//!   ├─► reap finished customers (defects abort the run)
//!   └─► sleep(policy.next_delay())   (cancellable)
//! }
//! drain: wait for every spawned customer to finish
//! ```
//!
//! ## Rules
//! - One task per arrival, never pooled.
//! - Ids are allocated from one monotonic source shared with `Barbershop::arrive`.
//! - Cancellation stops spawning at once; spawned customers observe their own
//!   child token.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::error::ShopError;
use crate::policies::ArrivalPolicy;
use crate::shop::{CustomerId, CustomerOutcome, Shop, idle};

/// Join set of running customer tasks.
pub(crate) type Customers = JoinSet<Result<CustomerOutcome, ShopError>>;

/// Monotonic customer id allocator (first id is 1).
#[derive(Debug, Default)]
pub(crate) struct IdSource {
    last: AtomicU64,
}

impl IdSource {
    pub(crate) fn next(&self) -> CustomerId {
        CustomerId::new(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Spawns customers at the pace of an [`ArrivalPolicy`].
pub(crate) struct ArrivalDriver {
    shop: Arc<Shop>,
    policy: ArrivalPolicy,
    ids: Arc<IdSource>,
}

impl ArrivalDriver {
    pub(crate) fn new(shop: Arc<Shop>, policy: ArrivalPolicy, ids: Arc<IdSource>) -> Self {
        Self { shop, policy, ids }
    }

    /// Drives arrivals until the policy is exhausted and every customer left,
    /// or until `token` is cancelled.
    ///
    /// Returns the first customer defect, if any.
    pub(crate) async fn run(
        &self,
        customers: &mut Customers,
        token: &CancellationToken,
    ) -> Result<(), ShopError> {
        let mut arrived: u64 = 0;

        while self.policy.allows(arrived) && !token.is_cancelled() {
            let customer = self.shop.customer(self.ids.next());
            customers.spawn(customer.run(token.child_token()));
            arrived += 1;

            while let Some(res) = customers.try_join_next() {
                reap(res)?;
            }

            if self.policy.allows(arrived) && !idle(self.policy.next_delay(), token).await {
                return Ok(());
            }
        }

        while let Some(res) = customers.join_next().await {
            reap(res)?;
        }
        Ok(())
    }
}

fn reap(res: Result<Result<CustomerOutcome, ShopError>, JoinError>) -> Result<(), ShopError> {
    match res {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(e),
        Err(join) => {
            eprintln!("[barbershop] customer task failed: {join}");
            Ok(())
        }
    }
}
