//! # Example: barbershop
//!
//! The classic sleeping-barber run: a customer walks in every 4 seconds, the
//! barber cuts hair for 5 seconds and naps for 3 seconds between customers.
//! Runs until Ctrl-C.
//!
//! ## Flow
//! ```text
//! Barbershop::run()
//!     ├─► Barber::run()            (single task)
//!     ├─► ArrivalDriver::run()     (one Customer::run task every 4s)
//!     │     ├─► publish(CustomerWaiting | CustomerRejected)
//!     │     ├─► publish(HaircutStarted)
//!     │     └─► publish(CustomerDeparted)
//!     └─► Ctrl-C
//!          ├─► publish(ShutdownRequested)
//!          └─► publish(AllStoppedWithin)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example barbershop -- 3
//! ```
//! The optional argument is the number of chairs (default 3).

use std::sync::Arc;

use barbershop::{Barbershop, Config, LogWriter, Subscribe};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Chairs from the command line
    let capacity = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .map_err(|e| format!("USAGE: barbershop <NUM_CHAIRS> ({e})"))?,
        None => Config::default().capacity,
    };

    // 2. Reference timings (5s haircut, 3s nap, arrival every 4s)
    let cfg = Config {
        capacity,
        ..Config::default()
    };

    // 3. Print every event
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];

    // 4. Open the shop and run until Ctrl-C
    let shop = Barbershop::builder(cfg).with_subscribers(subs).build()?;
    println!(
        "barbershop open with {} chairs (Ctrl-C to close)",
        shop.config().capacity
    );
    shop.run().await?;
    Ok(())
}
