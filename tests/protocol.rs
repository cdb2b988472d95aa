//! Protocol properties of the waiting room, barber and customers.
//!
//! All tests run on a paused clock, so the fixed service and rest windows
//! elapse instantly and deterministically.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use barbershop::{Admission, Bus, CustomerId, CustomerOutcome, Event, EventKind, Shop, Timing};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const SERVICE: Duration = Duration::from_secs(5);
const REST: Duration = Duration::from_secs(3);

fn open_shop(chairs: usize) -> Arc<Shop> {
    Shop::new(
        NonZeroUsize::new(chairs).expect("non-zero"),
        Timing {
            service: SERVICE,
            rest: REST,
        },
        Bus::new(1024),
    )
}

fn visit(shop: &Arc<Shop>, id: u64, token: &CancellationToken) -> JoinHandle<CustomerOutcome> {
    let customer = shop.customer(CustomerId::new(id));
    let token = token.child_token();
    tokio::spawn(async move { customer.run(token).await.expect("no defect") })
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

fn ids_of(events: &[Event], kind: EventKind) -> Vec<u64> {
    events
        .iter()
        .filter(|ev| ev.kind == kind)
        .filter_map(|ev| ev.customer.map(CustomerId::get))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn single_chair_scenario() {
    let shop = open_shop(1);
    let token = CancellationToken::new();
    let barber = tokio::spawn(shop.barber().run(token.child_token()));

    let a = visit(&shop, 1, &token);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(shop.room().occupancy().await, 1);

    // A is in service; B finds the room full.
    let b = visit(&shop, 2, &token);
    assert_eq!(b.await.expect("b panicked"), CustomerOutcome::Rejected);
    assert_eq!(shop.room().occupancy().await, 1);

    assert_eq!(a.await.expect("a panicked"), CustomerOutcome::Served);
    assert_eq!(shop.room().occupancy().await, 0);

    let c = visit(&shop, 3, &token);
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(shop.room().occupancy().await, 1);
    assert_eq!(c.await.expect("c panicked"), CustomerOutcome::Served);

    token.cancel();
    barber.await.expect("barber panicked").expect("no defect");
}

#[tokio::test(start_paused = true)]
async fn two_chair_occupancy_trace() {
    let shop = open_shop(2);
    let mut rx = shop.bus().subscribe();
    let token = CancellationToken::new();
    let barber = tokio::spawn(shop.barber().run(token.child_token()));

    // Three customers in quick succession, a fourth after A has left.
    let mut visits = Vec::new();
    for id in 1..=3 {
        visits.push(visit(&shop, id, &token));
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    tokio::time::sleep(Duration::from_secs(6)).await;
    visits.push(visit(&shop, 4, &token));

    let outcomes: Vec<CustomerOutcome> = futures::future::join_all(visits)
        .await
        .into_iter()
        .map(|res| res.expect("customer panicked"))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            CustomerOutcome::Served,
            CustomerOutcome::Served,
            CustomerOutcome::Rejected,
            CustomerOutcome::Served,
        ]
    );

    let trace: Vec<String> = drain(&mut rx)
        .into_iter()
        .filter(Event::is_admission)
        .map(|ev| match ev.kind {
            EventKind::CustomerRejected => "reject".to_string(),
            _ => ev.occupancy.expect("occupancy").to_string(),
        })
        .collect();
    assert_eq!(trace, ["1", "2", "reject", "1", "2", "1", "0"]);

    token.cancel();
    barber.await.expect("barber panicked").expect("no defect");
}

#[tokio::test(start_paused = true)]
async fn capacity_is_never_exceeded() {
    let shop = open_shop(3);
    let mut rx = shop.bus().subscribe();
    let token = CancellationToken::new();
    let barber = tokio::spawn(shop.barber().run(token.child_token()));

    let mut visits = Vec::new();
    for id in 1..=20 {
        visits.push(visit(&shop, id, &token));
        tokio::time::sleep(Duration::from_millis(700 * (id % 4))).await;
    }
    futures::future::join_all(visits).await;

    let events = drain(&mut rx);
    let mut max_seen = 0;
    for ev in events.iter().filter(|ev| ev.is_admission()) {
        let occupancy = ev.occupancy.expect("occupancy");
        assert!(occupancy <= 3, "occupancy {occupancy} over capacity");
        if ev.kind == EventKind::CustomerRejected {
            assert_eq!(occupancy, 3, "rejected while a chair was free");
        }
        max_seen = max_seen.max(occupancy);
    }
    assert_eq!(max_seen, 3);
    assert!(!ids_of(&events, EventKind::CustomerRejected).is_empty());
    assert_eq!(shop.room().occupancy().await, 0);

    token.cancel();
    barber.await.expect("barber panicked").expect("no defect");
}

#[tokio::test(start_paused = true)]
async fn served_in_arrival_order() {
    let shop = open_shop(5);
    let mut rx = shop.bus().subscribe();
    let token = CancellationToken::new();

    // Seat everyone before the barber starts.
    let visits: Vec<_> = (1..=5).map(|id| visit(&shop, id, &token)).collect();
    tokio::time::sleep(Duration::from_millis(1)).await;
    let barber = tokio::spawn(shop.barber().run(token.child_token()));

    for v in visits {
        assert_eq!(v.await.expect("customer panicked"), CustomerOutcome::Served);
    }

    let events = drain(&mut rx);
    let admitted = ids_of(&events, EventKind::CustomerWaiting);
    assert_eq!(ids_of(&events, EventKind::ServiceStart), admitted);
    assert_eq!(ids_of(&events, EventKind::HaircutStarted), admitted);
    assert_eq!(ids_of(&events, EventKind::CustomerDeparted), admitted);

    token.cancel();
    barber.await.expect("barber panicked").expect("no defect");
}

#[tokio::test(start_paused = true)]
async fn one_session_at_a_time() {
    let shop = open_shop(4);
    let mut rx = shop.bus().subscribe();
    let token = CancellationToken::new();
    let barber = tokio::spawn(shop.barber().run(token.child_token()));

    let mut visits = Vec::new();
    for id in 1..=8 {
        visits.push(visit(&shop, id, &token));
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    futures::future::join_all(visits).await;

    let mut in_session: Option<CustomerId> = None;
    let mut service_ended: Vec<CustomerId> = Vec::new();
    for ev in drain(&mut rx) {
        match ev.kind {
            EventKind::HaircutStarted => {
                assert_eq!(in_session, None, "two customers in session");
                in_session = ev.customer;
            }
            EventKind::ServiceEnd => service_ended.extend(ev.customer),
            EventKind::CustomerDeparted => {
                let who = ev.customer.expect("customer");
                assert!(
                    service_ended.contains(&who),
                    "{who} left before the barber finished"
                );
                assert_eq!(in_session, Some(who));
                in_session = None;
            }
            _ => {}
        }
    }
    assert_eq!(in_session, None);

    token.cancel();
    barber.await.expect("barber panicked").expect("no defect");
}

#[tokio::test(start_paused = true)]
async fn every_admitted_customer_leaves() {
    let shop = open_shop(2);
    let token = CancellationToken::new();
    let barber = tokio::spawn(shop.barber().run(token.child_token()));

    let mut visits = Vec::new();
    for id in 1..=12 {
        visits.push(visit(&shop, id, &token));
        tokio::time::sleep(Duration::from_secs(4)).await;
    }

    let all = futures::future::join_all(visits);
    let outcomes = tokio::time::timeout(Duration::from_secs(600), all)
        .await
        .expect("customers stuck");

    let served = outcomes
        .into_iter()
        .map(|res| res.expect("customer panicked"))
        .filter(|o| *o == CustomerOutcome::Served)
        .count();
    assert!(served >= 1);
    assert_eq!(shop.room().occupancy().await, 0);
    assert!(shop.room().present().await.is_empty());

    token.cancel();
    barber.await.expect("barber panicked").expect("no defect");
}

#[tokio::test(start_paused = true)]
async fn rejection_changes_nothing() {
    let shop = open_shop(2);
    let mut rx = shop.bus().subscribe();

    // No barber: the first two stay seated.
    for id in 1..=2 {
        assert!(shop.admit(CustomerId::new(id)).await.is_admitted());
    }
    let before = shop.room().snapshot().await;
    assert_eq!(before.occupancy, 2);
    assert_eq!(before.queued, vec![CustomerId::new(1), CustomerId::new(2)]);

    let admission = shop.admit(CustomerId::new(3)).await;
    assert!(matches!(admission, Admission::Rejected { occupancy: 2 }));
    assert_eq!(shop.room().snapshot().await, before);

    let kinds: Vec<EventKind> = drain(&mut rx).into_iter().map(|ev| ev.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::CustomerWaiting,
            EventKind::CustomerWaiting,
            EventKind::CustomerRejected,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn cancelled_waiting_customer_frees_its_chair() {
    let shop = open_shop(2);
    let mut rx = shop.bus().subscribe();
    let token = CancellationToken::new();
    let barber = tokio::spawn(shop.barber().run(token.child_token()));

    let a = visit(&shop, 1, &token);
    tokio::time::sleep(Duration::from_millis(10)).await;
    let b_token = CancellationToken::new();
    let b = visit(&shop, 2, &b_token);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(shop.room().occupancy().await, 2);

    // B gives up while A is in the chair.
    b_token.cancel();
    assert_eq!(b.await.expect("b panicked"), CustomerOutcome::Cancelled);
    assert_eq!(shop.room().present().await, vec![CustomerId::new(1)]);

    tokio::time::sleep(Duration::from_secs(30)).await;
    let c = visit(&shop, 3, &token);
    let c = tokio::time::timeout(Duration::from_secs(3600), c)
        .await
        .expect("barber stuck on a withdrawn customer")
        .expect("c panicked");
    assert_eq!(c, CustomerOutcome::Served);
    assert_eq!(a.await.expect("a panicked"), CustomerOutcome::Served);
    assert_eq!(shop.room().occupancy().await, 0);
    assert!(shop.room().present().await.is_empty());

    let events = drain(&mut rx);
    assert_eq!(ids_of(&events, EventKind::ServiceStart), vec![1, 3]);
    assert_eq!(ids_of(&events, EventKind::CustomerDeparted), vec![2, 1, 3]);

    token.cancel();
    barber.await.expect("barber panicked").expect("no defect");
}
