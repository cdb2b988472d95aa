//! # Waiting room
//!
//! Capacity, occupancy, the FIFO queue and the slot table of personal gates live
//! behind one lock. Nothing outside this module can reach them except through
//! the guarded methods below, and the lock is only held for O(1) work.
//!
//! ```text
//!   enter(id) ──► [occupancy < n?] ──no──► Rejected (no mutation)
//!                        │yes
//!                        ▼
//!          occupancy += 1, slots[id] = Gate, queue.push_back(id)
//!
//!   summon_next() ──► queue.pop_front() ──► slots[id]
//!   depart(id)    ──► occupancy -= 1, slots.remove(id)
//!   withdraw(id)  ──► [still queued?] ──► queue.remove(id), occupancy -= 1,
//!                                         slots.remove(id), take back the wakeup
//! ```
//!
//! A withdrawn customer's "customer available" post may already have woken the
//! barber. That wakeup is recorded as stale, and the summon it leads to finds
//! nobody instead of reporting a defect.
//!
//! Admission, rejection and departure events are published while the lock is
//! held, so their sequence numbers replay the exact occupancy history.

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::ShopError;
use crate::events::{Bus, Event, EventKind};
use crate::shop::{Admission, CustomerId, Ticket};
use crate::sync::{Gate, Signal};

/// Point-in-time copy of the room state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    /// Customers currently inside (waiting or in session).
    pub occupancy: usize,
    /// Customers not yet summoned, front first.
    pub queued: Vec<CustomerId>,
}

struct RoomState {
    occupancy: usize,
    queue: VecDeque<CustomerId>,
    /// Gates of every customer inside, reclaimed on departure.
    slots: HashMap<CustomerId, Arc<Gate>>,
    /// Wakeups owned by withdrawn customers that the barber already consumed.
    stale: usize,
}

/// Bounded waiting room with a FIFO queue of customers.
pub struct WaitingRoom {
    capacity: NonZeroUsize,
    state: Mutex<RoomState>,
    bus: Bus,
}

impl WaitingRoom {
    /// Creates an empty room with `capacity` chairs.
    pub fn new(capacity: NonZeroUsize, bus: Bus) -> Self {
        Self {
            capacity,
            state: Mutex::new(RoomState {
                occupancy: 0,
                queue: VecDeque::with_capacity(capacity.get()),
                slots: HashMap::with_capacity(capacity.get()),
                stale: 0,
            }),
            bus,
        }
    }

    /// Number of chairs.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Checks capacity and, if a chair is free, seats and queues `customer`.
    ///
    /// Does not post the "customer available" signal; see [`Shop::admit`](crate::Shop::admit).
    pub(crate) async fn enter(&self, customer: CustomerId) -> Admission {
        let mut st = self.state.lock().await;

        if st.occupancy >= self.capacity.get() {
            self.bus.publish(
                Event::new(EventKind::CustomerRejected)
                    .with_customer(customer)
                    .with_occupancy(st.occupancy),
            );
            return Admission::Rejected {
                occupancy: st.occupancy,
            };
        }

        st.occupancy += 1;
        let gate = Arc::new(Gate::new(customer));
        st.slots.insert(customer, Arc::clone(&gate));
        st.queue.push_back(customer);

        self.bus.publish(
            Event::new(EventKind::CustomerWaiting)
                .with_customer(customer)
                .with_occupancy(st.occupancy),
        );
        Admission::Admitted(Ticket {
            customer,
            occupancy: st.occupancy,
            gate,
        })
    }

    /// Removes the earliest queued customer and returns its gate.
    ///
    /// Only the barber calls this, once per "customer available" wakeup.
    /// `Ok(None)` means the wakeup belonged to a customer who withdrew; an
    /// empty queue with no such wakeup means the signal and the queue went out
    /// of step.
    pub async fn summon_next(&self) -> Result<Option<Arc<Gate>>, ShopError> {
        let mut st = self.state.lock().await;
        let Some(customer) = st.queue.pop_front() else {
            if st.stale == 0 {
                return Err(ShopError::EmptyQueue);
            }
            st.stale -= 1;
            return Ok(None);
        };
        st.slots
            .get(&customer)
            .cloned()
            .map(Some)
            .ok_or(ShopError::MissingSlot { customer })
    }

    /// Takes a customer who gave up waiting out of the room.
    ///
    /// Returns `false` if the barber already summoned `customer`; the session
    /// then has to run to its end. Otherwise the customer leaves the queue and
    /// the room, and its wakeup is taken back from `available` (or marked
    /// stale if the barber already consumed it).
    pub(crate) async fn withdraw(&self, customer: CustomerId, available: &Signal) -> bool {
        let mut st = self.state.lock().await;
        let Some(pos) = st.queue.iter().position(|&id| id == customer) else {
            return false;
        };
        st.queue.remove(pos);
        st.slots.remove(&customer);
        st.occupancy -= 1;
        if !available.try_take() {
            st.stale += 1;
        }

        self.bus.publish(
            Event::new(EventKind::CustomerDeparted)
                .with_customer(customer)
                .with_occupancy(st.occupancy)
                .with_reason("withdrew before service"),
        );
        true
    }

    /// Records that `customer` left; returns the new occupancy.
    pub async fn depart(&self, customer: CustomerId) -> Result<usize, ShopError> {
        let mut st = self.state.lock().await;
        st.occupancy = st.occupancy.checked_sub(1).ok_or(ShopError::Underflow)?;
        st.slots.remove(&customer);

        self.bus.publish(
            Event::new(EventKind::CustomerDeparted)
                .with_customer(customer)
                .with_occupancy(st.occupancy),
        );
        Ok(st.occupancy)
    }

    /// Current occupancy.
    pub async fn occupancy(&self) -> usize {
        self.state.lock().await.occupancy
    }

    /// Number of customers admitted but not yet summoned.
    pub async fn queue_len(&self) -> usize {
        self.state.lock().await.queue.len()
    }

    /// Sorted ids of every customer still inside.
    pub async fn present(&self) -> Vec<CustomerId> {
        let st = self.state.lock().await;
        let mut ids: Vec<CustomerId> = st.slots.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Copies occupancy and queue order under the lock.
    pub async fn snapshot(&self) -> RoomSnapshot {
        let st = self.state.lock().await;
        RoomSnapshot {
            occupancy: st.occupancy,
            queued: st.queue.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(n: usize) -> WaitingRoom {
        WaitingRoom::new(NonZeroUsize::new(n).expect("non-zero"), Bus::new(16))
    }

    #[tokio::test]
    async fn test_enter_until_full() {
        let room = room(2);
        assert_eq!(room.capacity(), 2);

        assert_eq!(room.enter(CustomerId::new(1)).await.occupancy(), 1);
        assert_eq!(room.enter(CustomerId::new(2)).await.occupancy(), 2);

        let third = room.enter(CustomerId::new(3)).await;
        assert!(!third.is_admitted());
        assert_eq!(third.occupancy(), 2);
    }

    #[tokio::test]
    async fn test_rejection_leaves_room_untouched() {
        let room = room(1);
        room.enter(CustomerId::new(1)).await;
        let before = room.snapshot().await;

        room.enter(CustomerId::new(2)).await;
        assert_eq!(room.snapshot().await, before);
        assert_eq!(room.present().await, vec![CustomerId::new(1)]);
    }

    #[tokio::test]
    async fn test_summon_is_fifo() {
        let room = room(3);
        for n in [5, 3, 9] {
            room.enter(CustomerId::new(n)).await;
        }

        let mut order = Vec::new();
        for _ in 0..3 {
            let gate = room.summon_next().await.expect("no defect").expect("queued");
            order.push(gate.owner());
        }
        assert_eq!(order, [CustomerId::new(5), CustomerId::new(3), CustomerId::new(9)]);

        // Summoned customers are still inside until they depart.
        assert_eq!(room.occupancy().await, 3);
        assert_eq!(room.queue_len().await, 0);
    }

    #[tokio::test]
    async fn test_summon_from_empty_queue_is_defect() {
        let room = room(1);
        assert_eq!(room.summon_next().await.unwrap_err(), ShopError::EmptyQueue);
    }

    #[tokio::test]
    async fn test_depart_reclaims_slot() {
        let room = room(1);
        room.enter(CustomerId::new(1)).await;
        room.summon_next().await.expect("no defect").expect("queued");

        assert_eq!(room.depart(CustomerId::new(1)).await, Ok(0));
        assert!(room.present().await.is_empty());
        assert_eq!(room.depart(CustomerId::new(1)).await, Err(ShopError::Underflow));
    }

    #[tokio::test]
    async fn test_withdraw_takes_back_pending_wakeup() {
        let room = room(2);
        let available = Signal::new();
        for n in [1, 2] {
            room.enter(CustomerId::new(n)).await;
            available.post();
        }

        assert!(room.withdraw(CustomerId::new(1), &available).await);
        assert_eq!(available.pending(), 1);
        assert_eq!(
            room.snapshot().await,
            RoomSnapshot {
                occupancy: 1,
                queued: vec![CustomerId::new(2)],
            }
        );
        assert_eq!(room.present().await, vec![CustomerId::new(2)]);

        let gate = room.summon_next().await.expect("no defect").expect("queued");
        assert_eq!(gate.owner(), CustomerId::new(2));
    }

    #[tokio::test]
    async fn test_withdraw_after_consumed_wakeup_is_stale() {
        let room = room(1);
        let available = Signal::new();
        room.enter(CustomerId::new(1)).await;
        available.post();

        // The barber woke up but has not summoned yet.
        available.wait().await;
        assert!(room.withdraw(CustomerId::new(1), &available).await);
        assert_eq!(room.occupancy().await, 0);

        assert!(room.summon_next().await.expect("stale wakeup").is_none());
        assert_eq!(room.summon_next().await.unwrap_err(), ShopError::EmptyQueue);
    }

    #[tokio::test]
    async fn test_withdraw_after_summon_is_refused() {
        let room = room(1);
        let available = Signal::new();
        room.enter(CustomerId::new(1)).await;
        available.post();
        room.summon_next().await.expect("no defect").expect("queued");

        assert!(!room.withdraw(CustomerId::new(1), &available).await);
        assert_eq!(room.occupancy().await, 1);
        assert_eq!(available.pending(), 1);
    }

    #[tokio::test]
    async fn test_events_carry_occupancy() {
        let room = room(1);
        let mut rx = room.bus.subscribe();

        room.enter(CustomerId::new(1)).await;
        room.enter(CustomerId::new(2)).await;
        room.depart(CustomerId::new(1)).await.expect("inside");

        let trace: Vec<(EventKind, Option<usize>)> = [
            rx.try_recv().expect("waiting"),
            rx.try_recv().expect("rejected"),
            rx.try_recv().expect("departed"),
        ]
        .into_iter()
        .map(|ev| (ev.kind, ev.occupancy))
        .collect();

        assert_eq!(
            trace,
            vec![
                (EventKind::CustomerWaiting, Some(1)),
                (EventKind::CustomerRejected, Some(1)),
                (EventKind::CustomerDeparted, Some(0)),
            ]
        );
    }
}
