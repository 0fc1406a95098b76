//! Bounded, instrumented worker-slot pools.
//!
//! A [`SlotPool`] is a concurrency permit source: a task acquires a slot
//! before starting and the slot releases itself when the guard drops, which
//! guarantees release on every exit path, including abandonment by a
//! deadline guard. The pool tracks occupancy so tests can assert the cap
//! is never exceeded.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A bounded pool of worker slots.
#[derive(Debug, Clone)]
pub struct SlotPool {
    semaphore: Arc<Semaphore>,
    cap: usize,
    in_flight: Arc<AtomicUsize>,
    high_water: Arc<AtomicUsize>,
}

impl SlotPool {
    /// Create a pool with `cap` slots.
    ///
    /// # Panics
    /// Panics if `cap` is zero; a zero-slot pool would deadlock the first
    /// acquire.
    #[must_use]
    pub fn new(cap: usize) -> Self {
        assert!(cap > 0, "slot pool capacity must be at least 1");
        Self {
            semaphore: Arc::new(Semaphore::new(cap)),
            cap,
            in_flight: Arc::new(AtomicUsize::new(0)),
            high_water: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait for a free slot. This is a suspension point: the scheduler
    /// keeps running other tasks while this one queues.
    pub async fn acquire(&self) -> SlotGuard {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .expect("slot pool semaphore is never closed");

        let occupancy = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(occupancy, Ordering::SeqCst);
        assert!(
            occupancy <= self.cap,
            "slot pool over-acquired: {occupancy} > {}",
            self.cap
        );

        SlotGuard {
            _permit: permit,
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Number of slots currently held.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest occupancy observed since creation.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }

    /// Configured capacity.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }
}

/// RAII slot. Dropping it returns the slot to the pool.
#[derive(Debug)]
pub struct SlotGuard {
    _permit: OwnedSemaphorePermit,
    in_flight: Arc<AtomicUsize>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
