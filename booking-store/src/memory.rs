use std::sync::{Mutex, MutexGuard, PoisonError};
use booking_core::{Booking, BookingRepository, BookingStatus, NewBooking, StoreError};
use indexmap::IndexMap;
use tracing::debug;
use uuid::Uuid;
use crate::clock::MonotonicClock;

struct Inner {
    bookings: IndexMap<Uuid, Booking>,
    clock: MonotonicClock,
}

/// Process-lifetime booking store.
///
/// One mutex guards the whole map, so every read-modify-write runs without
/// interleaving. Iteration follows insertion order.
pub struct InMemoryBookingStore {
    inner: Mutex<Inner>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                bookings: IndexMap::new(),
                clock: MonotonicClock::new(),
            }),
        }
    }

    // Every mutation completes before the guard drops, so a poisoned map is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingRepository for InMemoryBookingStore {
    fn find_all(&self) -> Vec<Booking> {
        self.lock().bookings.values().cloned().collect()
    }

    fn find_by_id(&self, id: Uuid) -> Option<Booking> {
        self.lock().bookings.get(&id).cloned()
    }

    fn create(&self, attrs: NewBooking) -> Booking {
        let mut guard = self.lock();
        let inner = &mut *guard;

        let mut booking = Booking::new(attrs, inner.clock.now());
        while inner.bookings.contains_key(&booking.id) {
            booking.id = Uuid::new_v4();
        }

        inner.bookings.insert(booking.id, booking.clone());
        debug!(booking_id = %booking.id, total = inner.bookings.len(), "Stored booking");
        booking
    }

    fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking, StoreError> {
        let mut guard = self.lock();
        let inner = &mut *guard;

        let slot = inner.bookings.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let updated = slot.transition(status, inner.clock.now())?;
        *slot = updated.clone();
        Ok(updated)
    }
}
