use std::sync::Arc;
use booking_core::{BookingRepository, BookingService};
use booking_store::InMemoryBookingStore;

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<BookingService>,
}

impl AppState {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self {
            bookings: Arc::new(BookingService::new(repo)),
        }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBookingStore::new()))
    }
}
