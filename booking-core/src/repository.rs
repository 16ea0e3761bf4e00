use uuid::Uuid;
use crate::booking::{Booking, BookingStatus, NewBooking};
use crate::error::StoreError;

/// Repository trait for booking data access.
///
/// Implementations exclusively own every record: reads hand out clones and
/// `update_status` is the only mutation path after creation.
pub trait BookingRepository: Send + Sync {
    /// All bookings in insertion order.
    fn find_all(&self) -> Vec<Booking>;

    fn find_by_id(&self, id: Uuid) -> Option<Booking>;

    /// Stores a new `pending` booking with a fresh id and equal timestamps.
    fn create(&self, attrs: NewBooking) -> Booking;

    /// Applies a status change checked against the transition table.
    /// A rejected change leaves the stored record as it was.
    fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking, StoreError>;
}
