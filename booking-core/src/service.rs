use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use crate::booking::{Booking, BookingStatus, NewBooking};
use crate::error::{BookingError, BookingResult, StoreError};
use crate::repository::BookingRepository;

/// Create/read/status-update workflow over a [`BookingRepository`]
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    /// Input must already be validated; see [`crate::validation::validate_create_booking`].
    pub fn create_booking(&self, input: NewBooking) -> Booking {
        let booking = self.repo.create(input);
        info!(
            booking_id = %booking.id,
            flight_number = %booking.flight_number,
            "Booking created"
        );
        booking
    }

    pub fn list_bookings(&self) -> Vec<Booking> {
        self.repo.find_all()
    }

    pub fn get_booking(&self, id: Uuid) -> BookingResult<Booking> {
        debug!(booking_id = %id, "Fetching booking");
        self.repo.find_by_id(id).ok_or(BookingError::NotFound(id))
    }

    pub fn update_booking_status(&self, id: Uuid, target: BookingStatus) -> BookingResult<Booking> {
        self.get_booking(id)?;

        match self.repo.update_status(id, target) {
            Ok(booking) => {
                info!(booking_id = %id, status = %booking.status, "Booking status updated");
                Ok(booking)
            }
            Err(StoreError::NotFound(id)) => Err(BookingError::NotFound(id)),
            Err(StoreError::InvalidTransition(rejected)) => {
                warn!(
                    booking_id = %id,
                    from = %rejected.from,
                    to = %rejected.to,
                    terminal = rejected.from.is_terminal(),
                    "Rejected status transition"
                );
                Err(BookingError::Conflict {
                    current: rejected.from,
                    attempted: rejected.to,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use std::sync::Mutex;

    /// Holds at most one booking; enough to exercise the error mapping.
    #[derive(Default)]
    struct SingleSlot {
        slot: Mutex<Option<Booking>>,
    }

    impl BookingRepository for SingleSlot {
        fn find_all(&self) -> Vec<Booking> {
            self.slot.lock().unwrap().iter().cloned().collect()
        }

        fn find_by_id(&self, id: Uuid) -> Option<Booking> {
            self.slot.lock().unwrap().clone().filter(|b| b.id == id)
        }

        fn create(&self, attrs: NewBooking) -> Booking {
            let booking = Booking::new(attrs, Utc::now());
            *self.slot.lock().unwrap() = Some(booking.clone());
            booking
        }

        fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking, StoreError> {
            let mut slot = self.slot.lock().unwrap();
            let current = slot.as_ref().filter(|b| b.id == id).ok_or(StoreError::NotFound(id))?;
            let updated = current.transition(status, Utc::now())?;
            *slot = Some(updated.clone());
            Ok(updated)
        }
    }

    fn service() -> BookingService {
        BookingService::new(Arc::new(SingleSlot::default()))
    }

    fn input() -> NewBooking {
        NewBooking {
            passenger_name: "Jane Smith".to_string(),
            flight_number: "BA456".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2031, 3, 1).unwrap(),
            return_date: None,
        }
    }

    #[test]
    fn test_missing_booking_is_not_found() {
        let id = Uuid::new_v4();
        assert_eq!(service().get_booking(id), Err(BookingError::NotFound(id)));
        assert_eq!(
            service().update_booking_status(id, BookingStatus::Confirmed),
            Err(BookingError::NotFound(id))
        );
    }

    #[test]
    fn test_invalid_transition_becomes_conflict() {
        let service = service();
        let booking = service.create_booking(input());

        service.update_booking_status(booking.id, BookingStatus::Cancelled).unwrap();
        let err = service
            .update_booking_status(booking.id, BookingStatus::Confirmed)
            .unwrap_err();

        assert_eq!(
            err,
            BookingError::Conflict {
                current: BookingStatus::Cancelled,
                attempted: BookingStatus::Confirmed,
            }
        );
    }

    #[test]
    fn test_list_empty() {
        assert!(service().list_bookings().is_empty());
    }
}
