use uuid::Uuid;
use crate::booking::{BookingStatus, InvalidTransition};

/// Failures on the store's mutation path. Lookups report absence as `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

/// Domain errors surfaced by [`crate::BookingService`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Booking with ID {0} not found")]
    NotFound(Uuid),

    #[error("Cannot transition booking from {current} to {attempted}")]
    Conflict {
        current: BookingStatus,
        attempted: BookingStatus,
    },
}

pub type BookingResult<T> = Result<T, BookingError>;
