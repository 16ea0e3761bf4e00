pub mod booking;
pub mod error;
pub mod repository;
pub mod service;
pub mod validation;

pub use booking::{Booking, BookingStatus, InvalidTransition, NewBooking};
pub use error::{BookingError, BookingResult, StoreError};
pub use repository::BookingRepository;
pub use service::BookingService;
pub use validation::{FieldViolation, ValidationErrors};
