use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Booking status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Transition table: every status reachable from `self` in one step.
    /// Self-transitions are never listed.
    pub fn allowed_targets(&self) -> &'static [BookingStatus] {
        match self {
            BookingStatus::Pending => &[BookingStatus::Confirmed, BookingStatus::Cancelled],
            BookingStatus::Confirmed => &[BookingStatus::Cancelled],
            BookingStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_targets().is_empty()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for BookingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A status change rejected by the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status transition from {from} to {to}")]
pub struct InvalidTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

/// Attributes of a booking that passed input validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub passenger_name: String,
    pub flight_number: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// A single flight reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub passenger_name: String,
    pub flight_number: String,
    pub departure_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(attrs: NewBooking, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            passenger_name: attrs.passenger_name,
            flight_number: attrs.flight_number,
            departure_date: attrs.departure_date,
            return_date: attrs.return_date,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy moved to `target` and stamped with `at`.
    ///
    /// `self` is left untouched either way. The caller owns the clock and
    /// must hand in an `at` no earlier than `self.updated_at`.
    pub fn transition(&self, target: BookingStatus, at: DateTime<Utc>) -> Result<Booking, InvalidTransition> {
        if !self.status.can_transition_to(target) {
            return Err(InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        Ok(Booking {
            status: target,
            updated_at: at.max(self.updated_at),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Booking {
        Booking::new(
            NewBooking {
                passenger_name: "John Doe".to_string(),
                flight_number: "UA123".to_string(),
                departure_date: NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
                return_date: None,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_new_booking_is_pending() {
        let booking = sample();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.created_at, booking.updated_at);
    }

    #[test]
    fn test_transition_table() {
        let allowed = [
            (BookingStatus::Pending, BookingStatus::Confirmed),
            (BookingStatus::Pending, BookingStatus::Cancelled),
            (BookingStatus::Confirmed, BookingStatus::Cancelled),
        ];

        let mut legal = 0;
        for from in BookingStatus::ALL {
            for to in BookingStatus::ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(from.can_transition_to(to), expected, "{from} -> {to}");
                if expected {
                    legal += 1;
                }
            }
        }
        assert_eq!(legal, 3);
    }

    #[test]
    fn test_cancelled_is_terminal() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_transition_leaves_original_untouched() {
        let booking = sample();
        let later = booking.updated_at + Duration::seconds(5);

        let confirmed = booking.transition(BookingStatus::Confirmed, later).unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.updated_at, later);
        assert_eq!(confirmed.created_at, booking.created_at);
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[test]
    fn test_self_transition_rejected() {
        let booking = sample();
        let err = booking
            .transition(BookingStatus::Pending, Utc::now())
            .unwrap_err();
        assert_eq!(err.from, BookingStatus::Pending);
        assert_eq!(err.to, BookingStatus::Pending);
    }

    #[test]
    fn test_transition_never_rewinds_updated_at() {
        let booking = sample();
        let earlier = booking.updated_at - Duration::seconds(30);
        let cancelled = booking.transition(BookingStatus::Cancelled, earlier).unwrap();
        assert_eq!(cancelled.updated_at, booking.updated_at);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("confirmed".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
        assert!("CONFIRMED".parse::<BookingStatus>().is_err());
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_wire_format() {
        let mut booking = sample();
        booking.return_date = NaiveDate::from_ymd_opt(2030, 1, 20);
        let json = serde_json::to_value(&booking).unwrap();

        assert_eq!(json["passengerName"], "John Doe");
        assert_eq!(json["flightNumber"], "UA123");
        assert_eq!(json["departureDate"], "2030-01-15");
        assert_eq!(json["returnDate"], "2030-01-20");
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());

        booking.return_date = None;
        let json = serde_json::to_value(&booking).unwrap();
        assert!(json.get("returnDate").is_none());
    }
}
