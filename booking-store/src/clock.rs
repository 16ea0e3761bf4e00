use chrono::{DateTime, Duration, Utc};

/// Issues strictly increasing timestamps, even when the wall clock stalls
/// or steps backwards between calls.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Option<DateTime<Utc>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&mut self) -> DateTime<Utc> {
        self.stamp(Utc::now())
    }

    /// Returns `wall`, or one microsecond past the previous stamp if `wall`
    /// would not move forward.
    pub fn stamp(&mut self, wall: DateTime<Utc>) -> DateTime<Utc> {
        let next = match self.last {
            Some(last) if wall <= last => last + Duration::microseconds(1),
            _ => wall,
        };
        self.last = Some(next);
        next
    }
}
