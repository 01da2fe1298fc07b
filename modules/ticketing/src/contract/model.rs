use chrono::{DateTime, NaiveDateTime, Utc};

/// Pure event model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub name: String,
    /// Local wall-clock time of the event, no zone attached.
    pub date: NaiveDateTime,
    pub location: String,
    pub available_tickets: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub tickets: u32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Booking request as received; every field may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBooking {
    pub event_id: Option<String>,
    pub user_id: Option<String>,
    pub tickets: Option<i64>,
}
