use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::contract::model::{Booking, BookingStatus, Event, NewBooking};
use crate::domain::error::DomainError;
use crate::domain::service::ticket_count;

/// REST DTO for event representation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "serialize_local_date")]
    pub date: NaiveDateTime,
    pub location: String,
    pub available_tickets: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatusDto {
    Confirmed,
    Cancelled,
}

/// REST DTO for booking representation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub tickets: u32,
    pub status: BookingStatusDto,
    #[serde(serialize_with = "serialize_utc_millis")]
    pub created_at: DateTime<Utc>,
}

/// REST DTO for creating a booking.
///
/// Fields are kept as raw JSON so that any falsy value (`null`, `false`,
/// `""`, `0`) is reported as missing instead of as a type error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookingReq {
    pub event_id: Option<Value>,
    pub user_id: Option<Value>,
    pub tickets: Option<Value>,
}

impl CreateBookingReq {
    /// Parse a request body. An empty body or a JSON value that is not an
    /// object carries no fields.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice(body)? {
            object @ Value::Object(_) => serde_json::from_value(object),
            _ => Ok(Self::default()),
        }
    }

    /// Checks run in this order: presence of all three fields, the ticket
    /// count, then the event id type. An event id that is not a string can
    /// never match a catalog id, so it is reported as an unknown event.
    /// A non-string user id is kept as its JSON text.
    pub fn into_new_booking(self) -> Result<NewBooking, DomainError> {
        let (Some(event_id), Some(user_id), Some(tickets)) = (
            self.event_id.filter(is_truthy),
            self.user_id.filter(is_truthy),
            self.tickets.filter(is_truthy),
        ) else {
            return Err(DomainError::missing_fields());
        };

        let tickets = whole_number(&tickets)
            .ok_or_else(|| DomainError::validation("tickets", "must be a positive whole number"))?;
        ticket_count(tickets)?;

        let event_id = match event_id {
            Value::String(id) => id,
            other => return Err(DomainError::event_not_found(other.to_string())),
        };
        let user_id = match user_id {
            Value::String(id) => id,
            other => other.to_string(),
        };

        Ok(NewBooking {
            event_id: Some(event_id),
            user_id: Some(user_id),
            tickets: Some(tickets),
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `3` and `3.0` are whole numbers; `"3"`, `true` and `2.5` are not.
fn whole_number(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        return None;
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

/// `2023-12-15T19:00:00`
fn serialize_local_date<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format("%Y-%m-%dT%H:%M:%S"))
}

/// `2023-11-01T10:00:00.000Z`
fn serialize_utc_millis<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// Conversion implementations between REST DTOs and contract models

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            date: event.date,
            location: event.location,
            available_tickets: event.available_tickets,
        }
    }
}

impl From<BookingStatus> for BookingStatusDto {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<Booking> for BookingDto {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            event_id: booking.event_id,
            user_id: booking.user_id,
            tickets: booking.tickets,
            status: booking.status.into(),
            created_at: booking.created_at,
        }
    }
}
