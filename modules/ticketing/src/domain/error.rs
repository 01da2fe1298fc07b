use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Event not found: {id}")]
    EventNotFound { id: String },

    #[error("Booking not found: {id}")]
    BookingNotFound { id: String },

    #[error("Not enough tickets for event {event_id}: requested {requested}, available {available}")]
    NotEnoughTickets {
        event_id: String,
        requested: u32,
        available: u32,
    },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },
}

impl DomainError {
    pub fn missing_fields() -> Self {
        Self::MissingFields
    }

    pub fn event_not_found(id: impl Into<String>) -> Self {
        Self::EventNotFound { id: id.into() }
    }

    pub fn booking_not_found(id: impl Into<String>) -> Self {
        Self::BookingNotFound { id: id.into() }
    }

    pub fn not_enough_tickets(event_id: impl Into<String>, requested: u32, available: u32) -> Self {
        Self::NotEnoughTickets {
            event_id: event_id.into(),
            requested,
            available,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
