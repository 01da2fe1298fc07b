use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketingError {
    #[error("Event not found: {id}")]
    EventNotFound { id: String },

    #[error("Booking not found: {id}")]
    BookingNotFound { id: String },

    #[error("Not enough tickets available: requested {requested}, available {available}")]
    NotEnoughTickets { requested: u32, available: u32 },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl TicketingError {
    pub fn event_not_found(id: impl Into<String>) -> Self {
        Self::EventNotFound { id: id.into() }
    }

    pub fn booking_not_found(id: impl Into<String>) -> Self {
        Self::BookingNotFound { id: id.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
