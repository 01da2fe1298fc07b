use api_ingress::AppError;

use crate::domain::error::DomainError;

/// Map domain errors to the HTTP error payloads clients rely on.
pub fn map_domain_error(error: DomainError) -> AppError {
    match error {
        DomainError::MissingFields => AppError::BadRequest("Missing required fields".into()),
        DomainError::EventNotFound { .. } => AppError::NotFound("Event not found".into()),
        DomainError::BookingNotFound { .. } => AppError::NotFound("Booking not found".into()),
        DomainError::NotEnoughTickets { .. } => {
            AppError::BadRequest("Not enough tickets available".into())
        }
        DomainError::Validation { field, message } => {
            AppError::BadRequest(format!("Invalid field '{}': {}", field, message))
        }
    }
}
