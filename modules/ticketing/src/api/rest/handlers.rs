use std::sync::Arc;

use api_ingress::AppError;
use axum::{
    body::Bytes,
    extract::Path,
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::{error, info};

use crate::api::rest::dto::{BookingDto, CreateBookingReq, EventDto};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;

/// List all events
pub async fn list_events(Extension(svc): Extension<Arc<Service>>) -> Json<Vec<EventDto>> {
    info!("Listing events");
    Json(svc.list_events().into_iter().map(EventDto::from).collect())
}

/// Get a specific event by ID
pub async fn get_event(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<EventDto>, AppError> {
    info!("Getting event with id: {}", id);

    match svc.get_event(&id) {
        Ok(event) => Ok(Json(EventDto::from(event))),
        Err(e) => {
            error!("Failed to get event {}: {}", id, e);
            Err(map_domain_error(e))
        }
    }
}

/// List all bookings, cancelled ones included
pub async fn list_bookings(Extension(svc): Extension<Arc<Service>>) -> Json<Vec<BookingDto>> {
    info!("Listing bookings");
    Json(svc.list_bookings().into_iter().map(BookingDto::from).collect())
}

/// Create a new booking.
///
/// The body is parsed as JSON whatever its `Content-Type` says.
pub async fn create_booking(
    Extension(svc): Extension<Arc<Service>>,
    body: Bytes,
) -> Result<(StatusCode, Json<BookingDto>), AppError> {
    let req = CreateBookingReq::from_body(&body)?;
    info!("Creating booking: {:?}", req);

    let new_booking = req.into_new_booking().map_err(|e| {
        error!("Rejected booking request: {}", e);
        map_domain_error(e)
    })?;

    match svc.create_booking(new_booking) {
        Ok(booking) => Ok((StatusCode::CREATED, Json(BookingDto::from(booking)))),
        Err(e) => {
            error!("Failed to create booking: {}", e);
            Err(map_domain_error(e))
        }
    }
}

/// Cancel a booking by ID
pub async fn cancel_booking(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<BookingDto>, AppError> {
    info!("Cancelling booking: {}", id);

    match svc.cancel_booking(&id) {
        Ok(booking) => Ok(Json(BookingDto::from(booking))),
        Err(e) => {
            error!("Failed to cancel booking {}: {}", id, e);
            Err(map_domain_error(e))
        }
    }
}
