use axum::{
    routing::{delete, get},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub fn register_routes(mut router: Router, service: Arc<Service>) -> Router {
    // GET /events - List all events
    router = router.route("/events", get(handlers::list_events));

    // GET /events/{id} - Get a specific event
    router = router.route("/events/{id}", get(handlers::get_event));

    // GET /bookings - List all bookings
    // POST /bookings - Create a booking
    router = router.route(
        "/bookings",
        get(handlers::list_bookings).post(handlers::create_booking),
    );

    // DELETE /bookings/{id} - Cancel a booking
    router = router.route("/bookings/{id}", delete(handlers::cancel_booking));

    router.layer(Extension(service))
}
