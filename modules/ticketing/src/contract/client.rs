use async_trait::async_trait;

use crate::contract::model::{Booking, Event, NewBooking};

/// Public API of the ticketing module for in-process consumers.
///
/// Errors are `anyhow::Error` wrapping [`crate::contract::error::TicketingError`].
#[async_trait]
pub trait TicketingApi: Send + Sync {
    /// All events in catalog order
    async fn list_events(&self) -> anyhow::Result<Vec<Event>>;

    async fn get_event(&self, id: &str) -> anyhow::Result<Event>;

    /// All bookings in creation order, cancelled ones included
    async fn list_bookings(&self) -> anyhow::Result<Vec<Booking>>;

    async fn get_booking(&self, id: &str) -> anyhow::Result<Booking>;

    /// Reserve tickets against an event
    async fn create_booking(&self, new_booking: NewBooking) -> anyhow::Result<Booking>;

    /// Cancel a booking and return its tickets to the event
    async fn cancel_booking(&self, id: &str) -> anyhow::Result<Booking>;
}
