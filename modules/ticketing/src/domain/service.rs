use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::contract::model::{Booking, BookingStatus, Event, NewBooking};
use crate::domain::error::DomainError;
use crate::domain::repo::{Tables, TicketingRepository};

/// Domain service with the booking rules.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn TicketingRepository>,
}

/// A booking request that passed the presence checks.
#[derive(Debug)]
struct BookingRequest {
    event_id: String,
    user_id: String,
    tickets: u32,
}

impl Service {
    pub fn new(repo: Arc<dyn TicketingRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "ticketing.service.list_events", skip(self))]
    pub fn list_events(&self) -> Vec<Event> {
        let events = self.repo.list_events();
        debug!("Listed {} events", events.len());
        events
    }

    #[instrument(name = "ticketing.service.get_event", skip(self))]
    pub fn get_event(&self, id: &str) -> Result<Event, DomainError> {
        self.repo
            .find_event(id)
            .ok_or_else(|| DomainError::event_not_found(id))
    }

    #[instrument(name = "ticketing.service.list_bookings", skip(self))]
    pub fn list_bookings(&self) -> Vec<Booking> {
        let bookings = self.repo.list_bookings();
        debug!("Listed {} bookings", bookings.len());
        bookings
    }

    #[instrument(name = "ticketing.service.get_booking", skip(self))]
    pub fn get_booking(&self, id: &str) -> Result<Booking, DomainError> {
        self.repo
            .find_booking(id)
            .ok_or_else(|| DomainError::booking_not_found(id))
    }

    /// Reserve `tickets` seats of an event for a user.
    ///
    /// The capacity check, the id draw and both table updates happen in one
    /// exclusive section of the store.
    #[instrument(
        name = "ticketing.service.create_booking",
        skip(self, new_booking),
        fields(event_id = ?new_booking.event_id, tickets = ?new_booking.tickets)
    )]
    pub fn create_booking(&self, new_booking: NewBooking) -> Result<Booking, DomainError> {
        info!("Creating booking");

        let request = validate_new_booking(new_booking)?;

        let booking = self.repo.transact(&mut |tables: &mut Tables| {
            let available = tables
                .event(&request.event_id)
                .map(|e| e.available_tickets)
                .ok_or_else(|| DomainError::event_not_found(&request.event_id))?;

            if available < request.tickets {
                return Err(DomainError::not_enough_tickets(
                    &request.event_id,
                    request.tickets,
                    available,
                ));
            }

            let booking = Booking {
                id: unique_booking_id(tables),
                event_id: request.event_id.clone(),
                user_id: request.user_id.clone(),
                tickets: request.tickets,
                status: BookingStatus::Confirmed,
                created_at: Utc::now(),
            };

            if let Some(event) = tables.event_mut(&request.event_id) {
                event.available_tickets = available - request.tickets;
            }
            tables.bookings.push(booking.clone());
            Ok(booking)
        })?;

        info!(booking_id = %booking.id, "Successfully created booking");
        Ok(booking)
    }

    /// Cancel a booking and return its tickets to the event.
    ///
    /// Cancelling an already cancelled booking changes nothing and returns it
    /// as is, so tickets are never refunded twice.
    #[instrument(name = "ticketing.service.cancel_booking", skip(self))]
    pub fn cancel_booking(&self, id: &str) -> Result<Booking, DomainError> {
        info!("Cancelling booking");

        let booking = self.repo.transact(&mut |tables: &mut Tables| {
            let booking = tables
                .booking_mut(id)
                .ok_or_else(|| DomainError::booking_not_found(id))?;

            if booking.status == BookingStatus::Cancelled {
                debug!("Booking already cancelled, nothing to refund");
                return Ok(booking.clone());
            }

            booking.status = BookingStatus::Cancelled;
            let cancelled = booking.clone();

            match tables.event_mut(&cancelled.event_id) {
                Some(event) => {
                    event.available_tickets =
                        event.available_tickets.saturating_add(cancelled.tickets);
                }
                None => warn!(
                    event_id = %cancelled.event_id,
                    "Cancelled booking references an unknown event, no tickets returned"
                ),
            }
            Ok(cancelled)
        })?;

        info!("Successfully cancelled booking");
        Ok(booking)
    }
}

// --- validation helpers ---

/// Presence check: absent, empty and zero values all count as missing.
fn validate_new_booking(new_booking: NewBooking) -> Result<BookingRequest, DomainError> {
    let event_id = new_booking.event_id.filter(|s| !s.is_empty());
    let user_id = new_booking.user_id.filter(|s| !s.is_empty());
    let tickets = new_booking.tickets.filter(|&t| t != 0);

    let (Some(event_id), Some(user_id), Some(tickets)) = (event_id, user_id, tickets) else {
        return Err(DomainError::missing_fields());
    };

    let tickets = ticket_count(tickets)?;

    Ok(BookingRequest {
        event_id,
        user_id,
        tickets,
    })
}

/// Range check for a present, non-zero ticket count.
pub fn ticket_count(raw: i64) -> Result<u32, DomainError> {
    u32::try_from(raw)
        .map_err(|_| DomainError::validation("tickets", "must be a positive whole number"))
}

fn unique_booking_id(tables: &Tables) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if tables.booking(&id).is_none() {
            return id;
        }
    }
}
