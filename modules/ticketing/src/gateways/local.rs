use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::TicketingApi,
    error::TicketingError,
    model::{Booking, Event, NewBooking},
};
use crate::domain::{error::DomainError, service::Service};

/// Local implementation of the TicketingApi trait that delegates to the domain service
pub struct TicketingLocalClient {
    service: Arc<Service>,
}

impl TicketingLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TicketingApi for TicketingLocalClient {
    async fn list_events(&self) -> anyhow::Result<Vec<Event>> {
        Ok(self.service.list_events())
    }

    async fn get_event(&self, id: &str) -> anyhow::Result<Event> {
        self.service.get_event(id).map_err(map_domain_error_to_anyhow)
    }

    async fn list_bookings(&self) -> anyhow::Result<Vec<Booking>> {
        Ok(self.service.list_bookings())
    }

    async fn get_booking(&self, id: &str) -> anyhow::Result<Booking> {
        self.service.get_booking(id).map_err(map_domain_error_to_anyhow)
    }

    async fn create_booking(&self, new_booking: NewBooking) -> anyhow::Result<Booking> {
        self.service
            .create_booking(new_booking)
            .map_err(map_domain_error_to_anyhow)
    }

    async fn cancel_booking(&self, id: &str) -> anyhow::Result<Booking> {
        self.service
            .cancel_booking(id)
            .map_err(map_domain_error_to_anyhow)
    }
}

/// Map domain errors to contract errors wrapped in anyhow
fn map_domain_error_to_anyhow(domain_error: DomainError) -> anyhow::Error {
    let contract_error = match domain_error {
        DomainError::MissingFields => TicketingError::validation("Missing required fields"),
        DomainError::EventNotFound { id } => TicketingError::event_not_found(id),
        DomainError::BookingNotFound { id } => TicketingError::booking_not_found(id),
        DomainError::NotEnoughTickets {
            requested,
            available,
            ..
        } => TicketingError::NotEnoughTickets {
            requested,
            available,
        },
        DomainError::Validation { field, message } => {
            TicketingError::validation(format!("{}: {}", field, message))
        }
    };

    anyhow::Error::new(contract_error)
}
