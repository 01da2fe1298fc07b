use crate::contract::model::{Booking, Event};
use crate::domain::error::DomainError;

/// The two entity tables, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub events: Vec<Event>,
    pub bookings: Vec<Booking>,
}

impl Tables {
    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn event_mut(&mut self, id: &str) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    pub fn booking(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn booking_mut(&mut self, id: &str) -> Option<&mut Booking> {
        self.bookings.iter_mut().find(|b| b.id == id)
    }
}

/// Port for the domain layer: the entity store.
///
/// Reads return snapshots. All mutation goes through [`transact`](Self::transact),
/// which gives exclusive access to both tables for the duration of `op`;
/// `op` must finish its checks before it mutates, so an `Err` leaves the
/// tables untouched.
pub trait TicketingRepository: Send + Sync {
    fn find_event(&self, id: &str) -> Option<Event>;
    fn find_booking(&self, id: &str) -> Option<Booking>;
    fn list_events(&self) -> Vec<Event>;
    fn list_bookings(&self) -> Vec<Booking>;
    fn transact(
        &self,
        op: &mut dyn FnMut(&mut Tables) -> Result<Booking, DomainError>,
    ) -> Result<Booking, DomainError>;
}
