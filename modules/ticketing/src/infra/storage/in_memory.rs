use parking_lot::RwLock;

use crate::contract::model::{Booking, Event};
use crate::domain::error::DomainError;
use crate::domain::repo::{Tables, TicketingRepository};

/// Process-lifetime store: both tables behind one lock.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl TicketingRepository for InMemoryRepository {
    fn find_event(&self, id: &str) -> Option<Event> {
        self.tables.read().event(id).cloned()
    }

    fn find_booking(&self, id: &str) -> Option<Booking> {
        self.tables.read().booking(id).cloned()
    }

    fn list_events(&self) -> Vec<Event> {
        self.tables.read().events.clone()
    }

    fn list_bookings(&self) -> Vec<Booking> {
        self.tables.read().bookings.clone()
    }

    fn transact(
        &self,
        op: &mut dyn FnMut(&mut Tables) -> Result<Booking, DomainError>,
    ) -> Result<Booking, DomainError> {
        let mut tables = self.tables.write();
        op(&mut tables)
    }
}
