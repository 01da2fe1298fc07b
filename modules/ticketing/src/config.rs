use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Configuration for the ticketing module (`modules.ticketing`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketingConfig {
    /// Seed the demo events and bookings when no `events` are configured.
    pub seed_demo_data: bool,
    /// Event catalog to load instead of the demo events.
    pub events: Vec<EventSeed>,
}

impl Default for TicketingConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            events: Vec::new(),
        }
    }
}

/// One configured event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventSeed {
    pub id: String,
    pub name: String,
    /// Local time, e.g. `2023-12-15T19:00:00`.
    pub date: NaiveDateTime,
    pub location: String,
    pub available_tickets: u32,
}
