use std::collections::HashSet;

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::config::{EventSeed, TicketingConfig};
use crate::contract::model::{Booking, BookingStatus, Event};
use crate::domain::repo::Tables;

/// Build the startup tables from configuration.
///
/// Configured events replace the demo catalog and start with no bookings;
/// the demo bookings only make sense next to the demo events.
pub fn initial_tables(cfg: &TicketingConfig) -> Result<Tables> {
    if !cfg.events.is_empty() {
        let events = configured_events(&cfg.events)?;
        tracing::info!("Loaded {} configured events", events.len());
        return Ok(Tables {
            events,
            bookings: Vec::new(),
        });
    }

    if cfg.seed_demo_data {
        let tables = demo_tables();
        tracing::info!(
            "Seeded {} demo events and {} demo bookings",
            tables.events.len(),
            tables.bookings.len()
        );
        return Ok(tables);
    }

    tracing::warn!("Starting with an empty event catalog");
    Ok(Tables::default())
}

fn configured_events(seeds: &[EventSeed]) -> Result<Vec<Event>> {
    let mut seen = HashSet::new();
    let mut events = Vec::with_capacity(seeds.len());

    for (idx, seed) in seeds.iter().enumerate() {
        if seed.id.trim().is_empty() {
            bail!("modules.ticketing.events[{}]: event id must not be empty", idx);
        }
        if !seen.insert(seed.id.as_str()) {
            bail!("modules.ticketing.events[{}]: duplicate event id '{}'", idx, seed.id);
        }
        events.push(Event {
            id: seed.id.clone(),
            name: seed.name.clone(),
            date: seed.date,
            location: seed.location.clone(),
            available_tickets: seed.available_tickets,
        });
    }

    Ok(events)
}

/// The demo catalog: three events and two bookings.
pub fn demo_tables() -> Tables {
    Tables {
        events: vec![
            demo_event(
                "1",
                "Концерт рок-группы",
                local(2023, 12, 15, 19, 0),
                "Главный концертный зал",
                100,
            ),
            demo_event(
                "2",
                "Театральная премьера",
                local(2023, 12, 20, 18, 30),
                "Городской театр",
                50,
            ),
            demo_event(
                "3",
                "Кинофестиваль",
                local(2024, 1, 10, 10, 0),
                "Кинотеатр \"Премьер\"",
                200,
            ),
        ],
        bookings: vec![
            demo_booking("101", "1", "user1", 2, local(2023, 11, 1, 10, 0)),
            demo_booking("102", "2", "user2", 4, local(2023, 11, 2, 11, 30)),
        ],
    }
}

fn demo_event(id: &str, name: &str, date: NaiveDateTime, location: &str, available: u32) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        date,
        location: location.to_string(),
        available_tickets: available,
    }
}

fn demo_booking(
    id: &str,
    event_id: &str,
    user_id: &str,
    tickets: u32,
    created_at: NaiveDateTime,
) -> Booking {
    Booking {
        id: id.to_string(),
        event_id: event_id.to_string(),
        user_id: user_id.to_string(),
        tickets,
        status: BookingStatus::Confirmed,
        created_at: Utc.from_utc_datetime(&created_at),
    }
}

fn local(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, min, 0))
        .expect("demo catalog dates are valid")
}
