use std::sync::Arc;
use std::thread;

use ticketing::{
    config::{EventSeed, TicketingConfig},
    contract::model::{BookingStatus, NewBooking},
    domain::{error::DomainError, service::Service},
    Ticketing,
};

fn service_with_capacity(capacity: u32) -> Arc<Service> {
    let cfg = TicketingConfig {
        seed_demo_data: false,
        events: vec![EventSeed {
            id: "1".into(),
            name: "Small Venue".into(),
            date: chrono::NaiveDateTime::parse_from_str("2024-06-01T21:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            location: "Basement".into(),
            available_tickets: capacity,
        }],
    };
    Ticketing::from_config(&cfg).unwrap().service()
}

fn request(user: usize, tickets: i64) -> NewBooking {
    NewBooking {
        event_id: Some("1".into()),
        user_id: Some(format!("user{}", user)),
        tickets: Some(tickets),
    }
}

#[test]
fn concurrent_bookings_never_oversell() {
    let svc = service_with_capacity(50);

    let handles: Vec<_> = (0..32)
        .map(|user| {
            let svc = svc.clone();
            thread::spawn(move || svc.create_booking(request(user, 3)))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let succeeded = results.iter().filter(|r| r.is_ok()).count() as u32;

    assert_eq!(succeeded, 16);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, DomainError::NotEnoughTickets { .. })));

    let event = svc.get_event("1").unwrap();
    assert_eq!(event.available_tickets, 50 - succeeded * 3);
    assert_eq!(svc.list_bookings().len() as u32, succeeded);
}

#[test]
fn concurrent_cancels_refund_once() {
    let svc = service_with_capacity(10);
    let booking = svc.create_booking(request(0, 4)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = svc.clone();
            let id = booking.id.clone();
            thread::spawn(move || svc.cancel_booking(&id))
        })
        .collect();

    for handle in handles {
        let cancelled = handle.join().unwrap().unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }

    assert_eq!(svc.get_event("1").unwrap().available_tickets, 10);
}

#[test]
fn mixed_bookings_and_cancels_keep_stock_consistent() {
    let svc = service_with_capacity(100);

    let handles: Vec<_> = (0..20)
        .map(|user| {
            let svc = svc.clone();
            thread::spawn(move || {
                let booking = svc.create_booking(request(user, 5))?;
                if user % 2 == 0 {
                    svc.cancel_booking(&booking.id)?;
                }
                Ok::<_, DomainError>(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let confirmed: u32 = svc
        .list_bookings()
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .map(|b| b.tickets)
        .sum();
    assert_eq!(confirmed, 50);
    assert_eq!(svc.get_event("1").unwrap().available_tickets, 50);
}
