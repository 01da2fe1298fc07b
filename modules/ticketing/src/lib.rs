//! Event listings and ticket bookings over an in-memory store.
//!
//! Layout:
//! - `contract`: models, client trait and errors for in-process consumers
//! - `domain`: booking rules and the repository port
//! - `infra`: the in-memory store and its seed data
//! - `gateways`: local client implementation
//! - `api::rest`: DTOs, handlers and routes

pub mod contract;

pub use contract::{client::TicketingApi, error::TicketingError, model};

pub mod api;
pub mod config;
pub mod domain;
pub mod gateways;
pub mod infra;
mod module;

pub use config::TicketingConfig;
pub use module::Ticketing;
