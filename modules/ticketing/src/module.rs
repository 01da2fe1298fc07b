use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;

use crate::api::rest::routes;
use crate::config::TicketingConfig;
use crate::contract::client::TicketingApi;
use crate::domain::service::Service;
use crate::gateways::local::TicketingLocalClient;
use crate::infra::storage::{in_memory::InMemoryRepository, seed};

/// Ticketing module: owns the store and the domain service, and hands out
/// its REST routes and its in-process client.
#[derive(Clone)]
pub struct Ticketing {
    service: Arc<Service>,
}

impl Ticketing {
    /// Build the module with a store seeded from `cfg`.
    pub fn from_config(cfg: &TicketingConfig) -> Result<Self> {
        let tables = seed::initial_tables(cfg).context("invalid ticketing seed data")?;
        let repo = Arc::new(InMemoryRepository::new(tables));
        tracing::info!("Ticketing module initialized");
        Ok(Self {
            service: Arc::new(Service::new(repo)),
        })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn client(&self) -> Arc<dyn TicketingApi> {
        Arc::new(TicketingLocalClient::new(self.service.clone()))
    }

    /// REST routes of the module, ready to be merged by the HTTP host.
    pub fn router(&self) -> Router {
        routes::register_routes(Router::new(), self.service.clone())
    }
}
