// --- File: crates/courtbook_services/src/lib.rs ---

// Declare modules within this crate
pub mod analytics;
mod api;
pub mod auth;
pub mod booking;
#[cfg(test)]
mod booking_proptest;
pub mod courts;
pub mod filters;
pub mod models;
pub mod payments;
pub mod reservations;
pub mod sites;

pub use analytics::{MonthlyCount, UsageStats};
pub use auth::AuthService;
pub use booking::{time_slots, BookingForm, NewReservation, Quote};
pub use courts::CourtsService;
pub use filters::{AvailabilityWindow, CourtFilter, PaymentFilter, ReservationFilter, SiteFilter};
pub use payments::PaymentsService;
pub use reservations::ReservationsService;
pub use sites::SitesService;

use courtbook_client::{
    ApiClient, ApiError, FileStore, MemoryStore, SessionManager, SessionStore,
};
use courtbook_config::AppConfig;
use std::sync::Arc;
use tracing::debug;

/// All resource services over one shared client and session.
#[derive(Debug, Clone)]
pub struct Courtbook {
    client: Arc<ApiClient>,
    pub auth: AuthService,
    pub sites: SitesService,
    pub courts: CourtsService,
    pub reservations: ReservationsService,
    pub payments: PaymentsService,
}

impl Courtbook {
    pub fn new(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            auth: AuthService::new(client.clone()),
            sites: SitesService::new(client.clone()),
            courts: CourtsService::new(client.clone()),
            reservations: ReservationsService::new(client.clone()),
            payments: PaymentsService::new(client.clone()),
            client,
        }
    }

    /// Builds the client from configuration and restores any persisted session.
    ///
    /// With `session.storage_path` set the session lives in that JSON file;
    /// otherwise it is kept in memory only.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let store: Arc<dyn SessionStore> = match &config.session.storage_path {
            Some(path) => {
                debug!("Session stored in {}", path);
                Arc::new(FileStore::new(path))
            }
            None => Arc::new(MemoryStore::new()),
        };
        let session = Arc::new(SessionManager::restore(store)?);
        Ok(Self::new(ApiClient::from_config(&config.api, session)?))
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }
}
