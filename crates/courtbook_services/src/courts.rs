// --- File: crates/courtbook_services/src/courts.rs ---
use courtbook_client::{endpoints, ApiClient, ApiError, Method, ToQuery};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::{fetch_list, fetch_one, send_json};
use crate::filters::{AvailabilityWindow, CourtFilter};
use crate::models::{Availability, Court, CourtInput, Equipment};

/// Courts and their equipment. Writes need a manager or admin account.
#[derive(Debug, Clone)]
pub struct CourtsService {
    client: Arc<ApiClient>,
}

impl CourtsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &CourtFilter) -> Result<Vec<Court>, ApiError> {
        fetch_list(&self.client, endpoints::COURTS, Some(&filter.to_query())).await
    }

    pub async fn retrieve(&self, id: u64) -> Result<Court, ApiError> {
        fetch_one(&self.client, &endpoints::detail(endpoints::COURTS, id), None).await
    }

    /// Asks the backend whether court `id` is free during `window`.
    ///
    /// # Errors
    ///
    /// `ApiError::Validation` without a network call when either bound is empty.
    pub async fn availability(
        &self,
        id: u64,
        window: &AvailabilityWindow,
    ) -> Result<Availability, ApiError> {
        if window.start.trim().is_empty() || window.end.trim().is_empty() {
            return Err(ApiError::validation("Both start and end are required"));
        }
        let endpoint = endpoints::detail_action(endpoints::COURTS, id, "availability");
        let availability: Availability =
            fetch_one(&self.client, &endpoint, Some(&window.to_query())).await?;
        debug!(
            "Court {} available {}..{}: {}",
            id, window.start, window.end, availability.is_available
        );
        Ok(availability)
    }

    pub async fn equipments(&self) -> Result<Vec<Equipment>, ApiError> {
        fetch_list(&self.client, endpoints::EQUIPMENTS, None).await
    }

    pub async fn create(&self, court: &CourtInput) -> Result<Court, ApiError> {
        validate(court)?;
        let created: Court = send_json(&self.client, Method::POST, endpoints::COURTS, court).await?;
        info!("Court {} created on site {}", created.id, court.site);
        Ok(created)
    }

    pub async fn update(&self, id: u64, court: &CourtInput) -> Result<Court, ApiError> {
        validate(court)?;
        let endpoint = endpoints::detail(endpoints::COURTS, id);
        send_json(&self.client, Method::PUT, &endpoint, court).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&endpoints::detail(endpoints::COURTS, id))
            .await?;
        info!("Court {} deleted", id);
        Ok(())
    }
}

fn validate(court: &CourtInput) -> Result<(), ApiError> {
    if court.name.trim().is_empty() || court.sport_type.trim().is_empty() {
        return Err(ApiError::validation("Court name and sport type are required"));
    }
    if !court.price_per_hour.is_finite() || court.price_per_hour < 0.0 {
        return Err(ApiError::validation("price_per_hour must be zero or more"));
    }
    Ok(())
}
