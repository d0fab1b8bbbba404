// --- File: crates/courtbook_services/src/sites.rs ---
use courtbook_client::{endpoints, ApiClient, ApiError, Method, ToQuery};
use std::sync::Arc;
use tracing::info;

use crate::api::{fetch_list, fetch_one, send_json};
use crate::filters::SiteFilter;
use crate::models::{OpeningHours, Site, SiteInput};

/// Venues and their opening hours. Writes need a manager or admin account.
#[derive(Debug, Clone)]
pub struct SitesService {
    client: Arc<ApiClient>,
}

impl SitesService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &SiteFilter) -> Result<Vec<Site>, ApiError> {
        fetch_list(&self.client, endpoints::SITES, Some(&filter.to_query())).await
    }

    pub async fn retrieve(&self, id: u64) -> Result<Site, ApiError> {
        fetch_one(&self.client, &endpoints::detail(endpoints::SITES, id), None).await
    }

    pub async fn opening_hours(&self, id: u64) -> Result<Vec<OpeningHours>, ApiError> {
        let endpoint = endpoints::detail_action(endpoints::SITES, id, "opening_hours");
        fetch_list(&self.client, &endpoint, None).await
    }

    pub async fn create(&self, site: &SiteInput) -> Result<Site, ApiError> {
        validate(site)?;
        let created: Site = send_json(&self.client, Method::POST, endpoints::SITES, site).await?;
        info!("Site {} created", created.id);
        Ok(created)
    }

    pub async fn update(&self, id: u64, site: &SiteInput) -> Result<Site, ApiError> {
        validate(site)?;
        let endpoint = endpoints::detail(endpoints::SITES, id);
        send_json(&self.client, Method::PUT, &endpoint, site).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&endpoints::detail(endpoints::SITES, id))
            .await?;
        info!("Site {} deleted", id);
        Ok(())
    }

    /// Creates or replaces the hours of each listed day; other days are kept.
    /// Returns the site's full schedule.
    pub async fn set_opening_hours(
        &self,
        id: u64,
        hours: &[OpeningHours],
    ) -> Result<Vec<OpeningHours>, ApiError> {
        if let Some(bad) = hours.iter().find(|h| h.day_of_week > 6) {
            return Err(ApiError::validation(format!(
                "day_of_week must be 0-6, got {}",
                bad.day_of_week
            )));
        }
        let endpoint = endpoints::detail_action(endpoints::SITES, id, "set_opening_hours");
        send_json(&self.client, Method::POST, &endpoint, hours).await
    }
}

fn validate(site: &SiteInput) -> Result<(), ApiError> {
    if site.name.trim().is_empty() {
        return Err(ApiError::validation("Site name is required"));
    }
    Ok(())
}
