// --- File: crates/courtbook_services/src/reservations.rs ---
use courtbook_client::{endpoints, ApiClient, ApiError, Method, QueryParams, ToQuery};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::api::{fetch_list, fetch_one, send_json};
use crate::booking::{BookingForm, NewReservation};
use crate::filters::ReservationFilter;
use crate::models::{AvailabilityCheck, CancelResponse, Reservation, SiteStats};

/// Reservation lifecycle: listing, booking, cancelling.
#[derive(Debug, Clone)]
pub struct ReservationsService {
    client: Arc<ApiClient>,
}

impl ReservationsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>, ApiError> {
        fetch_list(&self.client, endpoints::RESERVATIONS, Some(&filter.to_query())).await
    }

    pub async fn retrieve(&self, id: u64) -> Result<Reservation, ApiError> {
        fetch_one(&self.client, &endpoints::detail(endpoints::RESERVATIONS, id), None).await
    }

    pub async fn create(&self, reservation: &NewReservation) -> Result<Reservation, ApiError> {
        let created: Reservation =
            send_json(&self.client, Method::POST, endpoints::RESERVATIONS, reservation).await?;
        info!(
            "Reservation {} created for court {} ({} - {})",
            created.id, reservation.court, reservation.start_datetime, reservation.end_datetime
        );
        Ok(created)
    }

    /// Validates `form` against the signed-in user and creates the reservation.
    ///
    /// Nothing is sent when validation fails.
    pub async fn book(&self, form: &BookingForm) -> Result<Reservation, ApiError> {
        let user = self.client.current_user();
        let email = user
            .as_ref()
            .and_then(|u| u.get("email"))
            .and_then(Value::as_str);
        let reservation = form.validate(email)?;
        self.create(&reservation).await
    }

    /// Reservations of the signed-in user.
    pub async fn my_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        fetch_list(&self.client, endpoints::MY_RESERVATIONS, None).await
    }

    pub async fn cancel(&self, id: u64, reason: Option<&str>) -> Result<CancelResponse, ApiError> {
        let endpoint = endpoints::detail_action(endpoints::RESERVATIONS, id, "cancel");
        let body = json!({ "reason": reason.unwrap_or_default() });
        let response = send_json(&self.client, Method::POST, &endpoint, &body).await?;
        info!("Reservation {} cancelled", id);
        Ok(response)
    }

    /// Asks the backend whether `court_id` is free between `start` and `end`.
    pub async fn check_availability(
        &self,
        court_id: u64,
        start: &str,
        end: &str,
    ) -> Result<AvailabilityCheck, ApiError> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(ApiError::validation("court_id, start and end are required"));
        }
        let body = json!({ "court_id": court_id, "start": start, "end": end });
        send_json(&self.client, Method::POST, endpoints::CHECK_AVAILABILITY, &body).await
    }

    /// Booking figures for one site. Managers and admins only.
    pub async fn site_stats(&self, site_id: u64) -> Result<SiteStats, ApiError> {
        let query = QueryParams::new().with("site_id", site_id);
        fetch_one(&self.client, endpoints::SITE_STATS, Some(&query)).await
    }
}
