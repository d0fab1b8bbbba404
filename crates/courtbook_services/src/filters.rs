// --- File: crates/courtbook_services/src/filters.rs ---
//! Typed query filters, one per list endpoint.
//!
//! Each filter names exactly the parameters its endpoint understands and
//! lowers into [`QueryParams`]. Unset fields are simply not sent.

use courtbook_client::{QueryParams, ToQuery};

/// `GET /courts/courts/`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourtFilter {
    /// Free text over court name, description and site name.
    pub search: Option<String>,
    pub sport_type: Option<String>,
    pub site: Option<u64>,
    pub is_active: Option<bool>,
    /// Field name, `-` prefix for descending (`price_per_hour`, `-created_at`).
    pub ordering: Option<String>,
    pub page: Option<u32>,
}

impl CourtFilter {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn sport(mut self, sport_type: impl Into<String>) -> Self {
        self.sport_type = Some(sport_type.into());
        self
    }

    pub fn site(mut self, site_id: u64) -> Self {
        self.site = Some(site_id);
        self
    }
}

impl ToQuery for CourtFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("search", self.search.as_deref())
            .with("sport_type", self.sport_type.as_deref())
            .with("site", self.site)
            .with("is_active", self.is_active)
            .with("ordering", self.ordering.as_deref())
            .with("page", self.page)
    }
}

/// `GET /sites/`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteFilter {
    pub search: Option<String>,
    pub city: Option<String>,
    pub is_active: Option<bool>,
    pub ordering: Option<String>,
    pub page: Option<u32>,
}

impl ToQuery for SiteFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("search", self.search.as_deref())
            .with("city", self.city.as_deref())
            .with("is_active", self.is_active)
            .with("ordering", self.ordering.as_deref())
            .with("page", self.page)
    }
}

/// `GET /reservations/`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationFilter {
    pub status: Option<String>,
    /// Restricts to one site (`court__site`).
    pub site: Option<u64>,
    pub user_email: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<u32>,
}

impl ToQuery for ReservationFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("status", self.status.as_deref())
            .with("court__site", self.site)
            .with("user_email", self.user_email.as_deref())
            .with("search", self.search.as_deref())
            .with("ordering", self.ordering.as_deref())
            .with("page", self.page)
    }
}

/// `GET /payments/payments/`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentFilter {
    pub status: Option<String>,
    pub method: Option<String>,
    pub user_email: Option<String>,
    pub page: Option<u32>,
}

impl ToQuery for PaymentFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("status", self.status.as_deref())
            .with("method", self.method.as_deref())
            .with("user_email", self.user_email.as_deref())
            .with("page", self.page)
    }
}

/// `GET /courts/courts/{id}/availability/`
///
/// Both bounds are ISO-8601 datetimes as the backend parses them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityWindow {
    pub start: String,
    pub end: String,
}

impl AvailabilityWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl ToQuery for AvailabilityWindow {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("start", self.start.as_str())
            .with("end", self.end.as_str())
    }
}
