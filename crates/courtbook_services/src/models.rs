// --- File: crates/courtbook_services/src/models.rs ---
//! Resource shapes exchanged with the booking backend.
//!
//! The backend serves several serializers per resource (list, detail,
//! nested summaries), so every model is lenient: fields that only some
//! serializers emit are optional or defaulted, and decimal amounts are
//! accepted either as JSON numbers or as strings.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Lenient decimal fields: `"25.00"`, `25`, `25.5`, `""` and `null` are all accepted.
pub mod decimal {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    /// Missing or empty values read as `0.0`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(option::deserialize(deserializer)?.unwrap_or(0.0))
    }

    pub mod option {
        use super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<Raw>::deserialize(deserializer)? {
                None => Ok(None),
                Some(Raw::Number(n)) => Ok(Some(n)),
                Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
                Some(Raw::Text(s)) => s
                    .trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("invalid decimal '{}'", s))),
            }
        }
    }
}

/// Parses a backend timestamp into local wall-clock time.
///
/// RFC 3339 values keep their own offset's wall clock; naive values are
/// taken as-is.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

// --- Auth ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<u64>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// "First Last", falling back to the email when both names are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub password_confirm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<u64>,
    pub gdpr_consent: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegisterResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Partial profile update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// `{"message": ...}` acknowledgements.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// --- Sites ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<u64>,
    /// 0 is Monday.
    pub day_of_week: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_name: Option<String>,
    pub open_time: String,
    pub close_time: String,
}

impl OpeningHours {
    /// Hours for `day_of_week`, as sent when setting a site's schedule.
    pub fn new(day_of_week: u8, open_time: impl Into<String>, close_time: impl Into<String>) -> Self {
        Self {
            day_of_week,
            open_time: open_time.into(),
            close_time: close_time.into(),
            ..Default::default()
        }
    }
}

/// Body of a site create or full update.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SiteInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Site {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "decimal::option::deserialize")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "decimal::option::deserialize")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub courts_count: Option<u32>,
    #[serde(default)]
    pub opening_hours: Vec<OpeningHours>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A site as referenced from a court: a bare id or an embedded summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SiteRef {
    Id(u64),
    Summary(Box<Site>),
}

impl SiteRef {
    pub fn id(&self) -> u64 {
        match self {
            SiteRef::Id(id) => *id,
            SiteRef::Summary(site) => site.id,
        }
    }
}

// --- Courts ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Body of a court create or full update.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CourtInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sport_type: String,
    pub site: u64,
    pub price_per_hour: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Court {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sport_type: Option<String>,
    #[serde(default)]
    pub sport_type_name: Option<String>,
    #[serde(default)]
    pub site: Option<SiteRef>,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub price_per_hour: f64,
    #[serde(default)]
    pub equipments: Vec<Equipment>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Court {
    /// Site name from whichever serializer produced this court.
    pub fn site_label(&self) -> Option<&str> {
        self.site_name.as_deref().or(match &self.site {
            Some(SiteRef::Summary(site)) if !site.name.is_empty() => Some(site.name.as_str()),
            _ => None,
        })
    }
}

/// A court as referenced from a reservation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CourtRef {
    Id(u64),
    Summary(Box<Court>),
}

impl CourtRef {
    pub fn id(&self) -> u64 {
        match self {
            CourtRef::Id(id) => *id,
            CourtRef::Summary(court) => court.id,
        }
    }
}

/// Answer of the per-court availability check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Availability {
    #[serde(default)]
    pub court_id: Option<u64>,
    pub is_available: bool,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "decimal::option::deserialize")]
    pub price_per_hour: Option<f64>,
}

// --- Reservations ---

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Reservation {
    pub id: u64,
    #[serde(default)]
    pub user: Option<u64>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub court: Option<CourtRef>,
    #[serde(default)]
    pub court_name: Option<String>,
    #[serde(default)]
    pub court_details: Option<Court>,
    #[serde(default)]
    pub start_datetime: String,
    #[serde(default)]
    pub end_datetime: String,
    #[serde(default, deserialize_with = "decimal::option::deserialize")]
    pub price_per_hour: Option<f64>,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub total_amount: f64,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub can_cancel: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Reservation {
    pub fn start(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.start_datetime)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.end_datetime)
    }

    /// Booked hours; zero when either bound is unreadable.
    pub fn duration_hours(&self) -> f64 {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => (end - start).num_seconds() as f64 / 3600.0,
            _ => 0.0,
        }
    }

    fn court_summary(&self) -> Option<&Court> {
        self.court_details.as_ref().or(match &self.court {
            Some(CourtRef::Summary(court)) => Some(court.as_ref()),
            _ => None,
        })
    }

    /// Sport code of the booked court, when the payload embeds it.
    pub fn sport_type(&self) -> Option<&str> {
        self.court_summary()
            .and_then(|c| c.sport_type.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Best available human label for the booked court.
    pub fn court_label(&self) -> String {
        if let Some(name) = self.court_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match (self.court_summary(), &self.court) {
            (Some(court), _) if !court.name.is_empty() => court.name.clone(),
            (_, Some(court)) => format!("Court #{}", court.id()),
            _ => "Unknown court".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CancelResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reservation: Option<Reservation>,
}

/// Answer of the reservation-level availability check.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityCheck {
    pub court_id: u64,
    pub is_available: bool,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub price_per_hour: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteStats {
    #[serde(default)]
    pub total_reservations: u64,
    #[serde(default)]
    pub confirmed_reservations: u64,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub occupancy_rate: f64,
}

// --- Payments ---

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
    Refunded,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Stripe,
    Paypal,
    Card,
    Transfer,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: u64,
    #[serde(default)]
    pub reservation: Option<u64>,
    #[serde(default)]
    pub reservation_details: Option<Reservation>,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub transaction_reference: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentIntent {
    pub payment_intent_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: u64,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub pdf_file: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Where to fetch an invoice PDF.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceDownload {
    pub url: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
}
