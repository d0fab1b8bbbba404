// --- File: crates/courtbook_services/src/booking.rs ---
//! Client-side booking rules.
//!
//! The backend owns availability and pricing; this module only checks a
//! booking form before it is sent and computes the price quote shown to
//! the user.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use courtbook_client::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notes sent when the user leaves the field blank.
pub const DEFAULT_NOTES: &str = "Pay on site";

/// Service fee charged on top of the court price.
pub const SERVICE_FEE_RATE: f64 = 0.10;

/// First and last bookable start hours.
pub const FIRST_SLOT_HOUR: u32 = 8;
pub const LAST_SLOT_HOUR: u32 = 22;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:00";

/// Booking form as filled in by the user. Times are `HH:MM`, the date `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub court_id: Option<u64>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

/// Payload of `POST /reservations/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReservation {
    pub court: u64,
    pub start_datetime: String,
    pub end_datetime: String,
    pub notes: String,
    pub user_email: String,
}

impl NewReservation {
    pub fn duration_hours(&self) -> f64 {
        let parse = |s: &str| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).ok();
        match (parse(&self.start_datetime), parse(&self.end_datetime)) {
            (Some(start), Some(end)) => (end - start).num_minutes() as f64 / 60.0,
            _ => 0.0,
        }
    }
}

impl BookingForm {
    /// Booked hours, or `None` when either time is missing or malformed.
    pub fn duration_hours(&self) -> Option<f64> {
        let start = parse_time(&self.start_time).ok()?;
        let end = parse_time(&self.end_time).ok()?;
        Some((end - start).num_minutes() as f64 / 60.0)
    }

    /// Checks the form and builds the reservation payload for `user_email`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if a field is missing or malformed,
    /// if the end time is not after the start time, or if there is no
    /// signed-in user email.
    pub fn validate(&self, user_email: Option<&str>) -> Result<NewReservation, ApiError> {
        let court = self
            .court_id
            .ok_or_else(|| ApiError::validation("A court must be selected"))?;
        if self.date.trim().is_empty()
            || self.start_time.trim().is_empty()
            || self.end_time.trim().is_empty()
        {
            return Err(ApiError::validation("Please fill in all required fields"));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| ApiError::validation(format!("Invalid date '{}'", self.date)))?;
        let start = parse_time(&self.start_time)?;
        let end = parse_time(&self.end_time)?;
        if end <= start {
            return Err(ApiError::validation("End time must be after start time"));
        }

        let user_email = user_email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ApiError::validation("No signed-in user; please log in again"))?;

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NOTES);

        Ok(NewReservation {
            court,
            start_datetime: date.and_time(start).format(DATETIME_FORMAT).to_string(),
            end_datetime: date.and_time(end).format(DATETIME_FORMAT).to_string(),
            notes: notes.to_string(),
            user_email: user_email.to_string(),
        })
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| ApiError::validation(format!("Invalid time '{}', expected HH:MM", value)))
}

/// Price breakdown for a booking.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Quote {
    pub hours: f64,
    pub court_price: f64,
    pub service_fee: f64,
    pub total: f64,
}

impl Quote {
    pub fn for_duration(price_per_hour: f64, hours: f64) -> Self {
        let court_price = price_per_hour * hours;
        let service_fee = court_price * SERVICE_FEE_RATE;
        Self {
            hours,
            court_price,
            service_fee,
            total: court_price + service_fee,
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Duration:     {:.1} h", self.hours)?;
        writeln!(f, "Court price:  {:.2}", self.court_price)?;
        writeln!(f, "Service fee:  {:.2}", self.service_fee)?;
        write!(f, "Total:        {:.2}", self.total)
    }
}

/// Hourly start times offered by the booking form, 08:00 through 22:00.
pub fn time_slots() -> Vec<NaiveTime> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .collect()
}
