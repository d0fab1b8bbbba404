// --- File: crates/courtbook_services/src/analytics.rs ---
//! Usage statistics computed locally from a user's reservations.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{Reservation, ReservationStatus};

/// Sport label used when a reservation does not say which sport it was for.
pub const UNKNOWN_SPORT: &str = "Other";

/// Number of calendar months covered by [`UsageStats::monthly`].
pub const MONTHS_TRACKED: u32 = 6;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    /// Short English month name, e.g. `"Jun"`.
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UsageStats {
    pub total_bookings: usize,
    pub total_spent: f64,
    pub hours_booked: f64,
    /// Most frequently booked sport; `None` when there are no bookings.
    pub favourite_sport: Option<String>,
    /// Confirmed bookings starting after `now`.
    pub upcoming_bookings: usize,
    pub cancelled_bookings: usize,
    /// Oldest month first, ending with the month of `now`.
    pub monthly: Vec<MonthlyCount>,
}

impl UsageStats {
    pub fn from_reservations(reservations: &[Reservation], now: NaiveDateTime) -> Self {
        let total_spent = reservations.iter().map(|r| r.total_amount).sum();
        let hours_booked = reservations
            .iter()
            .map(|r| r.duration_hours().max(0.0))
            .sum();

        let upcoming_bookings = reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Confirmed)
            .filter(|r| r.start().is_some_and(|start| start > now))
            .count();
        let cancelled_bookings = reservations
            .iter()
            .filter(|r| r.status == ReservationStatus::Cancelled)
            .count();

        Self {
            total_bookings: reservations.len(),
            total_spent,
            hours_booked,
            favourite_sport: favourite_sport(reservations),
            upcoming_bookings,
            cancelled_bookings,
            monthly: monthly_counts(reservations, now.date()),
        }
    }

    /// Bookings that are neither upcoming nor cancelled.
    pub fn past_bookings(&self) -> usize {
        self.total_bookings
            .saturating_sub(self.upcoming_bookings)
            .saturating_sub(self.cancelled_bookings)
    }
}

// Ties go to the sport that was seen first.
fn favourite_sport(reservations: &[Reservation]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for reservation in reservations {
        let sport = reservation.sport_type().unwrap_or(UNKNOWN_SPORT);
        match counts.iter_mut().find(|(name, _)| *name == sport) {
            Some((_, count)) => *count += 1,
            None => counts.push((sport, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (sport, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((sport, count));
        }
    }
    best.map(|(sport, _)| sport.to_string())
}

fn monthly_counts(reservations: &[Reservation], today: NaiveDate) -> Vec<MonthlyCount> {
    let starts: Vec<NaiveDate> = reservations
        .iter()
        .filter_map(|r| r.start())
        .map(|start| start.date())
        .collect();

    (0..MONTHS_TRACKED)
        .rev()
        .map(|back| {
            let (year, month) = months_before(today.year(), today.month(), back);
            let label = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b").to_string())
                .unwrap_or_default();
            let count = starts
                .iter()
                .filter(|d| d.year() == year && d.month() == month)
                .count();
            MonthlyCount {
                year,
                month,
                label,
                count,
            }
        })
        .collect()
}

fn months_before(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
