//! Terminal rendering

use courtbook_common::{Context, CourtbookError};
use courtbook_services::models::{Court, Reservation, Site};
use courtbook_services::UsageStats;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CourtbookError> {
    let rendered = serde_json::to_string_pretty(value).context("could not render output")?;
    println!("{}", rendered);
    Ok(())
}

pub fn print_sites(sites: &[Site]) {
    if sites.is_empty() {
        println!("No sites found");
        return;
    }
    println!("{:>5}  {:<30} {:<20} {:>6}", "ID", "NAME", "CITY", "COURTS");
    for site in sites {
        println!(
            "{:>5}  {:<30} {:<20} {:>6}",
            site.id,
            truncate(&site.name, 30),
            truncate(site.city.as_deref().unwrap_or("-"), 20),
            site.courts_count.map_or("-".to_string(), |c| c.to_string())
        );
    }
}

pub fn print_courts(courts: &[Court]) {
    if courts.is_empty() {
        println!("No courts found");
        return;
    }
    println!(
        "{:>5}  {:<25} {:<12} {:<25} {:>10}",
        "ID", "NAME", "SPORT", "SITE", "PRICE/H"
    );
    for court in courts {
        println!(
            "{:>5}  {:<25} {:<12} {:<25} {:>10.2}",
            court.id,
            truncate(&court.name, 25),
            court.sport_type.as_deref().unwrap_or("-"),
            truncate(court.site_label().unwrap_or("-"), 25),
            court.price_per_hour
        );
    }
}

pub fn print_reservations(reservations: &[Reservation]) {
    if reservations.is_empty() {
        println!("No reservations");
        return;
    }
    println!(
        "{:>5}  {:<25} {:<20} {:<20} {:<10} {:>9}",
        "ID", "COURT", "START", "END", "STATUS", "AMOUNT"
    );
    for r in reservations {
        println!(
            "{:>5}  {:<25} {:<20} {:<20} {:<10} {:>9.2}",
            r.id,
            truncate(&r.court_label(), 25),
            short_timestamp(r, &r.start_datetime, true),
            short_timestamp(r, &r.end_datetime, false),
            format!("{:?}", r.status).to_uppercase(),
            r.total_amount
        );
    }
}

pub fn print_stats(stats: &UsageStats) {
    println!("Total bookings:    {}", stats.total_bookings);
    println!("Total spent:       {:.2}", stats.total_spent);
    println!("Hours booked:      {:.1}", stats.hours_booked);
    println!(
        "Favourite sport:   {}",
        stats.favourite_sport.as_deref().unwrap_or("-")
    );
    println!("Upcoming:          {}", stats.upcoming_bookings);
    println!("Cancelled:         {}", stats.cancelled_bookings);
    println!("Past:              {}", stats.past_bookings());
    println!();
    let peak = stats.monthly.iter().map(|m| m.count).max().unwrap_or(0).max(1);
    for month in &stats.monthly {
        let bar = "#".repeat(month.count * 20 / peak);
        println!("{} {:>4}  {:<20} {}", month.label, month.year, bar, month.count);
    }
}

fn short_timestamp(reservation: &Reservation, raw: &str, start: bool) -> String {
    let parsed = if start {
        reservation.start()
    } else {
        reservation.end()
    };
    parsed
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}
