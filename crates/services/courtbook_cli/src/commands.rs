//! CLI commands

use chrono::Local;
use clap::{ArgGroup, Subcommand};
use courtbook_common::{logging, validation_error, CourtbookError};
use courtbook_services::models::{ProfileUpdate, RegisterRequest};
use courtbook_services::{
    time_slots, BookingForm, CourtFilter, Courtbook, Quote, ReservationFilter, SiteFilter,
    UsageStats,
};
use tracing::info;

use crate::output;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account (sign in afterwards with `login`)
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
        /// Consent to personal data processing
        #[arg(long)]
        accept_terms: bool,
    },

    /// Update your name or phone number
    #[command(group(
        ArgGroup::new("changes")
            .required(true)
            .multiple(true)
            .args(["first_name", "last_name", "phone"])
    ))]
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Sign out (revokes the refresh token, then forgets the session)
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List venues
    Sites {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },

    /// List courts
    Courts {
        /// Free text over court and site names
        #[arg(long)]
        search: Option<String>,
        /// Sport code, e.g. TENNIS or PADEL
        #[arg(long)]
        sport: Option<String>,
        /// Site id
        #[arg(long)]
        site: Option<u64>,
    },

    /// Show one court
    Court { id: u64 },

    /// Show the bookable start times
    Slots,

    /// Price a booking without making it
    Quote {
        #[arg(long)]
        court: u64,
        /// Start time, HH:MM
        #[arg(long)]
        start: String,
        /// End time, HH:MM
        #[arg(long)]
        end: String,
    },

    /// Book a court
    Book {
        #[arg(long)]
        court: u64,
        /// Date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Start time, HH:MM
        #[arg(long)]
        start: String,
        /// End time, HH:MM
        #[arg(long)]
        end: String,
        #[arg(long)]
        notes: Option<String>,
    },

    /// List reservations
    Reservations {
        /// Only the signed-in user's reservations
        #[arg(long, conflicts_with = "status")]
        mine: bool,
        /// Status filter, e.g. CONFIRMED
        #[arg(long)]
        status: Option<String>,
    },

    /// Cancel a reservation
    Cancel {
        id: u64,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Usage statistics over your reservations
    Stats,

    /// Change your password
    Password {
        #[arg(long)]
        old: String,
        #[arg(long = "new")]
        new_password: String,
    },

    /// Delete your account
    DeleteAccount {
        #[arg(long)]
        password: String,
    },
}

impl Commands {
    pub async fn execute(self, app: &Courtbook) -> Result<(), CourtbookError> {
        match self {
            Commands::Login { email, password } => {
                let response = logging::log_result(
                    app.auth.login(&email, &password).await,
                    "Login succeeded",
                    "Login failed",
                )?;
                if !app.client().is_authenticated() {
                    return Err(CourtbookError::AuthError(
                        response
                            .message
                            .unwrap_or_else(|| "login did not return a session".to_string()),
                    ));
                }
                let name = response
                    .user
                    .map(|u| u.display_name())
                    .unwrap_or(email);
                println!("Signed in as {}", name);
            }
            Commands::Register {
                email,
                password,
                confirm,
                first_name,
                last_name,
                phone,
                accept_terms,
            } => {
                let request = RegisterRequest {
                    email,
                    first_name,
                    last_name,
                    phone,
                    password,
                    password_confirm: confirm,
                    role: None,
                    gdpr_consent: accept_terms,
                };
                let response = app.auth.register(&request).await?;
                println!(
                    "{}",
                    response
                        .message
                        .unwrap_or_else(|| format!("Account created for {}", request.email))
                );
            }
            Commands::Profile {
                first_name,
                last_name,
                phone,
            } => {
                let update = ProfileUpdate {
                    first_name,
                    last_name,
                    phone,
                };
                let user = app.auth.update_profile(&update).await?;
                println!("Profile updated: {} <{}>", user.display_name(), user.email);
                if let Some(phone) = user.phone {
                    println!("Phone: {}", phone);
                }
            }
            Commands::Logout => {
                app.auth.logout().await;
                println!("Signed out");
            }
            Commands::Whoami => {
                if !app.client().is_authenticated() {
                    println!("Not signed in");
                    return Ok(());
                }
                let user = app.auth.me().await?;
                println!("{} <{}>", user.display_name(), user.email);
                if let Some(role) = user.role_name {
                    println!("Role: {}", role);
                }
            }
            Commands::Sites { search, city } => {
                let filter = SiteFilter {
                    search,
                    city,
                    ..Default::default()
                };
                output::print_sites(&app.sites.list(&filter).await?);
            }
            Commands::Courts {
                search,
                sport,
                site,
            } => {
                let filter = CourtFilter {
                    search,
                    sport_type: sport.map(|s| s.to_uppercase()),
                    site,
                    ..Default::default()
                };
                output::print_courts(&app.courts.list(&filter).await?);
            }
            Commands::Court { id } => {
                output::print_json(&app.courts.retrieve(id).await?)?;
            }
            Commands::Slots => {
                let slots: Vec<String> = time_slots()
                    .iter()
                    .map(|t| t.format("%H:%M").to_string())
                    .collect();
                println!("{}", slots.join("  "));
            }
            Commands::Quote { court, start, end } => {
                let form = BookingForm {
                    court_id: Some(court),
                    start_time: start,
                    end_time: end,
                    ..Default::default()
                };
                let hours = form
                    .duration_hours()
                    .filter(|h| *h > 0.0)
                    .ok_or_else(|| validation_error("end time must be after start time (HH:MM)"))?;
                let court = app.courts.retrieve(court).await?;
                println!("{} ({:.2} per hour)", court.name, court.price_per_hour);
                println!("{}", Quote::for_duration(court.price_per_hour, hours));
            }
            Commands::Book {
                court,
                date,
                start,
                end,
                notes,
            } => {
                let form = BookingForm {
                    court_id: Some(court),
                    date,
                    start_time: start,
                    end_time: end,
                    notes,
                };
                let reservation = app.reservations.book(&form).await?;
                info!("Booked reservation {}", reservation.id);
                println!(
                    "Reservation #{} {} ({}): {} - {}, total {:.2}",
                    reservation.id,
                    reservation.court_label(),
                    reservation.status_name.as_deref().unwrap_or("pending"),
                    reservation.start_datetime,
                    reservation.end_datetime,
                    reservation.total_amount
                );
            }
            Commands::Reservations { mine, status } => {
                let reservations = if mine {
                    app.reservations.my_reservations().await?
                } else {
                    let filter = ReservationFilter {
                        status: status.map(|s| s.to_uppercase()),
                        ..Default::default()
                    };
                    app.reservations.list(&filter).await?
                };
                output::print_reservations(&reservations);
            }
            Commands::Cancel { id, reason } => {
                let response = app.reservations.cancel(id, reason.as_deref()).await?;
                println!(
                    "{}",
                    response
                        .message
                        .unwrap_or_else(|| format!("Reservation #{} cancelled", id))
                );
            }
            Commands::Stats => {
                let reservations = app.reservations.my_reservations().await?;
                let stats = UsageStats::from_reservations(&reservations, Local::now().naive_local());
                output::print_stats(&stats);
            }
            Commands::Password { old, new_password } => {
                let response = app.auth.change_password(&old, &new_password).await?;
                println!(
                    "{}",
                    response.message.unwrap_or_else(|| "Password changed".to_string())
                );
            }
            Commands::DeleteAccount { password } => {
                let response = app.auth.delete_account(&password).await?;
                println!(
                    "{}",
                    response.message.unwrap_or_else(|| "Account deleted".to_string())
                );
            }
        }
        Ok(())
    }
}
