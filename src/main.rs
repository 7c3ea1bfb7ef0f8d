//! Dentbook CLI
//!
//! Command-line interface for clinic bookings:
//! - List bookings
//! - Reschedule a booking
//! - Cancel a booking
//! - Show selectable time slots

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use dentbook::config::{generate_default_config, Config};
use dentbook::schedule::{format_appointment, format_day_heading, parse_date_input, TimeSlot};
use dentbook::{
    Booking, BookingMutations, ClinicTimeZone, HttpBookingApi, QueryCache, StaticSession, Toast,
};

#[derive(Parser)]
#[command(name = "dentbook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage dental clinic bookings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Bearer token (overrides config and DENTBOOK_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List bookings
    List,

    /// Move a booking to another date and time
    Reschedule {
        /// Booking id
        id: String,
        /// New date: YYYY-MM-DD, today, tomorrow, 3d or 1w
        #[arg(short, long)]
        date: String,
        /// New time slot (HH:MM)
        #[arg(short, long)]
        time: String,
    },

    /// Cancel a booking
    Cancel {
        /// Booking id
        id: String,
    },

    /// Show the selectable time slots
    Slots {
        /// Date to show the slots for (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let template = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, template)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Wrote default config to {:?}", path);
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    let (config_path, mut config) = match &cli.config {
        Some(path) => (Some(path.clone()), Config::load_with_env(path)?),
        None => match Config::load_first(&Config::default_paths())? {
            Some((path, config)) => (Some(path), config),
            None => (None, Config::from_env()?),
        },
    };
    if let Some(token) = cli.token.clone() {
        config.session.token = Some(token);
    }

    dentbook::logging::init(&config.logging);
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    let zone = config.schedule.timezone;
    let mutations = BookingMutations::new(
        Arc::new(HttpBookingApi::new(config.client_config())),
        Arc::new(StaticSession::from_option(config.session.token.clone())),
        QueryCache::new(config.cache_config()),
        zone,
    );
    let today = zone.localize(Utc::now()).date();

    match cli.command {
        Commands::List => {
            let bookings = mutations
                .bookings()
                .await
                .context("Failed to fetch bookings")?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(bookings.as_slice())?);
            } else {
                print_bookings(&bookings, zone);
            }
        }

        Commands::Reschedule { id, date, time } => {
            let date = parse_date_input(&date, today)?;
            let slot = TimeSlot::parse(&time)?;
            if !config.schedule.slots.contains(&slot) {
                bail!("{} is not a selectable time slot (see `dentbook slots`)", slot);
            }

            let booking = find_booking(&mutations, &id).await?;
            let mut editor = mutations.editor(booking);
            editor.toggle_edit();
            editor.select_date(date);
            editor.select_slot(slot);

            let result = editor.confirm(&mutations).await;
            let toast = Toast::for_reschedule(&result);
            println!("{}", toast.message);

            if let Err(e) = result {
                tracing::debug!(error = %e, "Reschedule did not go through");
                std::process::exit(1);
            }
            println!(
                "{} is now at {}",
                id,
                format_appointment(editor.current_local())
            );
        }

        Commands::Cancel { id } => {
            let booking = find_booking(&mutations, &id).await?;
            let mut editor = mutations.editor(booking);

            let result = editor.delete(&mutations).await;
            println!("{}", Toast::for_cancel(&result).message);

            if result.is_err() {
                std::process::exit(1);
            }
        }

        Commands::Slots { date } => {
            let date = match date {
                Some(input) => parse_date_input(&input, today)?,
                None => today,
            };

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&config.schedule.slots)?);
            } else {
                println!("Time for {}", format_day_heading(date));
                for slot in &config.schedule.slots {
                    println!("  {}", slot);
                }
            }
        }

        Commands::Config { .. } => unreachable!("handled before config load"),
    }

    Ok(())
}

async fn find_booking(mutations: &BookingMutations, id: &str) -> anyhow::Result<Booking> {
    mutations
        .find_booking(id)
        .await
        .context("Failed to fetch bookings")?
        .with_context(|| format!("Booking {} not found", id))
}

fn print_bookings(bookings: &[Booking], zone: ClinicTimeZone) {
    if bookings.is_empty() {
        println!("No bookings.");
        return;
    }

    println!("{:<26} {:<20} {:<20} {}", "ID", "Owner", "Dentist", "Date");
    println!("{}", "-".repeat(90));

    for booking in bookings {
        println!(
            "{:<26} {:<20} {:<20} {}",
            booking.id,
            booking.user.name,
            booking.dentist_name().unwrap_or("-"),
            format_appointment(zone.localize(booking.appt_date))
        );
    }
}
