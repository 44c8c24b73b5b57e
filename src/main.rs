//! StudySpot command line front end.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use dotenv::dotenv;
use studyspot_app::AppState;
use studyspot_app::config::AppConfig;
use studyspot_app::handlers::{auth, booking, dashboard, space};
use studyspot_core::availability::{BookingRequest, SlotSelection, SlotState};
use studyspot_core::errors::BookingError;
use studyspot_core::format::{format_date, format_price, format_time};
use studyspot_core::models::{Booking, BookingId, Space, SpaceId};
use studyspot_core::time::parse_date;
use tracing_subscriber::FmtSubscriber;

/// Browse study spaces and book time slots
#[derive(Parser, Debug)]
#[command(name = "studyspot")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List spaces
    Spaces {
        /// Only spaces whose name or location contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a space and its slots for a day
    Show {
        space_id: SpaceId,
        /// Day to check (YYYY-MM-DD, defaults to today)
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
    },
    /// Sign in
    Login { username: String, password: String },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// Book a slot
    Book {
        space_id: SpaceId,
        /// Day to book (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_day)]
        date: Option<NaiveDate>,
        /// Slot label, or its position in the space's list
        #[arg(short, long)]
        slot: Option<SlotSelection>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Cancel one of your bookings
    Cancel { booking_id: BookingId },
    /// Show your current, past and cancelled bookings
    Bookings,
}

fn parse_day(text: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(text).ok_or_else(|| format!("expected YYYY-MM-DD, got {text:?}"))
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut state = AppState::from_config(&config)?;

    match run(&mut state, args.command) {
        Err(e) if e.is_user_error() => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        result => Ok(result?),
    }
}

fn run(state: &mut AppState, command: Command) -> Result<(), BookingError> {
    match command {
        Command::Spaces { search } => {
            let spaces = space::search_spaces(state, search.as_deref().unwrap_or(""));
            if spaces.is_empty() {
                println!("No spaces match.");
            }
            for space in spaces {
                print_space_line(space);
            }
        }
        Command::Show { space_id, date } => {
            let viewer = auth::current_user(state).cloned();
            let detail = space::space_detail(state, space_id, date, viewer.as_ref())?;
            let s = &detail.space;

            println!("{} ({})", s.name, s.location);
            if !s.description.is_empty() {
                println!("{}", s.description);
            }
            if !s.hours.is_empty() {
                println!("Hours: {}", s.hours);
            }
            println!("Price: {}", format_price(s.price));
            if !s.amenities.is_empty() {
                println!("Amenities: {}", s.amenities.join(", "));
            }

            println!("\nSlots for {}:", format_date(detail.date));
            for slot in &detail.slots {
                let status = match slot.state {
                    SlotState::Available => "available",
                    SlotState::Booked => "booked",
                    SlotState::Past => "past",
                };
                println!("  [{}] {:<24} {}", slot.index, slot.label, status);
            }

            if !detail.upcoming.is_empty() {
                println!("\nYour upcoming bookings here:");
                for b in &detail.upcoming {
                    print_booking_line(b);
                }
            }
        }
        Command::Login { username, password } => {
            let user = auth::login(state, &username, &password)?;
            println!("Signed in as {}.", user.username);
        }
        Command::Logout => {
            auth::logout(state)?;
            println!("Signed out.");
        }
        Command::Whoami => match auth::current_user(state) {
            Some(user) => println!("{} ({})", user.username, user.name),
            None => println!("Not signed in."),
        },
        Command::Book {
            space_id,
            date,
            slot,
            notes,
        } => {
            let user = auth::require_user(state)?;
            let request = BookingRequest { date, slot, notes };
            let b = booking::submit_booking(state, &user, space_id, &request)?;
            println!(
                "Booked {} on {}, {} for {}. Booking id {}.",
                b.space_name,
                format_date(b.date),
                b.time_slot,
                format_price(b.price),
                b.id
            );
        }
        Command::Cancel { booking_id } => {
            let user = auth::require_user(state)?;
            match dashboard::cancel_booking(state, &user, booking_id)? {
                Some(record) => println!(
                    "Cancelled booking {} at {}.",
                    record.booking.id,
                    format_time(record.cancelled_at)
                ),
                None => println!("No booking {booking_id} to cancel."),
            }
        }
        Command::Bookings => {
            let user = auth::require_user(state)?;
            let view = dashboard::dashboard(state, &user);
            if view.is_empty() {
                println!("No bookings yet.");
                return Ok(());
            }

            println!("Current:");
            view.current.iter().for_each(print_booking_line);
            println!("Past:");
            view.past.iter().for_each(print_booking_line);
            println!("Cancelled:");
            for record in &view.cancelled {
                print_booking_line(&record.booking);
            }
        }
    }
    Ok(())
}

fn print_space_line(space: &Space) {
    let rating = space
        .rating
        .map(|r| format!("  {r:.1}★"))
        .unwrap_or_default();
    println!(
        "{:>3}  {:<24} {:<32} {}{}",
        space.id,
        space.name,
        space.location,
        format_price(space.price),
        rating
    );
}

fn print_booking_line(b: &Booking) {
    println!(
        "  #{} {} - {} - {}",
        b.id,
        b.space_name,
        format_date(b.date),
        b.time_slot
    );
}
