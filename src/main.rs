//! Frontdesk CLI
//!
//! Text front end for the hotel administration services:
//! - Dashboard summary
//! - Room, reservation, guest and bill listings with search and status filters
//! - Create, update and delete for every entity
//! - Default config generation

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frontdesk::aggregate::{Aggregator, BillView, DashboardSummary, GuestDetail, ReservationView, RoomView};
use frontdesk::calc;
use frontdesk::config::{generate_default_config, Config, LoggingConfig};
use frontdesk::models::{
    BillInput, Guest, GuestInput, GuestUpdate, PaymentStatus, ReservationInput, ReservationStatus,
    ReservationUpdate, Room, RoomInput, RoomStatus, RoomUpdate,
};
use frontdesk::session::ViewSession;
use frontdesk::store::ListFilter;

#[derive(Parser)]
#[command(name = "frontdesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hotel administration dashboard for the room, reservation, guest and billing services")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: user config dir, /etc/frontdesk, ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show occupancy, guest, reservation and billing statistics
    Dashboard,

    /// Manage rooms
    #[command(subcommand)]
    Rooms(RoomCommand),

    /// Manage reservations
    #[command(subcommand)]
    Reservations(ReservationCommand),

    /// Manage guests
    #[command(subcommand)]
    Guests(GuestCommand),

    /// Manage bills
    #[command(subcommand)]
    Bills(BillCommand),

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum RoomCommand {
    /// List rooms
    List {
        /// Match room number, type or status
        #[arg(short, long)]
        search: Option<String>,
        /// available, reserved, occupied or maintenance
        #[arg(long)]
        status: Option<RoomStatus>,
    },
    /// List rooms open for booking
    Available,
    /// Add a room
    Create {
        #[arg(long)]
        number: String,
        #[arg(long = "type")]
        room_type: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "available")]
        status: RoomStatus,
    },
    /// Change a room
    Update {
        id: i64,
        #[arg(long)]
        number: Option<String>,
        #[arg(long = "type")]
        room_type: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        status: Option<RoomStatus>,
    },
    /// Remove a room
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ReservationCommand {
    /// List reservations
    List {
        /// Match guest, room, dates or status
        #[arg(short, long)]
        search: Option<String>,
        /// confirmed, checked-in, checked-out or cancelled
        #[arg(long)]
        status: Option<ReservationStatus>,
    },
    /// Book a room for a guest
    Create {
        #[arg(long)]
        guest: i64,
        #[arg(long)]
        room: i64,
        /// YYYY-MM-DD
        #[arg(long)]
        check_in: NaiveDate,
        /// YYYY-MM-DD
        #[arg(long)]
        check_out: NaiveDate,
        #[arg(long, default_value = "confirmed")]
        status: ReservationStatus,
    },
    /// Change a reservation
    Update {
        id: i64,
        #[arg(long)]
        guest: Option<i64>,
        #[arg(long)]
        room: Option<i64>,
        #[arg(long)]
        check_in: Option<NaiveDate>,
        #[arg(long)]
        check_out: Option<NaiveDate>,
        #[arg(long)]
        status: Option<ReservationStatus>,
    },
    /// Remove a reservation
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum GuestCommand {
    /// List guests
    List {
        /// Match id, name, email or phone
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Guest detail with loyalty info and reviews
    Show { id: i64 },
    /// Register a guest
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    /// Change a guest
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Remove a guest
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum BillCommand {
    /// List bills with their reservations
    List {
        /// Match bill id, amount, guest or room
        #[arg(short, long)]
        search: Option<String>,
        /// pending, paid or cancelled
        #[arg(long)]
        status: Option<PaymentStatus>,
    },
    /// List reservations a bill can be raised against
    Billable,
    /// Raise a bill for a reservation
    Create {
        #[arg(long)]
        reservation: i64,
        /// Defaults to nights times the nightly rate
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long, default_value = "pending")]
        status: PaymentStatus,
    },
    /// Set the payment status of a bill
    Status { id: i64, status: PaymentStatus },
    /// Remove a bill
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_tracing(&config.logging);

    let aggregator = Aggregator::from_config(&config.services)?;
    let mut session = ViewSession::new(aggregator);

    // Ctrl-C closes the view and cancels whatever is in flight
    let scope = session.scope();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            scope.close();
        }
    });

    let format = cli.format;
    match cli.command {
        Commands::Dashboard => {
            let summary = session.dashboard().await?;
            if format == OutputFormat::Json {
                return print_json(&summary);
            }
            print_dashboard(&summary);
        }
        Commands::Rooms(command) => run_rooms(&mut session, command, format).await?,
        Commands::Reservations(command) => run_reservations(&mut session, command, format).await?,
        Commands::Guests(command) => run_guests(&mut session, command, format).await?,
        Commands::Bills(command) => run_bills(&mut session, command, format).await?,
        Commands::Config { output } => write_config(output)?,
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("frontdesk={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_rooms(
    session: &mut ViewSession,
    command: RoomCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        RoomCommand::List { search, status } => {
            session.refresh_rooms().await.context("Failed to load rooms")?;
            let filter = ListFilter::new()
                .text(search.unwrap_or_default())
                .maybe_status(status);
            let rooms = session.rooms().apply_filter(&filter);
            match format {
                OutputFormat::Json => print_json(&rooms)?,
                OutputFormat::Table => print_rooms(&rooms),
            }
        }
        RoomCommand::Available => {
            let rooms = session
                .available_rooms()
                .await
                .context("Failed to load available rooms")?;
            match format {
                OutputFormat::Json => print_json(&rooms)?,
                OutputFormat::Table => print_available_rooms(&rooms),
            }
        }
        RoomCommand::Create {
            number,
            room_type,
            price,
            status,
        } => {
            if price < 0.0 {
                bail!("Price per night cannot be negative");
            }
            let room = session
                .create_room(&RoomInput {
                    room_number: number,
                    room_type,
                    price_per_night: price,
                    status,
                })
                .await
                .context("Failed to create room")?;
            println!("Created room {} (id {})", room.room_number, room.id);
        }
        RoomCommand::Update {
            id,
            number,
            room_type,
            price,
            status,
        } => {
            let room = session
                .update_room(
                    id,
                    &RoomUpdate {
                        room_number: number,
                        room_type,
                        price_per_night: price,
                        status,
                    },
                )
                .await
                .context("Failed to update room")?;
            println!("Updated room {} (id {})", room.room_number, room.id);
        }
        RoomCommand::Delete { id } => {
            session.delete_room(id).await.context("Failed to delete room")?;
            println!("Deleted room {}", id);
        }
    }
    Ok(())
}

async fn run_reservations(
    session: &mut ViewSession,
    command: ReservationCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        ReservationCommand::List { search, status } => {
            session
                .refresh_reservations()
                .await
                .context("Failed to load reservations")?;
            let filter = ListFilter::new()
                .text(search.unwrap_or_default())
                .maybe_status(status);
            let reservations = session.reservations().apply_filter(&filter);
            match format {
                OutputFormat::Json => print_json(&reservations)?,
                OutputFormat::Table => print_reservations(&reservations),
            }
        }
        ReservationCommand::Create {
            guest,
            room,
            check_in,
            check_out,
            status,
        } => {
            let reservation = session
                .create_reservation(&ReservationInput {
                    guest_id: guest,
                    room_id: room,
                    check_in_date: check_in,
                    check_out_date: check_out,
                    status,
                })
                .await
                .context("Failed to create reservation")?;
            println!("Created reservation {}", reservation.id);
        }
        ReservationCommand::Update {
            id,
            guest,
            room,
            check_in,
            check_out,
            status,
        } => {
            let reservation = session
                .update_reservation(
                    id,
                    &ReservationUpdate {
                        guest_id: guest,
                        room_id: room,
                        check_in_date: check_in,
                        check_out_date: check_out,
                        status,
                    },
                )
                .await
                .context("Failed to update reservation")?;
            println!("Updated reservation {} ({})", reservation.id, reservation.status);
        }
        ReservationCommand::Delete { id } => {
            session
                .delete_reservation(id)
                .await
                .context("Failed to delete reservation")?;
            println!("Deleted reservation {}", id);
        }
    }
    Ok(())
}

async fn run_guests(
    session: &mut ViewSession,
    command: GuestCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        GuestCommand::List { search } => {
            session.refresh_guests().await.context("Failed to load guests")?;
            let filter = ListFilter::new().text(search.unwrap_or_default());
            let guests = session.guests().apply_filter(&filter);
            match format {
                OutputFormat::Json => print_json(&guests)?,
                OutputFormat::Table => print_guests(&guests),
            }
        }
        GuestCommand::Show { id } => {
            let detail = session
                .guest_detail(id)
                .await
                .context("Failed to load guest")?;
            match format {
                OutputFormat::Json => print_json(&detail)?,
                OutputFormat::Table => print_guest_detail(&detail),
            }
        }
        GuestCommand::Create {
            name,
            email,
            phone,
            address,
        } => {
            let guest = session
                .create_guest(&GuestInput {
                    full_name: name,
                    email,
                    phone,
                    address,
                })
                .await
                .context("Failed to create guest")?;
            println!("Created guest {} (id {})", guest.full_name, guest.id);
        }
        GuestCommand::Update {
            id,
            name,
            email,
            phone,
            address,
        } => {
            let guest = session
                .update_guest(
                    id,
                    &GuestUpdate {
                        full_name: name,
                        email,
                        phone,
                        address,
                    },
                )
                .await
                .context("Failed to update guest")?;
            println!("Updated guest {} (id {})", guest.full_name, guest.id);
        }
        GuestCommand::Delete { id } => {
            session.delete_guest(id).await.context("Failed to delete guest")?;
            println!("Deleted guest {}", id);
        }
    }
    Ok(())
}

async fn run_bills(
    session: &mut ViewSession,
    command: BillCommand,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match command {
        BillCommand::List { search, status } => {
            session.refresh_bills().await.context("Failed to load bills")?;
            let filter = ListFilter::new()
                .text(search.unwrap_or_default())
                .maybe_status(status);
            let bills = session.bills().apply_filter(&filter);
            match format {
                OutputFormat::Json => print_json(&bills)?,
                OutputFormat::Table => print_bills(&bills),
            }
        }
        BillCommand::Billable => {
            let reservations: Vec<ReservationView> = session
                .billable_reservations()
                .await
                .context("Failed to load reservations")?
                .into_iter()
                .map(ReservationView::from)
                .collect();
            let rows: Vec<&ReservationView> = reservations.iter().collect();
            match format {
                OutputFormat::Json => print_json(&rows)?,
                OutputFormat::Table => print_reservations(&rows),
            }
        }
        BillCommand::Create {
            reservation,
            amount,
            status,
        } => {
            let amount = match amount {
                Some(amount) => amount,
                None => session
                    .suggest_bill_amount(reservation)
                    .await
                    .context("Failed to load reservation")?
                    .with_context(|| {
                        format!(
                            "No room rate known for reservation {}, pass --amount",
                            reservation
                        )
                    })?,
            };
            let bill = session
                .create_bill(&BillInput {
                    reservation_id: reservation,
                    total_amount: amount,
                    payment_status: status,
                })
                .await
                .context("Failed to create bill")?;
            println!(
                "Created bill {} for {}",
                bill.id,
                calc::format_money(bill.total_amount)
            );
        }
        BillCommand::Status { id, status } => {
            let bill = session
                .set_payment_status(id, status)
                .await
                .context("Failed to update bill")?;
            println!("Bill {} is now {}", bill.id, bill.payment_status);
        }
        BillCommand::Delete { id } => {
            session.delete_bill(id).await.context("Failed to delete bill")?;
            println!("Deleted bill {}", id);
        }
    }
    Ok(())
}

fn print_dashboard(summary: &DashboardSummary) {
    let rooms = summary.room_stats.value();
    let guests = summary.guest_stats.value();
    let reservations = summary.reservation_stats.value();
    let billing = summary.billing_stats.value();

    println!("Frontdesk v{}", env!("CARGO_PKG_VERSION"));
    let degraded = summary.degraded_feeds();
    if !degraded.is_empty() {
        println!("(showing sample data for: {})", degraded.join(", "));
    }
    println!();

    println!("Rooms:        {} total, {} available", rooms.total_rooms, rooms.available_rooms);
    println!(
        "Guests:       {} total, {} new this month, {} returning",
        guests.total_guests, guests.new_guests_this_month, guests.returning_guests
    );
    println!(
        "Reservations: {} total, {} active, {} upcoming",
        reservations.total_reservations,
        reservations.active_reservations,
        reservations.upcoming_reservations
    );
    println!(
        "Billing:      {} revenue, {} pending payments",
        calc::format_revenue(billing.total_revenue),
        billing.pending_payments
    );

    println!();
    println!("Occupancy: {:.1}% occupied", summary.occupancy_rate);
    for slice in &summary.occupancy {
        println!("  {:<12} {:>4} {:>6.1}%", slice.label, slice.count, slice.percent);
    }

    println!();
    println!("Revenue:");
    for month in summary.monthly_revenue.value() {
        println!("  {:<6} {:>12}", month.month, calc::format_revenue(month.revenue));
    }

    println!();
    println!("Recent activity:");
    let now = Utc::now();
    for entry in summary.recent_activity.value() {
        println!(
            "  {:<20} {:<6} {:<12} {}",
            entry.guest_name,
            entry.room_number,
            entry.action,
            calc::relative_time(entry.timestamp, now)
        );
    }
}

fn print_rooms(rooms: &[&RoomView]) {
    if rooms.is_empty() {
        println!("No rooms found.");
        return;
    }

    println!(
        "{:<6} {:<8} {:<16} {:>10} {:<12} {}",
        "ID", "Number", "Type", "Rate", "Status", "Rating"
    );
    println!("{}", "-".repeat(70));
    for view in rooms {
        let room = &view.room;
        let rating = match view.average_rating {
            Some(avg) => format!("{:.1} ({} reviews)", avg, view.review_count),
            None => "No reviews".to_string(),
        };
        println!(
            "{:<6} {:<8} {:<16} {:>10} {:<12} {}",
            room.id,
            room.room_number,
            room.room_type,
            calc::format_money(room.price_per_night),
            calc::capitalize(room.status.as_str()),
            rating
        );
    }
}

fn print_available_rooms(rooms: &[Room]) {
    if rooms.is_empty() {
        println!("No rooms available.");
        return;
    }

    println!("{:<6} {:<8} {:<16} {:>10}", "ID", "Number", "Type", "Rate");
    println!("{}", "-".repeat(44));
    for room in rooms {
        println!(
            "{:<6} {:<8} {:<16} {:>10}",
            room.id,
            room.room_number,
            room.room_type,
            calc::format_money(room.price_per_night)
        );
    }
}

fn print_reservations(reservations: &[&ReservationView]) {
    if reservations.is_empty() {
        println!("No reservations found.");
        return;
    }

    println!(
        "{:<6} {:<20} {:<8} {:<10} {:<10} {:<10} {:>10} {}",
        "ID", "Guest", "Room", "Check-in", "Check-out", "Nights", "Total", "Status"
    );
    println!("{}", "-".repeat(92));
    for view in reservations {
        let r = &view.reservation;
        println!(
            "{:<6} {:<20} {:<8} {:<10} {:<10} {:<10} {:>10} {}",
            r.id,
            r.guest_name().unwrap_or("Unknown Guest"),
            r.room_number().unwrap_or("N/A"),
            r.check_in_date.format("%Y-%m-%d"),
            r.check_out_date.format("%Y-%m-%d"),
            calc::format_nights(view.nights),
            view.total_price
                .map(calc::format_money)
                .unwrap_or_else(|| "N/A".to_string()),
            calc::capitalize(r.status.as_str())
        );
    }
}

fn print_guests(guests: &[&Guest]) {
    if guests.is_empty() {
        println!("No guests found.");
        return;
    }

    println!("{:<6} {:<24} {:<28} {}", "ID", "Name", "Email", "Phone");
    println!("{}", "-".repeat(76));
    for guest in guests {
        println!(
            "{:<6} {:<24} {:<28} {}",
            guest.id, guest.full_name, guest.email, guest.phone
        );
    }
}

fn print_guest_detail(detail: &GuestDetail) {
    let guest = &detail.guest;
    println!("{} (id {})", guest.full_name, guest.id);
    println!("  Email:   {}", guest.email);
    println!("  Phone:   {}", guest.phone);
    println!("  Address: {}", guest.address);

    println!();
    match (&guest.loyalty_info, detail.loyalty_available) {
        (Some(loyalty), true) => {
            println!("Loyalty: {} tier, {} points", loyalty.tier, loyalty.points);
            if let Some(since) = loyalty.member_since {
                println!("  Member since {}", since.format("%Y-%m-%d"));
            }
            for reward in &loyalty.rewards {
                println!("  - {} ({} points)", reward.name, reward.points_required);
            }
        }
        _ => println!("Loyalty: no loyalty info available"),
    }

    println!();
    if !detail.reviews_available {
        println!("Reviews: could not be loaded");
    } else if detail.reviews.is_empty() {
        println!("Reviews: none");
    } else {
        println!("Reviews:");
        for review in &detail.reviews {
            let rating = review.overall_rating.min(5) as usize;
            println!(
                "  {}{} {} {}",
                "★".repeat(rating),
                "☆".repeat(5 - rating),
                review.review_date.format("%Y-%m-%d"),
                review
                    .room
                    .as_ref()
                    .map(|r| format!("room {}", r.room_number))
                    .unwrap_or_default()
            );
            if let Some(content) = &review.content {
                println!("    {}", content);
            }
        }
    }
}

fn print_bills(bills: &[&BillView]) {
    if bills.is_empty() {
        println!("No bills found.");
        return;
    }

    println!(
        "{:<6} {:<20} {:<8} {:>10} {:<10} {}",
        "ID", "Guest", "Room", "Amount", "Status", "Generated"
    );
    println!("{}", "-".repeat(76));
    for view in bills {
        println!(
            "{:<6} {:<20} {:<8} {:>10} {:<10} {}",
            view.bill.id,
            view.guest_name().unwrap_or("N/A"),
            view.room_number().unwrap_or("N/A"),
            calc::format_money(view.bill.total_amount),
            calc::capitalize(view.bill.payment_status.as_str()),
            view.bill.generated_at.format("%Y-%m-%d %H:%M")
        );
    }
}
