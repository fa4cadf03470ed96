//! `hotelbook` - CLI for the hotel booking service
//!
//! This binary opens the snapshot store, runs one command against the
//! booking service and prints the result. A failed service call exits
//! non-zero.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use clap::Parser;

use hotelbook::catalog::{paginate, sort_rooms};
use hotelbook::cli::{
    output, BookingCreateCommand, BookingsCommand, Cli, Command, ConfigCommand, OutputFormat,
    RoomCreateCommand, RoomsCommand, StayArgs, StoreCommand, UsersCommand,
};
use hotelbook::model::{BookingRequest, BookingStatus, Credentials, GuestInfo, NewRoom, User};
use hotelbook::quote::PriceQuote;
use hotelbook::session::{require_admin, require_user};
use hotelbook::validation::validate_booking_form;
use hotelbook::{init_logging, ApiResponse, Config, HotelService, ServiceError, Storage};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config: config_path,
        ephemeral,
        command,
        ..
    } = cli;

    // Config commands must work even when the store cannot be opened.
    let command = match command {
        Command::Config(cmd) => return handle_config(config_path, cmd),
        other => other,
    };

    let config = Config::load_from(config_path).context("failed to load configuration")?;
    let (storage, location) = if ephemeral {
        (Storage::open_in_memory()?, "in-memory".to_string())
    } else {
        let path = config.database_path();
        let storage = Storage::open(&path)
            .with_context(|| format!("failed to open store at {}", path.display()))?;
        (storage, path.display().to_string())
    };
    let mut service = HotelService::open(config, storage)?;

    match command {
        Command::Rooms(cmd) => handle_rooms(&mut service, cmd).await,
        Command::Bookings(cmd) => handle_bookings(&mut service, cmd).await,
        Command::Users(cmd) => handle_users(&mut service, cmd).await,
        Command::Login { email, password } => {
            let user = data(
                service
                    .authenticate(Credentials { email, password })
                    .await,
            )?;
            println!("Logged in as {} ({})", user.name, user.role);
            Ok(())
        }
        Command::Logout => {
            println!("{}", done(service.logout())?);
            Ok(())
        }
        Command::Whoami => {
            match service.get_current_user().data.flatten() {
                Some(user) => println!("{}", output::user_detail(&user)),
                None => println!("Not logged in"),
            }
            Ok(())
        }
        Command::Dashboard { json } => {
            gate(require_admin(&service))?;
            let stats = data(service.get_dashboard_stats().await)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", output::dashboard(&stats));
            }
            Ok(())
        }
        Command::Store(cmd) => handle_store(&mut service, &location, cmd).await,
        Command::Config(_) => unreachable!("handled before the store is opened"),
    }
}

async fn handle_rooms(service: &mut HotelService, cmd: RoomsCommand) -> anyhow::Result<()> {
    match cmd {
        RoomsCommand::List(list) => {
            let filters = list.filters();
            let mut rooms = data(service.get_rooms(Some(&filters)).await)?;
            sort_rooms(&mut rooms, list.sort.into());
            let limit = list.limit.unwrap_or(service.config().catalog.page_size);
            let page = paginate(rooms, list.page, limit);
            match list.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
                OutputFormat::Plain => println!("{}", output::room_lines(&page.items)),
                OutputFormat::Table => println!("{}", output::room_table(&page)),
            }
        }
        RoomsCommand::Show { id, json } => {
            let room = data(service.get_room_by_id(&id).await)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&room)?);
            } else {
                println!("{}", output::room_detail(&room));
            }
        }
        RoomsCommand::Create(create) => {
            gate(require_admin(service))?;
            let room = data(service.create_room(new_room(create)).await)?;
            println!("Room created: {} ({})", room.name, room.id);
        }
        RoomsCommand::Update(update_cmd) => {
            gate(require_admin(service))?;
            let update = update_cmd.update();
            if update.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            let room = data(service.update_room(&update_cmd.id, update).await)?;
            println!("{}", output::room_detail(&room));
        }
        RoomsCommand::Delete { id } => {
            gate(require_admin(service))?;
            println!("{}", done(service.delete_room(&id).await)?);
        }
    }
    Ok(())
}

fn new_room(cmd: RoomCreateCommand) -> NewRoom {
    NewRoom {
        name: cmd.name,
        room_type: cmd.room_type.into(),
        price: cmd.price,
        capacity: cmd.capacity,
        amenities: cmd.amenities,
        images: cmd.images,
        description: cmd.description,
        availability: !cmd.unavailable,
    }
}

async fn handle_bookings(service: &mut HotelService, cmd: BookingsCommand) -> anyhow::Result<()> {
    match cmd {
        BookingsCommand::List {
            mine,
            status,
            format,
        } => {
            let user = gate(require_user(service))?;
            let owner = if mine {
                Some(user.id.as_str())
            } else {
                gate(require_admin(service))?;
                None
            };
            let status: Option<BookingStatus> = status.map(Into::into);
            let bookings: Vec<_> = data(service.get_bookings(owner).await)?
                .into_iter()
                .filter(|b| status.map_or(true, |s| b.status == s))
                .collect();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bookings)?),
                OutputFormat::Plain => println!("{}", output::booking_lines(&bookings)),
                OutputFormat::Table => println!("{}", output::booking_table(&bookings)),
            }
        }
        BookingsCommand::Show { id, json } => {
            let user = gate(require_user(service))?;
            let booking = data(service.get_booking_by_id(&id).await)?;
            check_owner(&user, &booking.user_id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&booking)?);
            } else {
                println!("{}", output::booking_detail(&booking));
            }
        }
        BookingsCommand::Create(create) => {
            let user = gate(require_user(service))?;
            let request = booking_request(create);
            if let Err(errors) = validate_booking_form(&request) {
                bail!("Invalid booking request: {errors}");
            }
            let room = data(service.get_room_by_id(&request.room_id).await)?;
            let booking = data(service.create_booking(&user.id, request).await)?;
            println!("{}", output::booking_detail(&booking));
            println!();
            println!("{}", PriceQuote::new(room.price, booking.nights()));
        }
        BookingsCommand::Quote(stay) => {
            let nights = stay_nights(&stay)?;
            let room = data(service.get_room_by_id(&stay.room_id).await)?;
            println!("{} at ${} / night", room.name, room.price);
            println!("{}", PriceQuote::new(room.price, nights));
        }
        BookingsCommand::Confirm { id } => {
            gate(require_admin(service))?;
            let booking = data(service.confirm_booking(&id).await)?;
            println!("Booking {} is now {}", booking.id, booking.status);
        }
        BookingsCommand::Cancel { id } => {
            let user = gate(require_user(service))?;
            let booking = data(service.get_booking_by_id(&id).await)?;
            check_owner(&user, &booking.user_id)?;
            let booking = data(service.cancel_booking(&id).await)?;
            println!("Booking {} is now {}", booking.id, booking.status);
        }
    }
    Ok(())
}

fn booking_request(cmd: BookingCreateCommand) -> BookingRequest {
    BookingRequest {
        room_id: cmd.stay.room_id,
        check_in: cmd.stay.check_in,
        check_out: cmd.stay.check_out,
        guests: cmd.guests,
        guest_info: GuestInfo {
            first_name: cmd.first_name,
            last_name: cmd.last_name,
            email: cmd.email,
            phone: cmd.phone,
            special_requests: cmd.requests,
        },
    }
}

fn stay_nights(stay: &StayArgs) -> anyhow::Result<u64> {
    let nights = (stay.check_out - stay.check_in).num_days();
    if nights <= 0 {
        bail!("Check-out must be after check-in");
    }
    Ok(u64::try_from(nights)?)
}

async fn handle_users(service: &mut HotelService, cmd: UsersCommand) -> anyhow::Result<()> {
    match &cmd {
        UsersCommand::List { role, format } => {
            gate(require_admin(service))?;
            let users = data(service.get_users(role.map(Into::into)).await)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&users)?),
                OutputFormat::Plain => println!("{}", output::user_lines(&users)),
                OutputFormat::Table => println!("{}", output::user_table(&users)),
            }
        }
        UsersCommand::Show { id, json } => {
            let user = gate(require_user(service))?;
            check_owner(&user, id)?;
            let shown = data(service.get_user_by_id(id).await)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("{}", output::user_detail(&shown));
            }
        }
        UsersCommand::Register { email, name } => {
            let user = data(service.register_user(email, name).await)?;
            println!("Account created: {} ({})", user.email, user.id);
        }
        UsersCommand::Update { id, .. } => {
            gate(require_admin(service))?;
            let update = cmd.user_update().unwrap_or_default();
            let user = data(service.update_user(id, update).await)?;
            println!("{}", output::user_detail(&user));
        }
        UsersCommand::Delete { id } => {
            gate(require_admin(service))?;
            println!("{}", done(service.delete_user(id).await)?);
        }
    }
    Ok(())
}

async fn handle_store(
    service: &mut HotelService,
    location: &str,
    cmd: StoreCommand,
) -> anyhow::Result<()> {
    match cmd {
        StoreCommand::Status { json } => {
            let stats = service.storage().stats()?;
            if json {
                let status = serde_json::json!({
                    "location": location,
                    "keys": service.storage().keys()?,
                    "stats": stats,
                });
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{}", output::store_status(location, &stats));
            }
        }
        StoreCommand::Reset { yes } => {
            if !yes {
                println!("This will delete all rooms, bookings and users and reseed demo data.");
                println!("Use --yes to confirm.");
                return Ok(());
            }
            println!("{}", done(service.reset().await)?);
        }
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Service]");
                println!("  Latency (ms):       {}", config.service.latency_ms);
                println!("  Seed on empty:      {}", config.service.seed_on_empty);
                println!(
                    "  RNG seed:           {}",
                    config
                        .service
                        .rng_seed
                        .map_or_else(|| "random".to_string(), |s| s.to_string())
                );
                println!();
                println!("[Auth]");
                println!(
                    "  Demo accounts:      {}",
                    config.auth.demo_accounts.join(", ")
                );
                println!(
                    "  Random success rate: {}",
                    config.auth.random_success_rate
                );
                println!();
                println!("[Booking]");
                println!("  Pricing policy:     {}", config.booking.pricing_policy);
                println!();
                println!("[Catalog]");
                println!("  Page size:          {}", config.catalog.page_size);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration error")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

/// Unwrap a successful envelope's payload.
fn data<T>(response: ApiResponse<T>) -> anyhow::Result<T> {
    match response.into_result() {
        Ok(Some(data)) => Ok(data),
        Ok(None) => Err(anyhow!("service returned no data")),
        Err((error, message)) => Err(anyhow!("{error}: {message}")),
    }
}

/// Unwrap a successful envelope's message.
fn done<T>(response: ApiResponse<T>) -> anyhow::Result<String> {
    let message = response.message.clone().unwrap_or_default();
    response
        .into_result()
        .map_err(|(error, message)| anyhow!("{error}: {message}"))?;
    Ok(message)
}

fn gate(result: Result<User, ServiceError>) -> anyhow::Result<User> {
    result.map_err(|e| anyhow!("{e}: {}", e.message()))
}

/// Non-admins may only touch what they own.
fn check_owner(user: &User, owner_id: &str) -> anyhow::Result<()> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    } else {
        gate(Err(ServiceError::Forbidden)).map(|_| ())
    }
}
