//! Command-line interface for hotelbook.
//!
//! This module provides the CLI structure and the text rendering used by
//! the `hotelbook` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BookingCreateCommand, BookingsCommand, ConfigCommand, OutputFormat, RoleArg, RoomCreateCommand,
    RoomListCommand, RoomTypeArg, RoomUpdateCommand, RoomsCommand, SortArg, StatusArg, StayArgs,
    StoreCommand, UsersCommand,
};

/// hotelbook - Browse rooms, book stays and run the back-office
///
/// A hotel booking service backed by a local snapshot store. Data is seeded
/// on first use and persists between runs.
#[derive(Debug, Parser)]
#[command(name = "hotelbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use a throwaway in-memory store instead of the database file
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and manage rooms
    #[command(subcommand)]
    Rooms(RoomsCommand),

    /// Make and manage bookings
    #[command(subcommand)]
    Bookings(BookingsCommand),

    /// Manage user accounts
    #[command(subcommand)]
    Users(UsersCommand),

    /// Log in (any password; demo accounts always succeed)
    Login {
        /// Account email
        email: String,

        /// Password (not checked)
        #[arg(short, long, default_value = "")]
        password: String,
    },

    /// Log out
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show back-office figures (admin)
    Dashboard {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Inspect or reset the snapshot store
    #[command(subcommand)]
    Store(StoreCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            ephemeral: false,
            command: Command::Whoami,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "hotelbook");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rooms_list_filters() {
        let args = vec![
            "hotelbook",
            "rooms",
            "list",
            "--type",
            "suite",
            "--min-price",
            "200",
            "--amenity",
            "WiFi",
            "--amenity",
            "Balcony",
            "--available",
            "--sort",
            "price",
            "--page",
            "2",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Rooms(RoomsCommand::List(list)) = cli.command else {
            panic!("expected rooms list");
        };
        assert_eq!(list.room_type, Some(RoomTypeArg::Suite));
        assert_eq!(list.min_price, Some(200));
        assert_eq!(list.amenities, vec!["WiFi", "Balcony"]);
        assert!(list.available);
        assert_eq!(list.sort, SortArg::Price);
        assert_eq!(list.page, 2);
        assert_eq!(list.limit, None);
        assert_eq!(list.format, OutputFormat::Table);
    }

    #[test]
    fn test_available_conflicts_with_unavailable() {
        let args = vec!["hotelbook", "rooms", "list", "--available", "--unavailable"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_booking_create() {
        let args = vec![
            "hotelbook",
            "bookings",
            "create",
            "r-123",
            "--check-in",
            "2026-07-01",
            "--check-out",
            "2026-07-04",
            "--guests",
            "2",
            "--first-name",
            "Sarah",
            "--last-name",
            "Davis",
            "--email",
            "sarah@example.com",
            "--phone",
            "555-0100",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Bookings(BookingsCommand::Create(create)) = cli.command else {
            panic!("expected bookings create");
        };
        assert_eq!(create.stay.room_id, "r-123");
        assert_eq!(create.stay.check_in.to_string(), "2026-07-01");
        assert_eq!(create.guests, 2);
        assert!(create.requests.is_none());
    }

    #[test]
    fn test_parse_bad_date() {
        let args = vec![
            "hotelbook",
            "bookings",
            "quote",
            "r-1",
            "--check-in",
            "07/01/2026",
            "--check-out",
            "2026-07-04",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_room_update_availability() {
        let args = vec![
            "hotelbook",
            "rooms",
            "update",
            "r-1",
            "--available",
            "false",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Rooms(RoomsCommand::Update(update)) = cli.command else {
            panic!("expected rooms update");
        };
        assert_eq!(update.available, Some(false));
        assert!(update.amenities.is_none());
    }

    #[test]
    fn test_parse_login_default_password() {
        let args = vec!["hotelbook", "login", "guest@example.com"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Login { ref email, ref password }
                if email == "guest@example.com" && password.is_empty()
        ));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = vec![
            "hotelbook",
            "dashboard",
            "--json",
            "-c",
            "/custom/config.toml",
            "--ephemeral",
            "-vv",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(cli.ephemeral);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Dashboard { json: true }));
    }

    #[test]
    fn test_parse_store_reset() {
        let args = vec!["hotelbook", "store", "reset", "--yes"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Store(StoreCommand::Reset { yes: true })
        ));
    }

    #[test]
    fn test_parse_users_update_role() {
        let args = vec!["hotelbook", "users", "update", "u-1", "--role", "admin"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Users(cmd) = cli.command else {
            panic!("expected users command");
        };
        assert_eq!(
            cmd.user_update().unwrap().role,
            Some(crate::model::UserRole::Admin)
        );
    }
}
