//! Operator command shell.
//!
//! Turns one line of operator input into a [`Command`], runs it against a
//! registry and renders the result as text. The binary owns the actual
//! terminal; this module never reads or writes it.

use std::iter;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::domain::{
    ClockTime, Delay, Departure, RegistryError, TABLE_HEADER, TABLE_RULE, Track, TrainNumber,
};
use crate::registry::DepartureRegistry;

/// Errors from parsing or running a command.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The line is not a valid command
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// The registry rejected the operation
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One line of operator input.
#[derive(Parser, Debug)]
#[command(
    name = "board",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "Commands:\n{subcommands}"
)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

/// A parsed operator command.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show all departures
    #[command(alias = "ls")]
    List,

    /// Add a departure with no track assigned
    Add {
        /// Scheduled time (HH:MM)
        time: ClockTime,
        /// Line identifier, e.g. L1
        line: String,
        train_number: TrainNumber,
        #[arg(required = true, num_args = 1..)]
        destination: Vec<String>,
    },

    /// Assign a track (-1 to unassign)
    #[command(name = "track")]
    AssignTrack {
        train_number: TrainNumber,
        #[arg(allow_negative_numbers = true, value_parser = parse_track)]
        track: Track,
    },

    /// Register a delay (HH:MM)
    #[command(name = "delay")]
    RegisterDelay {
        train_number: TrainNumber,
        delay: Delay,
    },

    /// Show one departure
    Find { train_number: TrainNumber },

    /// Show departures to a destination
    #[command(name = "dest")]
    Destination {
        #[arg(required = true, num_args = 1..)]
        destination: Vec<String>,
    },

    /// Advance the clock and remove departed trains
    Clock { time: ClockTime },

    /// Show the current time
    Now,

    /// Show departures after the current time
    Upcoming,

    /// Leave
    #[command(alias = "exit")]
    Quit,
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Show this text to the operator.
    Text(String),
    /// Stop reading commands.
    Quit,
}

fn parse_track(s: &str) -> Result<Track, String> {
    let number: i32 = s
        .parse()
        .map_err(|_| format!("track must be a whole number, got `{s}`"))?;
    Track::from_number(number).map_err(|e| e.to_string())
}

impl Command {
    /// Parse one line of input. Returns `Ok(None)` for a blank line. The
    /// command word is case-insensitive.
    pub fn parse_line(line: &str) -> Result<Option<Self>, ShellError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };

        let args = iter::once(keyword.to_ascii_lowercase()).chain(words.map(str::to_string));
        let parsed = CommandLine::try_parse_from(args)?;
        Ok(Some(parsed.command))
    }
}

/// Run a command against the registry.
pub fn execute(registry: &mut DepartureRegistry, command: Command) -> Result<Reply, ShellError> {
    debug!(?command, "Executing command");

    let text = match command {
        Command::List => render_table(registry.list_all()),
        Command::Add {
            time,
            line,
            train_number,
            destination,
        } => {
            let destination = destination.join(" ");
            let reply = format!("Departure {train_number} added.");
            registry.add(Departure::new(
                time,
                line,
                train_number,
                destination,
                Track::Unassigned,
            ))?;
            reply
        }
        Command::AssignTrack {
            train_number,
            track,
        } => {
            registry.assign_track(&train_number, track)?;
            match track {
                Track::Unassigned => format!("Track cleared for {train_number}."),
                Track::Assigned(n) => format!("Track {n} assigned to {train_number}."),
            }
        }
        Command::RegisterDelay {
            train_number,
            delay,
        } => {
            registry.register_delay(&train_number, delay)?;
            format!("Delay {delay} registered for {train_number}.")
        }
        Command::Find { train_number } => registry
            .find_by_train_number(&train_number)
            .map(Departure::details)
            .ok_or(RegistryError::NotFound(train_number))?,
        Command::Destination { destination } => {
            let destination = destination.join(" ");
            let found = registry.find_by_destination(&destination);
            if found.is_empty() {
                format!("No departures to {destination}.")
            } else {
                render_details(&found)
            }
        }
        Command::Clock { time } => {
            registry.advance_clock(time)?;
            format!("Clock set to {time}. Departures before {time} removed.")
        }
        Command::Now => format!("Current time: {}", registry.current_time()),
        Command::Upcoming => {
            let upcoming = registry.upcoming();
            if upcoming.is_empty() {
                format!("No departures after {}.", registry.current_time())
            } else {
                render_details(&upcoming)
            }
        }
        Command::Quit => return Ok(Reply::Quit),
    };

    Ok(Reply::Text(text))
}

/// Parse and run one line. Blank lines produce an empty reply; `help` and
/// `--help` reply with the generated command summary.
pub fn run_line(registry: &mut DepartureRegistry, line: &str) -> Result<Reply, ShellError> {
    match Command::parse_line(line) {
        Ok(Some(command)) => execute(registry, command),
        Ok(None) => Ok(Reply::Text(String::new())),
        Err(ShellError::Cli(e))
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            Ok(Reply::Text(e.to_string().trim_end().to_string()))
        }
        Err(e) => Err(e),
    }
}

/// Departures as a framed fixed-width table.
pub fn render_table(departures: &[Departure]) -> String {
    [TABLE_RULE, TABLE_HEADER, TABLE_RULE]
        .map(String::from)
        .into_iter()
        .chain(departures.iter().map(Departure::table_row))
        .chain(iter::once(TABLE_RULE.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_details(departures: &[&Departure]) -> String {
    departures
        .iter()
        .map(|d| d.details())
        .collect::<Vec<_>>()
        .join("\n\n")
}
