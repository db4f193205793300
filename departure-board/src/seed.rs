//! Departures the board starts with.
//!
//! Either the built-in sample timetable or a JSON file of departures, e.g.
//!
//! ```json
//! [
//!   { "time": "08:30", "line": "L1", "train_number": "1001",
//!     "destination": "Oslo", "track": 1 },
//!   { "time": "10:15", "line": "L3", "train_number": "1003",
//!     "destination": "Trondheim", "delay": "00:30" }
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    ClockTime, Delay, Departure, InvalidTrack, InvalidTrainNumber, RegistryError, TimeError,
    Track, TrainNumber,
};
use crate::registry::DepartureRegistry;

/// Errors from loading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The file could not be read
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a JSON array of departures
    #[error("seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A time or delay field is malformed
    #[error("seed entry {index}: {source}")]
    Time { index: usize, source: TimeError },

    /// A train number is blank
    #[error("seed entry {index}: {source}")]
    TrainNumber {
        index: usize,
        source: InvalidTrainNumber,
    },

    /// A track is out of range
    #[error("seed entry {index}: {source}")]
    Track { index: usize, source: InvalidTrack },

    /// The seed contains a duplicate train number
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One departure as written in a seed file.
#[derive(Debug, Deserialize)]
pub struct DepartureSeed {
    /// Scheduled time in HH:MM format
    pub time: String,

    /// Line identifier (e.g., "L1", "F4")
    pub line: String,

    pub train_number: String,

    pub destination: String,

    /// Track number; missing or -1 means unassigned
    #[serde(default)]
    pub track: Option<i32>,

    /// Delay in HH:MM format; missing means no delay
    #[serde(default)]
    pub delay: Option<String>,
}

impl DepartureSeed {
    /// Validate every field and build the departure. `index` is only used to
    /// point at the offending entry in errors.
    pub fn into_departure(self, index: usize) -> Result<Departure, SeedError> {
        let time = ClockTime::parse_hhmm(&self.time)
            .map_err(|source| SeedError::Time { index, source })?;
        let train_number = TrainNumber::new(self.train_number)
            .map_err(|source| SeedError::TrainNumber { index, source })?;
        let track = Track::from_number(self.track.unwrap_or(Track::UNASSIGNED_NUMBER))
            .map_err(|source| SeedError::Track { index, source })?;

        let mut departure = Departure::new(time, self.line, train_number, self.destination, track);

        if let Some(delay) = self.delay {
            let delay =
                Delay::parse_hhmm(&delay).map_err(|source| SeedError::Time { index, source })?;
            departure.set_delay(delay);
        }

        Ok(departure)
    }
}

/// Parse departures from a JSON string.
pub fn parse_seed(json: &str) -> Result<Vec<Departure>, SeedError> {
    let seeds: Vec<DepartureSeed> = serde_json::from_str(json)?;
    seeds
        .into_iter()
        .enumerate()
        .map(|(index, seed)| seed.into_departure(index))
        .collect()
}

/// Read departures from a JSON seed file.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<Departure>, SeedError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let departures = parse_seed(&json)?;
    debug!(path = %path.display(), count = departures.len(), "Loaded seed file");
    Ok(departures)
}

/// Build a registry from a seed file.
pub fn registry_from_file(path: impl AsRef<Path>) -> Result<DepartureRegistry, SeedError> {
    let departures = load_seed_file(path)?;
    Ok(DepartureRegistry::with_departures(departures)?)
}

/// The built-in sample timetable, with train 1003 running thirty minutes
/// late.
pub fn sample_departures() -> Result<Vec<Departure>, SeedError> {
    const SAMPLE: [(&str, &str, &str, &str, i32, Option<&str>); 5] = [
        ("08:30", "L1", "1001", "Oslo", 1, None),
        ("09:45", "L2", "1002", "Bergen", 2, None),
        ("10:15", "L3", "1003", "Trondheim", -1, Some("00:30")),
        ("11:00", "L1", "1004", "Oslo", 3, None),
        ("12:30", "L2", "1005", "Bergen", -1, None),
    ];

    SAMPLE
        .iter()
        .enumerate()
        .map(|(index, &(time, line, number, destination, track, delay))| {
            DepartureSeed {
                time: time.to_string(),
                line: line.to_string(),
                train_number: number.to_string(),
                destination: destination.to_string(),
                track: Some(track),
                delay: delay.map(str::to_string),
            }
            .into_departure(index)
        })
        .collect()
}

/// A registry holding the sample timetable.
pub fn seeded_registry() -> Result<DepartureRegistry, SeedError> {
    Ok(DepartureRegistry::with_departures(sample_departures()?)?)
}
