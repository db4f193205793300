//! Board configuration, read from the environment.

use std::path::PathBuf;

use crate::domain::{ClockTime, RegistryError, TimeError};
use crate::registry::DepartureRegistry;
use crate::seed::{self, SeedError};

/// Environment variable naming a JSON seed file.
pub const SEED_VAR: &str = "DEPARTURE_BOARD_SEED";

/// Environment variable holding the starting clock time (HH:MM).
pub const START_VAR: &str = "DEPARTURE_BOARD_START";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "departure_board=info";

/// Errors building the board from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The start time is not HH:MM
    #[error("DEPARTURE_BOARD_START: {0}")]
    StartTime(#[from] TimeError),

    /// The seed file could not be loaded
    #[error("DEPARTURE_BOARD_SEED: {0}")]
    Seed(#[from] SeedError),

    /// The start time could not be applied
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// How the board starts up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardConfig {
    /// JSON seed file. `None` means the built-in sample timetable.
    pub seed_path: Option<PathBuf>,

    /// Clock reading to start from. Departures that have already left by
    /// then are purged at startup.
    pub start_time: ClockTime,
}

impl BoardConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps variable names to
    /// values. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let seed_path = get(SEED_VAR).map(PathBuf::from);
        let start_time = match get(START_VAR) {
            Some(value) => ClockTime::parse_hhmm(value.trim())?,
            None => ClockTime::midnight(),
        };

        Ok(Self {
            seed_path,
            start_time,
        })
    }

    /// Build the registry this configuration describes.
    pub fn build_registry(&self) -> Result<DepartureRegistry, ConfigError> {
        let mut registry = match &self.seed_path {
            Some(path) => seed::registry_from_file(path)?,
            None => seed::seeded_registry()?,
        };
        registry.advance_clock(self.start_time)?;
        Ok(registry)
    }
}
