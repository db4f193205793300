//! Domain types for the departure board.
//!
//! Value types validate on construction, so the registry and its callers can
//! pass them around without re-checking.

mod departure;
mod error;
mod time;
mod track;
mod train_number;

pub use departure::{Departure, TABLE_HEADER, TABLE_RULE};
pub use error::RegistryError;
pub use time::{ClockTime, Delay, TimeError};
pub use track::{InvalidTrack, Track};
pub use train_number::{InvalidTrainNumber, TrainNumber};
