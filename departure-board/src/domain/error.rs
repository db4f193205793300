//! Registry error types.
//!
//! These are the rejections a registry operation can signal. Each one leaves
//! the registry exactly as it was before the call.

use super::{ClockTime, TrainNumber};

/// Errors returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A departure with this train number is already on the board
    #[error("a departure with train number {0} already exists")]
    DuplicateTrainNumber(TrainNumber),

    /// No departure has this train number
    #[error("no departure with train number {0}")]
    NotFound(TrainNumber),

    /// The clock was asked to move backwards
    #[error("cannot set the clock back from {current} to {requested}")]
    TimeGoesBackwards {
        current: ClockTime,
        requested: ClockTime,
    },
}
