//! A single scheduled departure.

use super::{ClockTime, Delay, Track, TrainNumber};

/// Column header matching [`Departure::table_row`].
pub const TABLE_HEADER: &str =
    "| Departure  | Line | Train | Destination  | Delay      | Track |";

/// Horizontal rule framing the departure table.
pub const TABLE_RULE: &str =
    "+------------+------+-------+--------------+------------+-------+";

/// One train departure on the board.
///
/// The record itself does not check anything: train number uniqueness is the
/// registry's job, and the field types already rule out malformed times,
/// delays and tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    departure_time: ClockTime,
    line: String,
    train_number: TrainNumber,
    destination: String,
    track: Track,
    delay: Delay,
}

impl Departure {
    /// Create a departure with no delay.
    pub fn new(
        departure_time: ClockTime,
        line: impl Into<String>,
        train_number: TrainNumber,
        destination: impl Into<String>,
        track: Track,
    ) -> Self {
        Self {
            departure_time,
            line: line.into(),
            train_number,
            destination: destination.into(),
            track,
            delay: Delay::ZERO,
        }
    }

    /// Scheduled departure time.
    pub fn departure_time(&self) -> ClockTime {
        self.departure_time
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn train_number(&self) -> &TrainNumber {
        &self.train_number
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn delay(&self) -> Delay {
        self.delay
    }

    pub fn set_track(&mut self, track: Track) {
        self.track = track;
    }

    /// Replace the registered delay. Delays do not accumulate.
    pub fn set_delay(&mut self, delay: Delay) {
        self.delay = delay;
    }

    /// When the train actually leaves: scheduled time plus delay, wrapping
    /// within the day.
    pub fn effective_time(&self) -> ClockTime {
        self.departure_time.delayed_by(self.delay)
    }

    /// Case-insensitive destination match.
    pub fn goes_to(&self, destination: &str) -> bool {
        self.destination.to_lowercase() == destination.to_lowercase()
    }

    /// Fixed-width table row, framed by [`TABLE_HEADER`] and [`TABLE_RULE`].
    ///
    /// The delay column is blank when there is no delay and the track column
    /// shows `-` until a track is assigned.
    pub fn table_row(&self) -> String {
        let delay = if self.delay.is_zero() {
            String::new()
        } else {
            self.delay.to_string()
        };
        let track = match self.track {
            Track::Unassigned => "-".to_string(),
            Track::Assigned(n) => format!("{n:2}"),
        };

        format!(
            "| {:<10} | {:<4} | {:<5} | {:<12} | {:<10} | {:>5} |",
            self.departure_time.to_string(),
            self.line,
            self.train_number.as_str(),
            self.destination,
            delay,
            track
        )
    }

    /// Multi-line description of every field.
    pub fn details(&self) -> String {
        let track = match self.track {
            Track::Unassigned => "unassigned".to_string(),
            Track::Assigned(n) => n.to_string(),
        };
        let delay = if self.delay.is_zero() {
            "no delay".to_string()
        } else {
            self.delay.to_string()
        };

        [
            format!("Departure time: {}", self.departure_time),
            format!("Line: {}", self.line),
            format!("Train number: {}", self.train_number),
            format!("Destination: {}", self.destination),
            format!("Track: {track}"),
            format!("Delay: {delay}"),
        ]
        .join("\n")
    }
}
