//! Clock times and delays.
//!
//! Operators enter both scheduled times and delays as "HH:MM" strings. This
//! module parses them once at the boundary into typed values, and keeps the
//! day-wrapping arithmetic in one place.

use chrono::{Duration, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid time or delay string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision.
///
/// There is no date component: the board only ever deals with a single
/// operating day, so ordering is plain time-of-day ordering.
///
/// # Examples
///
/// ```
/// use departure_board::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("08:30").unwrap();
/// assert_eq!(t.to_string(), "08:30");
/// assert!(t > ClockTime::midnight());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// 00:00, the clock reading of a fresh board.
    pub fn midnight() -> Self {
        Self::default()
    }

    /// Create a time from hour and minute, if both are in range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use departure_board::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// assert!(ClockTime::parse_hhmm("8:30").is_err());
    /// assert!(ClockTime::parse_hhmm("08-30").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let (hour, minute) = split_hhmm(s)?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// The time this departure actually leaves once `delay` is applied.
    ///
    /// Wraps past midnight within the same day, so 23:50 delayed by 00:20
    /// is 00:10. No day is carried.
    ///
    /// # Examples
    ///
    /// ```
    /// use departure_board::domain::{ClockTime, Delay};
    ///
    /// let t = ClockTime::parse_hhmm("10:15").unwrap();
    /// let d = Delay::parse_hhmm("00:30").unwrap();
    /// assert_eq!(t.delayed_by(d).to_string(), "10:45");
    /// ```
    pub fn delayed_by(&self, delay: Delay) -> Self {
        let (time, _wrapped_secs) = self.0.overflowing_add_signed(delay.as_duration());
        Self(time)
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A non-negative delay in whole minutes.
///
/// Written as "HH:MM" like clock times, but the hour field is a duration and
/// may go up to 99.
///
/// # Examples
///
/// ```
/// use departure_board::domain::Delay;
///
/// let d = Delay::parse_hhmm("01:15").unwrap();
/// assert_eq!(d.as_minutes(), 75);
/// assert!(Delay::default().is_zero());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Delay {
    minutes: u32,
}

impl Delay {
    /// No delay.
    pub const ZERO: Self = Self { minutes: 0 };

    /// Create a delay of the given number of minutes.
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Parse a delay from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let (hours, minutes) = split_hhmm(s)?;
        Ok(Self::from_minutes(hours * 60 + minutes))
    }

    /// Total length of the delay in minutes.
    pub fn as_minutes(&self) -> u32 {
        self.minutes
    }

    /// The delay as a chrono duration.
    pub fn as_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }

    /// Whether this is the "no delay" value.
    pub fn is_zero(&self) -> bool {
        self.minutes == 0
    }
}

impl FromStr for Delay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl fmt::Debug for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Delay({self})")
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// Split "HH:MM" into its two numeric fields, checking shape and minute range.
fn split_hhmm(s: &str) -> Result<(u32, u32), TimeError> {
    // Must be exactly 5 characters: HH:MM
    if s.len() != 5 {
        return Err(TimeError::new("expected HH:MM format"));
    }

    let bytes = s.as_bytes();

    if bytes[2] != b':' {
        return Err(TimeError::new("expected colon at position 2"));
    }

    let hour =
        parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;

    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    Ok((hour, minute))
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
