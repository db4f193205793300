//! Train number type.

use std::fmt;

/// Error returned when a train number is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train number: {reason}")]
pub struct InvalidTrainNumber {
    reason: &'static str,
}

/// The operator-facing identity of a departure.
///
/// Train numbers are opaque strings chosen by whoever enters the departure.
/// The board uses them as the lookup key, so the only rule is that they are
/// not blank. Surrounding whitespace is dropped.
///
/// # Examples
///
/// ```
/// use departure_board::domain::TrainNumber;
///
/// let n = TrainNumber::new(" 1001 ".to_string()).unwrap();
/// assert_eq!(n.as_str(), "1001");
///
/// assert!(TrainNumber::new("   ".to_string()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TrainNumber(String);

impl TrainNumber {
    /// Create a train number, trimming surrounding whitespace.
    ///
    /// Returns an error if nothing is left after trimming.
    pub fn new(s: String) -> Result<Self, InvalidTrainNumber> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidTrainNumber {
                reason: "train number cannot be empty",
            });
        }
        if trimmed.len() == s.len() {
            Ok(TrainNumber(s))
        } else {
            Ok(TrainNumber(trimmed.to_string()))
        }
    }

    /// Returns the train number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for TrainNumber {
    type Err = InvalidTrainNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl fmt::Debug for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainNumber({})", self.0)
    }
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
