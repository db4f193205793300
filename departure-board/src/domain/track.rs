//! Platform track assignment.

use std::fmt;
use std::num::NonZeroU32;

/// Error returned for a track number that is neither positive nor the
/// unassigned marker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid track {number}: must be a positive number, or -1 for unassigned")]
pub struct InvalidTrack {
    number: i32,
}

/// The track (platform) a departure leaves from.
///
/// Operators refer to tracks by number, with -1 meaning no track has been
/// assigned yet. `Track` keeps that numeric form at the edges but only
/// admits the two meaningful cases.
///
/// # Examples
///
/// ```
/// use departure_board::domain::Track;
///
/// assert_eq!(Track::from_number(-1).unwrap(), Track::Unassigned);
/// assert_eq!(Track::from_number(3).unwrap().number(), 3);
/// assert!(Track::from_number(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Track {
    /// No platform has been assigned yet.
    #[default]
    Unassigned,
    /// Platform number.
    Assigned(NonZeroU32),
}

impl Track {
    /// Numeric form used by operators for "not assigned".
    pub const UNASSIGNED_NUMBER: i32 = -1;

    /// Convert an operator-supplied track number.
    pub fn from_number(number: i32) -> Result<Self, InvalidTrack> {
        if number == Self::UNASSIGNED_NUMBER {
            return Ok(Track::Unassigned);
        }
        u32::try_from(number)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Track::Assigned)
            .ok_or(InvalidTrack { number })
    }

    /// The numeric form: the platform, or -1 when unassigned.
    pub fn number(&self) -> i32 {
        match self {
            Track::Unassigned => Self::UNASSIGNED_NUMBER,
            Track::Assigned(n) => i32::try_from(n.get()).unwrap_or(i32::MAX),
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Unassigned => f.pad("-"),
            Track::Assigned(n) => fmt::Display::fmt(n, f),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Only -1 and positive numbers become tracks, and they keep their number
        #[test]
        fn only_sentinel_or_positive(n in any::<i32>()) {
            match Track::from_number(n) {
                Ok(track) => {
                    prop_assert!(n == -1 || n >= 1);
                    prop_assert_eq!(track.number(), n);
                }
                Err(_) => prop_assert!(n == 0 || n < -1),
            }
        }
    }
}
