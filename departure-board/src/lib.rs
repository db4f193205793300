//! Train departure board.
//!
//! An in-memory register of today's departures with a simulated clock:
//! operators add departures, assign tracks, register delays, search, and
//! move the clock forward to clear out trains that have left.

pub mod config;
pub mod domain;
pub mod registry;
pub mod seed;
pub mod shell;

pub use registry::DepartureRegistry;
