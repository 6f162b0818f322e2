//! FlightScope Core - Data Types
//!
//! Pure data structures shared by every FlightScope crate: the supported
//! airport registry, normalized flight records, raw schedule payloads, the
//! schedule decoder and the flight summary handed to the language model.
//!
//! Nothing in this crate performs I/O.

pub mod airport;
pub mod error;
pub mod flight;
pub mod parse;
pub mod schedule;
pub mod source;
pub mod summary;

pub use airport::{find_airport, is_supported, supported_airports, Airport};
pub use error::{
    ConfigError, FetchError, FlightscopeError, FlightscopeResult, LlmError, ParseError, SourceError,
};
pub use flight::FlightRecord;
pub use parse::{parse_one, parse_schedule, EntryFailure, ParseReport};
pub use schedule::{ScheduleData, ScheduleMode};
pub use source::ScheduleSource;
pub use summary::{FlightBrief, FlightSummary};

/// Timestamp type used across FlightScope.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
