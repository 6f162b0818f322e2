//! Normalized flight record.

use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// Placeholder for an absent identifier (flight number, airport code).
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for an absent descriptive field (airline, country, city, status).
pub const UNKNOWN: &str = "Unknown";

/// One flight, normalized from the flight API's schedule shape.
///
/// The departure side is where the flight comes from and the arrival side is
/// where it goes, regardless of which schedule section it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub flight_number: String,
    pub airline: String,
    pub departure_airport: String,
    pub departure_country: String,
    pub departure_city: String,
    pub arrival_airport: String,
    pub arrival_country: String,
    pub arrival_city: String,
    pub scheduled_time: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<Timestamp>,
    pub status: String,
}
