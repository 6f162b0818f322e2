//! Schedule Decoder
//!
//! Maps the flight API's nested schedule JSON into [`FlightRecord`]s.
//!
//! Each entry is decoded into typed, fully optional structs first, so a
//! missing field becomes a default while a field of the wrong JSON type makes
//! the entry fail on its own. Batch decoding never aborts: failures are
//! collected in [`ParseReport`] next to the records that did decode.

use crate::airport::Airport;
use crate::error::ParseError;
use crate::flight::{FlightRecord, NOT_AVAILABLE, UNKNOWN};
use crate::schedule::{ScheduleData, ScheduleMode};
use crate::Timestamp;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// WIRE SHAPE
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct RawEntry {
    flight: Option<RawFlight>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFlight {
    identification: Option<RawIdentification>,
    status: Option<RawStatus>,
    airline: Option<RawAirline>,
    airport: Option<RawAirports>,
    time: Option<RawTimes>,
}

#[derive(Debug, Default, Deserialize)]
struct RawIdentification {
    number: Option<RawFlightNumber>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFlightNumber {
    default: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStatus {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAirline {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAirports {
    origin: Option<RawAirport>,
    destination: Option<RawAirport>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAirport {
    code: Option<RawAirportCode>,
    position: Option<RawPosition>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAirportCode {
    iata: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPosition {
    country: Option<RawCountry>,
    region: Option<RawRegion>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCountry {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRegion {
    city: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTimes {
    scheduled: Option<RawTimePair>,
    real: Option<RawTimePair>,
}

// Times stay untyped: an unusable value falls back instead of failing the entry.
#[derive(Debug, Default, Deserialize)]
struct RawTimePair {
    departure: Option<Value>,
    arrival: Option<Value>,
}

impl RawTimePair {
    fn for_mode(&self, mode: ScheduleMode) -> Option<&Value> {
        match mode {
            ScheduleMode::Arrivals => self.arrival.as_ref(),
            ScheduleMode::Departures => self.departure.as_ref(),
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// An entry that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub mode: ScheduleMode,
    /// Position of the entry within its section.
    pub index: usize,
    pub reason: ParseError,
}

/// Outcome of decoding a whole schedule.
///
/// Arrivals and departures stay apart: an arrival's departure side is the
/// origin abroad, a departure's departure side is the airport itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub arrivals: Vec<FlightRecord>,
    pub departures: Vec<FlightRecord>,
    pub failures: Vec<EntryFailure>,
}

impl ParseReport {
    /// Decoded records of one section.
    pub fn section(&self, mode: ScheduleMode) -> &[FlightRecord] {
        match mode {
            ScheduleMode::Arrivals => &self.arrivals,
            ScheduleMode::Departures => &self.departures,
        }
    }

    /// Number of records decoded across both sections.
    pub fn decoded_count(&self) -> usize {
        self.arrivals.len() + self.departures.len()
    }

    /// Number of entries that were skipped.
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of entries seen, decoded or not.
    pub fn total_entries(&self) -> usize {
        self.decoded_count() + self.failures.len()
    }

    /// True when neither section decoded a record.
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty() && self.departures.is_empty()
    }

    fn push(&mut self, mode: ScheduleMode, record: FlightRecord) {
        match mode {
            ScheduleMode::Arrivals => self.arrivals.push(record),
            ScheduleMode::Departures => self.departures.push(record),
        }
    }
}

// ============================================================================
// DECODING
// ============================================================================

/// Decode a single schedule entry.
///
/// `airport` is the registry airport whose schedule the entry belongs to. For
/// departures it is the departure side; for arrivals it is the arrival side.
pub fn parse_one(
    raw: &Value,
    airport: &Airport,
    mode: ScheduleMode,
) -> Result<FlightRecord, ParseError> {
    parse_one_at(raw, airport, mode, Utc::now())
}

/// Like [`parse_one`], with `now` used for missing or invalid scheduled times.
pub fn parse_one_at(
    raw: &Value,
    airport: &Airport,
    mode: ScheduleMode,
    now: Timestamp,
) -> Result<FlightRecord, ParseError> {
    let entry = RawEntry::deserialize(raw).map_err(|e| ParseError::Decode {
        reason: e.to_string(),
    })?;
    let flight = entry.flight.ok_or(ParseError::MissingFlight)?;

    let flight_number = flight
        .identification
        .and_then(|id| id.number)
        .and_then(|number| number.default)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let airline = flight
        .airline
        .and_then(|airline| airline.name)
        .unwrap_or_else(|| UNKNOWN.to_string());
    let status = flight
        .status
        .and_then(|status| status.text)
        .unwrap_or_else(|| UNKNOWN.to_string());

    let counterpart = flight
        .airport
        .and_then(|airports| match mode {
            ScheduleMode::Arrivals => airports.origin,
            ScheduleMode::Departures => airports.destination,
        })
        .unwrap_or_default();
    let other_code = counterpart
        .code
        .and_then(|code| code.iata)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let position = counterpart.position.unwrap_or_default();
    let other_country = position
        .country
        .and_then(|country| country.name)
        .unwrap_or_else(|| UNKNOWN.to_string());
    let other_city = position
        .region
        .and_then(|region| region.city)
        .unwrap_or_else(|| UNKNOWN.to_string());

    let times = flight.time.unwrap_or_default();
    let scheduled_time = times
        .scheduled
        .as_ref()
        .and_then(|pair| pair.for_mode(mode))
        .and_then(epoch_to_timestamp)
        .unwrap_or(now);
    let actual_time = times
        .real
        .as_ref()
        .and_then(|pair| pair.for_mode(mode))
        .and_then(epoch_to_timestamp);

    let here = (
        airport.code.to_string(),
        airport.country.to_string(),
        airport.city.to_string(),
    );
    let there = (other_code, other_country, other_city);
    let (departure, arrival) = match mode {
        ScheduleMode::Arrivals => (there, here),
        ScheduleMode::Departures => (here, there),
    };

    Ok(FlightRecord {
        flight_number,
        airline,
        departure_airport: departure.0,
        departure_country: departure.1,
        departure_city: departure.2,
        arrival_airport: arrival.0,
        arrival_country: arrival.1,
        arrival_city: arrival.2,
        scheduled_time,
        actual_time,
        status,
    })
}

/// Decode every entry of both schedule sections.
pub fn parse_schedule(data: &ScheduleData, airport: &Airport) -> ParseReport {
    parse_schedule_at(data, airport, Utc::now())
}

/// Like [`parse_schedule`], with a fixed `now`.
pub fn parse_schedule_at(data: &ScheduleData, airport: &Airport, now: Timestamp) -> ParseReport {
    let mut report = ParseReport::default();

    for mode in ScheduleMode::ALL {
        for (index, raw) in section_entries(data.section(mode), mode).iter().enumerate() {
            match parse_one_at(raw, airport, mode, now) {
                Ok(record) => report.push(mode, record),
                Err(reason) => report.failures.push(EntryFailure { mode, index, reason }),
            }
        }
    }

    report
}

/// Locate the entry list inside a section payload.
///
/// Accepts the API's `airport.pluginData.schedule.<mode>.data` nesting or a
/// bare array. Anything else has no entries.
fn section_entries(section: &Value, mode: ScheduleMode) -> &[Value] {
    if let Value::Array(entries) = section {
        return entries;
    }
    let pointer = format!("/airport/pluginData/schedule/{}/data", mode.as_str());
    section
        .pointer(&pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn epoch_to_timestamp(value: &Value) -> Option<Timestamp> {
    let seconds = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?,
        _ => return None,
    };
    DateTime::<Utc>::from_timestamp(seconds, 0)
}

// ============================================================================
// TESTS
// ============================================================================
