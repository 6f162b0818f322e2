//! FlightScope Test Utilities
//!
//! Centralized test infrastructure for the FlightScope workspace:
//! - Scripted schedule sources and chat providers with call counters
//! - JSON fixtures shaped like the flight API's schedule payloads
//! - Proptest generators for flight records

pub use flightscope_core::{
    Airport, FlightRecord, FlightSummary, LlmError, ScheduleData, ScheduleMode, ScheduleSource,
    SourceError, Timestamp,
};
pub use flightscope_llm::{ChatProvider, ChatRequest, LlmResult};

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// STUB SCHEDULE SOURCE
// ============================================================================

/// Schedule source returning scripted responses per mode.
///
/// Both modes answer with an empty entry list until scripted otherwise.
#[derive(Debug)]
pub struct StubScheduleSource {
    arrivals: Mutex<Result<Value, SourceError>>,
    departures: Mutex<Result<Value, SourceError>>,
    arrivals_calls: AtomicUsize,
    departures_calls: AtomicUsize,
}

impl StubScheduleSource {
    pub fn new() -> Self {
        Self {
            arrivals: Mutex::new(Ok(Value::Array(Vec::new()))),
            departures: Mutex::new(Ok(Value::Array(Vec::new()))),
            arrivals_calls: AtomicUsize::new(0),
            departures_calls: AtomicUsize::new(0),
        }
    }

    /// Script the response for `mode`.
    pub fn respond(self, mode: ScheduleMode, response: Result<Value, SourceError>) -> Self {
        self.set_response(mode, response);
        self
    }

    pub fn with_arrivals(self, payload: Value) -> Self {
        self.respond(ScheduleMode::Arrivals, Ok(payload))
    }

    pub fn with_departures(self, payload: Value) -> Self {
        self.respond(ScheduleMode::Departures, Ok(payload))
    }

    /// Make `mode` fail at the transport level.
    pub fn unreachable(self, mode: ScheduleMode) -> Self {
        self.respond(
            mode,
            Err(SourceError::Transport {
                reason: "connection refused".to_string(),
            }),
        )
    }

    /// Replace the scripted response after construction.
    pub fn set_response(&self, mode: ScheduleMode, response: Result<Value, SourceError>) {
        let slot = match mode {
            ScheduleMode::Arrivals => &self.arrivals,
            ScheduleMode::Departures => &self.departures,
        };
        *slot.lock().unwrap() = response;
    }

    /// Number of fetches made for `mode`.
    pub fn calls(&self, mode: ScheduleMode) -> usize {
        match mode {
            ScheduleMode::Arrivals => self.arrivals_calls.load(Ordering::SeqCst),
            ScheduleMode::Departures => self.departures_calls.load(Ordering::SeqCst),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.calls(ScheduleMode::Arrivals) + self.calls(ScheduleMode::Departures)
    }
}

impl Default for StubScheduleSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleSource for StubScheduleSource {
    async fn fetch(&self, _airport_code: &str, mode: ScheduleMode) -> Result<Value, SourceError> {
        let (slot, counter) = match mode {
            ScheduleMode::Arrivals => (&self.arrivals, &self.arrivals_calls),
            ScheduleMode::Departures => (&self.departures, &self.departures_calls),
        };
        counter.fetch_add(1, Ordering::SeqCst);
        slot.lock().unwrap().clone()
    }
}

// ============================================================================
// STUB CHAT PROVIDER
// ============================================================================

/// Chat provider returning a scripted reply and recording requests.
#[derive(Debug)]
pub struct StubChatProvider {
    reply: LlmResult<Option<String>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubChatProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::scripted(Ok(Some(text.into())))
    }

    /// A provider whose every call fails like an unreachable endpoint.
    pub fn failing() -> Self {
        Self::scripted(Err(LlmError::RequestFailed {
            provider: "stub".to_string(),
            status: 0,
            message: "HTTP request failed: connection refused".to_string(),
        }))
    }

    pub fn scripted(reply: LlmResult<Option<String>>) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for StubChatProvider {
    async fn complete(&self, request: &ChatRequest) -> LlmResult<Option<String>> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone()
    }

    fn name(&self) -> &str {
        "stub"
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for FlightScope types.

    use super::*;
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    /// Generate a timestamp between 2020 and 2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1_577_836_800i64..1_893_456_000i64)
            .prop_map(|secs| DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default())
    }

    pub fn arb_country() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["Germany", "France", "India", "Japan", "Unknown"])
            .prop_map(str::to_string)
    }

    pub fn arb_airline() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["Emirates", "Lufthansa", "Air France", "KLM", "Unknown"])
            .prop_map(str::to_string)
    }

    /// Generate a flight record arriving at DXB.
    pub fn arb_flight_record() -> impl Strategy<Value = FlightRecord> {
        (
            "[A-Z]{2}[0-9]{1,4}",
            arb_airline(),
            "[A-Z]{3}",
            arb_country(),
            "[A-Z][a-z]{2,8}",
            arb_timestamp(),
            proptest::option::of(arb_timestamp()),
        )
            .prop_map(
                |(flight_number, airline, from_airport, country, city, scheduled, actual)| {
                    FlightRecord {
                        flight_number,
                        airline,
                        departure_airport: from_airport,
                        departure_country: country,
                        departure_city: city,
                        arrival_airport: "DXB".to_string(),
                        arrival_country: "UAE".to_string(),
                        arrival_city: "Dubai".to_string(),
                        scheduled_time: scheduled,
                        actual_time: actual,
                        status: "Scheduled".to_string(),
                    }
                },
            )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Flight API payloads and records for common scenarios.

    use super::*;
    use chrono::Utc;
    use serde_json::json;

    const ORIGINS: [(&str, &str, &str, &str); 4] = [
        ("FRA", "Germany", "Frankfurt", "Lufthansa"),
        ("CDG", "France", "Paris", "Air France"),
        ("DEL", "India", "Delhi", "Air India"),
        ("HND", "Japan", "Tokyo", "Japan Airlines"),
    ];

    /// The `i`-th synthetic schedule entry, cycling through four origins.
    pub fn schedule_entry(i: usize) -> Value {
        let (iata, country, city, airline) = ORIGINS[i % ORIGINS.len()];
        let scheduled = 1_772_355_600 + (i as i64) * 900;
        json!({
            "flight": {
                "identification": { "number": { "default": format!("FS{}", 100 + i) } },
                "status": { "text": "Scheduled" },
                "airline": { "name": airline },
                "airport": {
                    "origin": {
                        "code": { "iata": iata },
                        "position": {
                            "country": { "name": country },
                            "region": { "city": city }
                        }
                    },
                    "destination": {
                        "code": { "iata": iata },
                        "position": {
                            "country": { "name": country },
                            "region": { "city": city }
                        }
                    }
                },
                "time": {
                    "scheduled": { "departure": scheduled, "arrival": scheduled + 3600 }
                }
            }
        })
    }

    /// A payload for `mode` in the flight API's nesting with `count` entries.
    pub fn schedule_payload(mode: ScheduleMode, count: usize) -> Value {
        let data: Vec<Value> = (0..count).map(schedule_entry).collect();
        let mut section = serde_json::Map::new();
        section.insert(mode.as_str().to_string(), json!({ "data": data }));
        json!({ "airport": { "pluginData": { "schedule": Value::Object(section) } } })
    }

    pub fn arrivals_payload(count: usize) -> Value {
        schedule_payload(ScheduleMode::Arrivals, count)
    }

    pub fn departures_payload(count: usize) -> Value {
        schedule_payload(ScheduleMode::Departures, count)
    }

    /// A record arriving at DXB from the given origin.
    pub fn flight_record(country: &str, city: &str, airline: &str) -> FlightRecord {
        FlightRecord {
            flight_number: "FS100".to_string(),
            airline: airline.to_string(),
            departure_airport: "XXX".to_string(),
            departure_country: country.to_string(),
            departure_city: city.to_string(),
            arrival_airport: "DXB".to_string(),
            arrival_country: "UAE".to_string(),
            arrival_city: "Dubai".to_string(),
            scheduled_time: Utc::now(),
            actual_time: None,
            status: "Scheduled".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use flightscope_core::{find_airport, parse_schedule};

    #[tokio::test]
    async fn test_stub_source_counts_calls_per_mode() -> Result<(), String> {
        let source = StubScheduleSource::new()
            .with_arrivals(arrivals_payload(2))
            .unreachable(ScheduleMode::Departures);

        let arrivals = source.fetch("DXB", ScheduleMode::Arrivals).await;
        let departures = source.fetch("DXB", ScheduleMode::Departures).await;

        assert!(arrivals.is_ok());
        assert!(matches!(departures, Err(SourceError::Transport { .. })));
        assert_eq!(source.calls(ScheduleMode::Arrivals), 1);
        assert_eq!(source.total_calls(), 2);
        Ok(())
    }

    #[test]
    fn test_fixture_payload_decodes() {
        let dxb = find_airport("DXB").expect("DXB is registered");
        let data = ScheduleData {
            airport_code: "DXB".to_string(),
            arrivals: arrivals_payload(5),
            departures: departures_payload(3),
        };
        let report = parse_schedule(&data, dxb);
        assert_eq!(report.arrivals.len(), 5);
        assert_eq!(report.departures.len(), 3);
        assert_eq!(report.failed_count(), 0);
        assert_eq!(report.arrivals[1].departure_country, "France");
        assert_eq!(report.departures[1].departure_country, "UAE");
    }
}
