//! Demo schedule used when the live schedule is empty.
//!
//! Only active with `DEMO_FALLBACK=true`. Output is deterministic for a given
//! airport and start time so demos are repeatable.

use chrono::Duration as ChronoDuration;
use flightscope_core::{Airport, FlightRecord, Timestamp};

/// Number of generated flights per airport.
pub const DEMO_FLIGHT_COUNT: usize = 24;

// (IATA, country, city, airline, flight prefix)
const DEMO_ORIGINS: [(&str, &str, &str, &str, &str); 12] = [
    ("FRA", "Germany", "Frankfurt", "Lufthansa", "LH"),
    ("MUC", "Germany", "Munich", "Lufthansa", "LH"),
    ("CDG", "France", "Paris", "Air France", "AF"),
    ("LHR", "UK", "London", "British Airways", "BA"),
    ("DXB", "UAE", "Dubai", "Emirates", "EK"),
    ("DOH", "Qatar", "Doha", "Qatar Airways", "QR"),
    ("IST", "Turkey", "Istanbul", "Turkish Airlines", "TK"),
    ("JFK", "United States", "New York", "Delta Air Lines", "DL"),
    ("DEL", "India", "Delhi", "Air India", "AI"),
    ("SIN", "Singapore", "Singapore", "Singapore Airlines", "SQ"),
    ("HND", "Japan", "Tokyo", "Japan Airlines", "JL"),
    ("AMS", "Netherlands", "Amsterdam", "KLM", "KL"),
];

/// Generate arrivals into `airport` starting at `start`, one every 20 minutes.
pub fn demo_records(airport: &Airport, start: Timestamp) -> Vec<FlightRecord> {
    let origins: Vec<_> = DEMO_ORIGINS
        .iter()
        .filter(|(iata, ..)| *iata != airport.code)
        .collect();
    let offset = airport.code.bytes().map(usize::from).sum::<usize>() % origins.len();

    (0..DEMO_FLIGHT_COUNT)
        .map(|i| {
            let (iata, country, city, airline, prefix) = origins[(offset + i) % origins.len()];
            let scheduled_time = start + ChronoDuration::minutes(20 * i as i64);
            let landed = i % 3 == 0;
            FlightRecord {
                flight_number: format!("{}{}", prefix, 100 + (offset + i * 7) % 900),
                airline: airline.to_string(),
                departure_airport: iata.to_string(),
                departure_country: country.to_string(),
                departure_city: city.to_string(),
                arrival_airport: airport.code.to_string(),
                arrival_country: airport.country.to_string(),
                arrival_city: airport.city.to_string(),
                scheduled_time,
                actual_time: landed.then(|| scheduled_time + ChronoDuration::minutes(5)),
                status: if landed { "Landed" } else { "Scheduled" }.to_string(),
            }
        })
        .collect()
}
