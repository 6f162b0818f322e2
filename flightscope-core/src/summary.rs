//! Flight summary handed to the language model.

use crate::flight::FlightRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compact view of one flight inside a [`FlightSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightBrief {
    pub flight_number: String,
    pub airline: String,
    pub from_country: String,
    pub from_city: String,
    pub from_airport: String,
    /// RFC 3339.
    pub scheduled_time: String,
    pub status: String,
}

impl From<&FlightRecord> for FlightBrief {
    fn from(record: &FlightRecord) -> Self {
        Self {
            flight_number: record.flight_number.clone(),
            airline: record.airline.clone(),
            from_country: record.departure_country.clone(),
            from_city: record.departure_city.clone(),
            from_airport: record.departure_airport.clone(),
            scheduled_time: record.scheduled_time.to_rfc3339(),
            status: record.status.clone(),
        }
    }
}

/// Aggregated statistics plus the flat flight list for one airport.
///
/// Counts are keyed by the departure side of each record. Maps are ordered so
/// the rendered JSON is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSummary {
    pub airport: String,
    pub total_flights: usize,
    pub countries: BTreeMap<String, usize>,
    pub cities: BTreeMap<String, usize>,
    pub airlines: BTreeMap<String, usize>,
    pub flights: Vec<FlightBrief>,
    /// Schedule entries that could not be decoded.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub skipped_entries: usize,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl FlightSummary {
    pub fn build(airport_code: impl Into<String>, records: &[FlightRecord]) -> Self {
        let mut countries = BTreeMap::new();
        let mut cities = BTreeMap::new();
        let mut airlines = BTreeMap::new();

        for record in records {
            *countries.entry(record.departure_country.clone()).or_insert(0) += 1;
            *cities.entry(record.departure_city.clone()).or_insert(0) += 1;
            *airlines.entry(record.airline.clone()).or_insert(0) += 1;
        }

        Self {
            airport: airport_code.into(),
            total_flights: records.len(),
            countries,
            cities,
            airlines,
            flights: records.iter().map(FlightBrief::from).collect(),
            skipped_entries: 0,
        }
    }

    pub fn with_skipped_entries(mut self, skipped: usize) -> Self {
        self.skipped_entries = skipped;
        self
    }

    /// Pretty JSON with non-ASCII text left unescaped.
    pub fn to_prompt_json(&self) -> String {
        // BTreeMap keys are strings, so serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Countries sorted by descending flight count, ties broken by name.
    pub fn top_countries(&self, limit: usize) -> Vec<(&str, usize)> {
        top_entries(&self.countries, limit)
    }

    /// Airlines sorted by descending flight count, ties broken by name.
    pub fn top_airlines(&self, limit: usize) -> Vec<(&str, usize)> {
        top_entries(&self.airlines, limit)
    }
}

fn top_entries(counts: &BTreeMap<String, usize>, limit: usize) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn record(country: &str, city: &str, airline: &str) -> FlightRecord {
        FlightRecord {
            flight_number: "XX1".to_string(),
            airline: airline.to_string(),
            departure_airport: "AAA".to_string(),
            departure_country: country.to_string(),
            departure_city: city.to_string(),
            arrival_airport: "DXB".to_string(),
            arrival_country: "UAE".to_string(),
            arrival_city: "Dubai".to_string(),
            scheduled_time: Utc.with_ymd_and_hms(2026, 1, 1, 8, 30, 0).unwrap(),
            actual_time: None,
            status: "Scheduled".to_string(),
        }
    }

    #[test]
    fn test_build_counts_by_departure_side() {
        let records = vec![
            record("Germany", "Berlin", "Lufthansa"),
            record("Germany", "Munich", "Lufthansa"),
            record("France", "Paris", "Air France"),
        ];
        let summary = FlightSummary::build("DXB", &records);

        assert_eq!(summary.total_flights, 3);
        assert_eq!(summary.countries.get("Germany"), Some(&2));
        assert_eq!(summary.cities.get("Paris"), Some(&1));
        assert_eq!(summary.airlines.get("Lufthansa"), Some(&2));
        assert_eq!(summary.flights[2].from_city, "Paris");
        assert_eq!(summary.flights[0].scheduled_time, "2026-01-01T08:30:00+00:00");
    }

    #[test]
    fn test_prompt_json_keeps_unicode_and_shape() {
        let summary = FlightSummary::build("DXB", &[record("Россия", "Москва", "Аэрофлот")]);
        let json = summary.to_prompt_json();

        assert!(json.contains("Москва"));
        assert!(json.contains("\"total_flights\": 1"));
        assert!(json.contains("\"from_country\""));
        assert!(!json.contains("skipped_entries"));
    }

    #[test]
    fn test_top_countries_orders_by_count_then_name() {
        let records = vec![
            record("India", "Delhi", "IndiGo"),
            record("Germany", "Berlin", "Lufthansa"),
            record("India", "Mumbai", "Air India"),
            record("France", "Paris", "Air France"),
        ];
        let summary = FlightSummary::build("DXB", &records);
        assert_eq!(
            summary.top_countries(2),
            vec![("India", 2), ("France", 1)]
        );
    }

    #[test]
    fn test_empty_records() {
        let summary = FlightSummary::build("AMS", &[]).with_skipped_entries(3);
        assert_eq!(summary.total_flights, 0);
        assert!(summary.countries.is_empty());
        assert!(summary.to_prompt_json().contains("\"skipped_entries\": 3"));
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_total(
            rows in prop::collection::vec(("[A-C]", "[a-c]", "[X-Z]"), 0..40)
        ) {
            let records: Vec<FlightRecord> = rows
                .iter()
                .map(|(country, city, airline)| record(country, city, airline))
                .collect();
            let summary = FlightSummary::build("LHR", &records);

            prop_assert_eq!(summary.total_flights, records.len());
            prop_assert_eq!(summary.countries.values().sum::<usize>(), records.len());
            prop_assert_eq!(summary.cities.values().sum::<usize>(), records.len());
            prop_assert_eq!(summary.airlines.values().sum::<usize>(), records.len());
            prop_assert_eq!(summary.flights.len(), records.len());
        }
    }
}
