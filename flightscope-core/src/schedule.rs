//! Raw schedule payloads as returned by the flight API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Which side of an airport's schedule a payload describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    Arrivals,
    Departures,
}

impl ScheduleMode {
    /// Both modes, in the order they are fetched.
    pub const ALL: [ScheduleMode; 2] = [ScheduleMode::Arrivals, ScheduleMode::Departures];

    /// Value used for the `mode` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleMode::Arrivals => "arrivals",
            ScheduleMode::Departures => "departures",
        }
    }
}

impl fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined arrivals and departures payloads for one airport.
///
/// A section is `Value::Null` when its outbound call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleData {
    pub airport_code: String,
    pub arrivals: Value,
    pub departures: Value,
}

impl ScheduleData {
    /// An empty result for `airport_code` with both sections missing.
    pub fn empty(airport_code: impl Into<String>) -> Self {
        Self {
            airport_code: airport_code.into(),
            arrivals: Value::Null,
            departures: Value::Null,
        }
    }

    /// The payload for `mode`.
    pub fn section(&self, mode: ScheduleMode) -> &Value {
        match mode {
            ScheduleMode::Arrivals => &self.arrivals,
            ScheduleMode::Departures => &self.departures,
        }
    }

    /// Replace the payload for `mode`.
    pub fn set_section(&mut self, mode: ScheduleMode, payload: Value) {
        match mode {
            ScheduleMode::Arrivals => self.arrivals = payload,
            ScheduleMode::Departures => self.departures = payload,
        }
    }

    /// True if at least one section holds a payload.
    pub fn has_any_section(&self) -> bool {
        !self.arrivals.is_null() || !self.departures.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_query_values() {
        assert_eq!(ScheduleMode::Arrivals.as_str(), "arrivals");
        assert_eq!(ScheduleMode::Departures.to_string(), "departures");
    }

    #[test]
    fn test_set_section_and_has_any() {
        let mut data = ScheduleData::empty("DXB");
        assert!(!data.has_any_section());

        data.set_section(ScheduleMode::Departures, json!([]));
        assert!(data.has_any_section());
        assert!(data.section(ScheduleMode::Arrivals).is_null());
        assert_eq!(data.section(ScheduleMode::Departures), &json!([]));
    }
}
