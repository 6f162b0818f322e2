//! Supported airport registry.

use serde::Serialize;

/// A supported airport. Registry entries are static for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Airport {
    /// IATA code, unique within the registry.
    pub code: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub city: &'static str,
}

const SUPPORTED_AIRPORTS: [Airport; 6] = [
    Airport {
        code: "DXB",
        name: "Dubai International",
        country: "UAE",
        city: "Dubai",
    },
    Airport {
        code: "LHR",
        name: "London Heathrow",
        country: "UK",
        city: "London",
    },
    Airport {
        code: "CDG",
        name: "Charles de Gaulle",
        country: "France",
        city: "Paris",
    },
    Airport {
        code: "SIN",
        name: "Singapore Changi",
        country: "Singapore",
        city: "Singapore",
    },
    Airport {
        code: "HKG",
        name: "Hong Kong International",
        country: "Hong Kong",
        city: "Hong Kong",
    },
    Airport {
        code: "AMS",
        name: "Amsterdam Schiphol",
        country: "Netherlands",
        city: "Amsterdam",
    },
];

/// All supported airports, in registry order.
pub fn supported_airports() -> &'static [Airport] {
    &SUPPORTED_AIRPORTS
}

/// Look up an airport by its exact IATA code.
pub fn find_airport(code: &str) -> Option<&'static Airport> {
    SUPPORTED_AIRPORTS.iter().find(|airport| airport.code == code)
}

/// Returns true if `code` is in the registry. Matching is exact and case-sensitive.
pub fn is_supported(code: &str) -> bool {
    find_airport(code).is_some()
}
