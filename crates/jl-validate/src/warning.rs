//! Validator findings.

use std::fmt;

/// One advisory finding about a connection between two adjacent segments.
///
/// Flight numbers are carried (not ids) because the messages are meant for
/// the traveller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all_fields = "camelCase"))]
pub enum Warning {
    /// `next` departs before `current` arrives.
    TimeContinuity {
        current_flight: String,
        next_flight:    String,
    },
    /// `current` lands at `arrives_at` but `next` leaves from `departs_from`.
    LocationMismatch {
        current_flight: String,
        next_flight:    String,
        arrives_at:     String,
        departs_from:   String,
    },
}

impl Warning {
    pub fn is_time_continuity(&self) -> bool {
        matches!(self, Warning::TimeContinuity { .. })
    }

    pub fn is_location_mismatch(&self) -> bool {
        matches!(self, Warning::LocationMismatch { .. })
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::TimeContinuity { current_flight, next_flight } => write!(
                f,
                "Connection Issue: Flight {next_flight} departs before {current_flight} arrives."
            ),
            Warning::LocationMismatch { current_flight, next_flight, arrives_at, departs_from } => {
                write!(
                    f,
                    "Location Mismatch: Flight {current_flight} arrives in {arrives_at}, \
                     but Flight {next_flight} departs from {departs_from}."
                )
            }
        }
    }
}
