//! Pairwise continuity checks.

use jl_core::{FlightSegment, Itinerary};

use crate::Warning;

/// Check every connection of `itinerary` and return the findings in
/// connection order (time check before location check per connection).
///
/// Itineraries with fewer than two segments have no connection and yield no
/// warnings.
pub fn validate(itinerary: &Itinerary) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for (current, next) in itinerary.connections() {
        if let Some(w) = check_time(current, next) {
            warnings.push(w);
        }
        if let Some(w) = check_location(current, next) {
            warnings.push(w);
        }
    }
    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "itinerary continuity warnings");
    }
    warnings
}

/// Both instants are read as local wall clocks of the connecting airport.
fn check_time(current: &FlightSegment, next: &FlightSegment) -> Option<Warning> {
    let arrives = current.arrival()?;
    let departs = next.departure()?;
    (departs < arrives).then(|| Warning::TimeContinuity {
        current_flight: current.flight_number.clone(),
        next_flight:    next.flight_number.clone(),
    })
}

fn check_location(current: &FlightSegment, next: &FlightSegment) -> Option<Warning> {
    let arrives_at = current.destination_code()?;
    let departs_from = next.origin_code()?;
    (arrives_at != departs_from).then(|| Warning::LocationMismatch {
        current_flight: current.flight_number.clone(),
        next_flight:    next.flight_number.clone(),
        arrives_at:     arrives_at.to_owned(),
        departs_from:   departs_from.to_owned(),
    })
}
