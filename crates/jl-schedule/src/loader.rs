//! CSV itinerary loader.
//!
//! # CSV format
//!
//! One row per flight segment, in travel order.  `duration` may be empty.
//!
//! ```csv
//! id,flight_number,origin,destination,departure_time,arrival_time,duration
//! a,BA112,New York (JFK),London (LHR),2024-01-10T20:00,2024-01-11T08:00,7h
//! b,SQ317,London (LHR),Singapore (SIN),2024-01-11T10:00,2024-01-12T06:00,
//! ```
//!
//! Timestamps are kept as text; they are parsed when the scheduler resolves
//! the timeline, so a bad timestamp surfaces as `UnresolvedSegmentTiming`
//! with the offending segment rather than as a loader error.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use jl_core::{FlightSegment, Itinerary};

use crate::{ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SegmentRecord {
    id:             String,
    flight_number:  String,
    origin:         String,
    destination:    String,
    departure_time: String,
    arrival_time:   String,
    #[serde(default)]
    duration:       String,
}

impl From<SegmentRecord> for FlightSegment {
    fn from(r: SegmentRecord) -> Self {
        FlightSegment::new(r.id, r.flight_number, r.origin, r.destination, r.departure_time, r.arrival_time)
            .with_duration(r.duration)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an itinerary from a CSV file.
pub fn load_itinerary_csv(path: &Path) -> ScheduleResult<Itinerary> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_itinerary_reader(file)
}

/// Like [`load_itinerary_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_itinerary_reader<R: Read>(reader: R) -> ScheduleResult<Itinerary> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut segments = Vec::new();
    for (row, result) in csv_reader.deserialize::<SegmentRecord>().enumerate() {
        let record = result.map_err(|e| ScheduleError::Parse(format!("row {}: {e}", row + 1)))?;
        if record.id.is_empty() {
            return Err(ScheduleError::Parse(format!("row {}: empty segment id", row + 1)));
        }
        segments.push(FlightSegment::from(record));
    }

    if segments.is_empty() {
        return Err(ScheduleError::EmptyItinerary);
    }
    Ok(Itinerary::new(segments))
}
