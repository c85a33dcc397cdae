//! Flight itinerary data model.
//!
//! Segments are kept exactly as the flight-lookup service returned them
//! (free-text locations, local timestamp strings).  Parsing happens lazily
//! through the accessor methods so that a malformed field only matters to
//! the component that actually needs it: the validator skips it, the
//! scheduler reports it.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::SegmentId;
use crate::time::{Minutes, parse_duration_label, parse_local};

static AIRPORT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Z]{3})\)").expect("static airport-code pattern"));

/// Extract a bracketed three-letter airport code, e.g. `"London (LHR)"` → `LHR`.
///
/// Best effort: free text without a code yields `None`, never an error.
pub fn airport_code(location: &str) -> Option<&str> {
    AIRPORT_CODE
        .captures(location)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

// ── FlightSegment ─────────────────────────────────────────────────────────────

/// One flight leg.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FlightSegment {
    pub id: SegmentId,
    pub flight_number: String,
    /// Free text, usually `City (CODE)`.
    pub origin: String,
    /// Free text, usually `City (CODE)`.
    pub destination: String,
    /// Local wall-clock departure, e.g. `2024-01-10T20:00`.
    pub departure_time: String,
    /// Local wall-clock arrival at the destination airport.
    pub arrival_time: String,
    /// Stated block time, e.g. `7h 05m`.  May be empty.
    #[cfg_attr(feature = "serde", serde(rename = "duration", alias = "durationLabel", default))]
    pub duration_label: String,
}

impl FlightSegment {
    pub fn new(
        id:             impl Into<SegmentId>,
        flight_number:  impl Into<String>,
        origin:         impl Into<String>,
        destination:    impl Into<String>,
        departure_time: impl Into<String>,
        arrival_time:   impl Into<String>,
    ) -> Self {
        Self {
            id:             id.into(),
            flight_number:  flight_number.into(),
            origin:         origin.into(),
            destination:    destination.into(),
            departure_time: departure_time.into(),
            arrival_time:   arrival_time.into(),
            duration_label: String::new(),
        }
    }

    /// Attach a stated duration label.
    pub fn with_duration(mut self, label: impl Into<String>) -> Self {
        self.duration_label = label.into();
        self
    }

    pub fn departure(&self) -> Option<NaiveDateTime> {
        parse_local(&self.departure_time)
    }

    pub fn arrival(&self) -> Option<NaiveDateTime> {
        parse_local(&self.arrival_time)
    }

    pub fn origin_code(&self) -> Option<&str> {
        airport_code(&self.origin)
    }

    pub fn destination_code(&self) -> Option<&str> {
        airport_code(&self.destination)
    }

    /// The duration label in minutes, if it parses.
    pub fn stated_duration(&self) -> Option<Minutes> {
        parse_duration_label(&self.duration_label)
    }
}

// ── Itinerary ─────────────────────────────────────────────────────────────────

/// Segments in travel order.
///
/// An empty itinerary can be constructed (the validator accepts it); the
/// scheduler refuses it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Itinerary {
    segments: Vec<FlightSegment>,
}

impl Itinerary {
    pub fn new(segments: Vec<FlightSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[FlightSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> Option<&FlightSegment> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&FlightSegment> {
        self.segments.last()
    }

    /// Adjacent `(current, next)` pairs, i.e. every connection.
    pub fn connections(&self) -> impl Iterator<Item = (&FlightSegment, &FlightSegment)> {
        self.segments.windows(2).map(|w| (&w[0], &w[1]))
    }
}

impl FromIterator<FlightSegment> for Itinerary {
    fn from_iter<I: IntoIterator<Item = FlightSegment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
