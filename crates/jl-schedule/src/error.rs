use std::fmt;

use jl_core::SegmentId;
use thiserror::Error;

/// Which timing field of a segment could not be resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimingField {
    Departure,
    Arrival,
}

impl fmt::Display for TimingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimingField::Departure => "departure",
            TimingField::Arrival => "arrival",
        })
    }
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("cannot build a schedule for an empty itinerary")]
    EmptyItinerary,

    #[error("segment {index} ({segment}) has no parseable {field} time: {value:?}")]
    UnresolvedSegmentTiming {
        index:   usize,
        segment: SegmentId,
        field:   TimingField,
        value:   String,
    },

    #[error("segment {index} ({segment}) cannot be placed on the home clock")]
    OutOfRange { index: usize, segment: SegmentId },

    #[error("itinerary parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
