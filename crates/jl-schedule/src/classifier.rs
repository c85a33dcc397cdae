//! Phase-shift classification.

use jl_core::time::{MINUTES_PER_HOUR, Minutes};
use jl_core::{Direction, Itinerary, PlannerConfig};

use crate::ScheduleResult;
use crate::timing::Timeline;

/// Net circadian displacement of a trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PhaseShift {
    pub direction: Direction,
    /// Folded clock-of-day difference between last arrival and first
    /// departure, in (-720, 720].
    pub shift_minutes: Minutes,
    /// `true` when at least one flight time was inferred because its
    /// duration label was missing or unusable.
    pub inferred: bool,
}

impl PhaseShift {
    pub fn from_timeline(timeline: &Timeline, config: &PlannerConfig) -> PhaseShift {
        let shift = timeline.shift();
        PhaseShift {
            direction:     Direction::from_shift(shift, config.north_south_threshold_minutes),
            shift_minutes: shift,
            inferred:      timeline.is_inferred(),
        }
    }

    /// Signed shift in hours, e.g. `5.5`.
    pub fn shift_hours(&self) -> f64 {
        self.shift_minutes as f64 / MINUTES_PER_HOUR as f64
    }

    /// Minutes the body clock has to move.  Zero for `NorthSouth`.
    pub fn magnitude(&self) -> Minutes {
        match self.direction {
            Direction::NorthSouth => 0,
            _ => self.shift_minutes.abs(),
        }
    }
}

/// Classify `itinerary` with default settings.
pub fn classify(itinerary: &Itinerary) -> ScheduleResult<PhaseShift> {
    classify_with(itinerary, &PlannerConfig::default())
}

/// Classify `itinerary` with explicit settings.
pub fn classify_with(itinerary: &Itinerary, config: &PlannerConfig) -> ScheduleResult<PhaseShift> {
    let timeline = Timeline::resolve(itinerary, config)?;
    Ok(PhaseShift::from_timeline(&timeline, config))
}
