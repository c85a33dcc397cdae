//! Timing resolution: from local timestamp strings to a single home-clock
//! timeline.
//!
//! # Shift
//!
//! The engine has no timezone database, only the local clocks printed on
//! each segment.  The trip's shift is the clock-of-day difference between
//! the last arrival and the first departure, folded to (-12h, +12h]:
//!
//! ```text
//! shift = fold(clock_of_day(last.arrival) − clock_of_day(first.departure))
//! ```
//!
//! Duration labels never change it.
//!
//! # Placement
//!
//! Putting segments on the home clock needs each segment's *clock change*
//!
//! ```text
//! change = local_elapsed − true_elapsed
//! ```
//!
//! where `true_elapsed` is the stated block time.  Stated segments keep
//! their exact change; segments without a duration share the rest of the
//! shift evenly.  The folded sum of the changes is the clock offset used to
//! read home-clock instants on the destination clock, so a printed arrival
//! time always renders as printed.
//!
//! Layovers are measured on the connecting airport's own clock, so they
//! never need inference.

use chrono::NaiveDateTime;
use jl_core::time::{
    MAX_FLIGHT_MINUTES, Minutes, add_minutes, checked_add_minutes, clock_of_day, fold_minutes, minutes_between,
};
use jl_core::{ClockPair, FlightSegment, Itinerary, PlannerConfig, SegmentId};

use crate::error::TimingField;
use crate::transit::LayoverKind;
use crate::{ScheduleError, ScheduleResult};

/// An inferred flight is never shorter than this.
const MIN_INFERRED_FLIGHT: Minutes = 30;

/// One segment placed on the home clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedSegment {
    pub index: usize,
    pub id: SegmentId,
    pub flight_number: String,
    /// Airport code if the free text has one, otherwise the text itself.
    pub origin: String,
    pub destination: String,
    /// Home-clock departure.
    pub departs: NaiveDateTime,
    /// Home-clock arrival.
    pub arrives: NaiveDateTime,
    /// Minutes in the air.
    pub elapsed: Minutes,
    /// `true` if `elapsed` came from the duration label.
    pub stated: bool,
}

/// The gap between two segments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layover {
    /// Index of the segment this layover follows.
    pub after: usize,
    pub airport: String,
    /// Home-clock start (arrival of `after`).
    pub starts: NaiveDateTime,
    /// Home-clock end (departure of `after + 1`).
    pub ends: NaiveDateTime,
    /// Connection time on the airport's own clock, clamped at zero.
    pub minutes: Minutes,
    pub kind: LayoverKind,
}

/// The whole itinerary on one clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline {
    segments: Vec<TimedSegment>,
    layovers: Vec<Layover>,
    /// Folded clock-of-day difference, last arrival minus first departure.
    shift: Minutes,
    /// Folded destination-minus-home offset the segments were placed with.
    clock_offset: Minutes,
    /// `true` when some flight time was inferred rather than stated.
    inferred: bool,
    origin_label: String,
    destination_label: String,
}

struct ParsedSegment<'a> {
    segment:   &'a FlightSegment,
    departure: NaiveDateTime,
    arrival:   NaiveDateTime,
    stated:    Option<Minutes>,
}

impl ParsedSegment<'_> {
    fn local_elapsed(&self) -> Minutes {
        minutes_between(self.departure, self.arrival)
    }
}

impl Timeline {
    /// Resolve `itinerary` into a timeline.
    ///
    /// Fails for an empty itinerary, a timestamp that does not parse, or a
    /// segment that cannot be placed inside the calendar chrono represents.
    pub fn resolve(itinerary: &Itinerary, config: &PlannerConfig) -> ScheduleResult<Timeline> {
        let parsed = parse_segments(itinerary)?;
        let (Some(first), Some(last)) = (parsed.first(), parsed.last()) else {
            return Err(ScheduleError::EmptyItinerary);
        };

        let shift = fold_minutes(clock_of_day(last.arrival) - clock_of_day(first.departure));
        let all_stated = parsed.iter().all(|p| p.stated.is_some());
        let changes = share_residual(&parsed, shift);
        let clock_offset = fold_minutes(changes.iter().sum());

        // ── Place every segment on the home clock ─────────────────────────
        let mut segments = Vec::with_capacity(parsed.len());
        let mut layovers = Vec::with_capacity(parsed.len().saturating_sub(1));
        let mut offset: Minutes = 0; // local clock of the current airport minus home clock
        let mut earliest_departure: Option<NaiveDateTime> = None;

        for (i, (p, change)) in parsed.iter().zip(&changes).enumerate() {
            let out_of_range = || ScheduleError::OutOfRange { index: i, segment: p.segment.id.clone() };
            let mut departs = checked_add_minutes(p.departure, -offset).ok_or_else(out_of_range)?;
            if let Some(floor) = earliest_departure {
                departs = departs.max(floor);
            }
            let elapsed = match p.stated {
                Some(stated) => stated,
                None => inferred_elapsed(p, p.local_elapsed() - change),
            };
            let arrives = checked_add_minutes(departs, elapsed).ok_or_else(out_of_range)?;
            offset = minutes_between(arrives, p.arrival);

            segments.push(TimedSegment {
                index:         i,
                id:            p.segment.id.clone(),
                flight_number: p.segment.flight_number.clone(),
                origin:        label(&p.segment.origin, p.segment.origin_code()),
                destination:   label(&p.segment.destination, p.segment.destination_code()),
                departs,
                arrives,
                elapsed,
                stated:        p.stated.is_some(),
            });

            if let Some(next) = parsed.get(i + 1) {
                let gap = minutes_between(p.arrival, next.departure);
                if gap < 0 {
                    tracing::warn!(
                        after = %p.segment.flight_number,
                        next = %next.segment.flight_number,
                        gap,
                        "negative layover, treating as zero"
                    );
                }
                let minutes = gap.max(0);
                layovers.push(Layover {
                    after:   i,
                    airport: label(&p.segment.destination, p.segment.destination_code()),
                    starts:  arrives,
                    ends:    add_minutes(arrives, minutes),
                    minutes,
                    kind:    LayoverKind::classify(minutes, config.short_layover_minutes),
                });
                earliest_departure = Some(arrives);
            }
        }

        let origin_label = first.segment.origin_code().unwrap_or("Origin").to_owned();
        let destination_label = last.segment.destination_code().unwrap_or("Destination").to_owned();

        Ok(Timeline {
            segments,
            layovers,
            shift,
            clock_offset,
            inferred: !all_stated,
            origin_label,
            destination_label,
        })
    }

    pub fn segments(&self) -> &[TimedSegment] {
        &self.segments
    }

    pub fn layovers(&self) -> &[Layover] {
        &self.layovers
    }

    /// The trip's folded clock-of-day shift.
    pub fn shift(&self) -> Minutes {
        self.shift
    }

    /// Destination-minus-home offset used for rendering and POST placement.
    pub fn clock_offset(&self) -> Minutes {
        self.clock_offset
    }

    pub fn is_inferred(&self) -> bool {
        self.inferred
    }

    /// Home-clock departure of the first segment.
    pub fn first_departure(&self) -> NaiveDateTime {
        self.segments[0].departs
    }

    /// Home-clock arrival of the last segment.
    pub fn final_arrival(&self) -> NaiveDateTime {
        self.segments[self.segments.len() - 1].arrives
    }

    /// The home/destination clock pair for rendering.
    pub fn clocks(&self) -> ClockPair {
        ClockPair::new(&self.origin_label, &self.destination_label, self.clock_offset)
    }
}

fn parse_segments(itinerary: &Itinerary) -> ScheduleResult<Vec<ParsedSegment<'_>>> {
    if itinerary.is_empty() {
        return Err(ScheduleError::EmptyItinerary);
    }
    itinerary
        .segments()
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            let unresolved = |field: TimingField, value: &str| ScheduleError::UnresolvedSegmentTiming {
                index,
                segment: segment.id.clone(),
                field,
                value: value.to_owned(),
            };
            let departure = segment
                .departure()
                .ok_or_else(|| unresolved(TimingField::Departure, &segment.departure_time))?;
            let arrival = segment
                .arrival()
                .ok_or_else(|| unresolved(TimingField::Arrival, &segment.arrival_time))?;
            Ok(ParsedSegment { segment, departure, arrival, stated: segment.stated_duration() })
        })
        .collect()
}

/// Inferred flight time, clamped to a plausible range.
fn inferred_elapsed(p: &ParsedSegment<'_>, elapsed: Minutes) -> Minutes {
    if elapsed < MIN_INFERRED_FLIGHT || elapsed > MAX_FLIGHT_MINUTES {
        tracing::warn!(
            segment = %p.segment.id,
            inferred = elapsed,
            "implausible inferred flight time, clamping"
        );
    }
    elapsed.clamp(MIN_INFERRED_FLIGHT, MAX_FLIGHT_MINUTES)
}

/// Per-segment clock change: stated segments keep their exact change, the
/// rest split what is left of `shift` evenly (the last one absorbs the
/// rounding).  With every duration stated nothing is shared.
fn share_residual(parsed: &[ParsedSegment<'_>], shift: Minutes) -> Vec<Minutes> {
    let known: Minutes = parsed
        .iter()
        .filter_map(|p| p.stated.map(|s| p.local_elapsed() - s))
        .sum();
    let unknown = parsed.iter().filter(|p| p.stated.is_none()).count() as Minutes;
    let residual = fold_minutes(shift - known);
    let share = residual / unknown.max(1);
    let remainder = residual - share * unknown;

    let last_unknown = parsed.iter().rposition(|p| p.stated.is_none());
    parsed
        .iter()
        .enumerate()
        .map(|(i, p)| match p.stated {
            Some(s) => p.local_elapsed() - s,
            None if Some(i) == last_unknown => share + remainder,
            None => share,
        })
        .collect()
}

fn label(text: &str, code: Option<&str>) -> String {
    code.map_or_else(|| text.trim().to_owned(), str::to_owned)
}
