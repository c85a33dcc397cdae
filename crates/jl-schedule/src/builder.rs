//! Base schedule layout, before any bio-profile rule runs.
//!
//! # Phases
//!
//! | Phase  | Clock it is planned on | Contents                                         |
//! |--------|------------------------|--------------------------------------------------|
//! | PRE    | home                   | one baseline day per adaptation day, moved by the curve, plus a pre-flight meal |
//! | FLIGHT | destination            | one FLIGHT per segment, hourly in-flight cues, one TRANSIT per layover |
//! | POST   | destination            | baseline days moved by the residual lag, a morning coffee, dinner, an arrival light anchor |
//!
//! Every instant is stored on the home clock regardless of the clock it was
//! planned on.
//!
//! # Baseline day
//!
//! ```text
//! wake ─ light / dark windows ─ evening wind-down ─ core sleep (bedtime + block)
//! ```
//!
//! Eastbound days put the light window in the morning (advance), westbound
//! days in the evening (delay).  PRE events that would start inside the
//! airport buffer are dropped and windows reaching into it are cut short.
//! POST events that would start while the traveller is still leaving the
//! airport are dropped.

use chrono::{NaiveDateTime, NaiveTime};
use jl_core::time::{
    MAX_FLIGHT_MINUTES, MINUTES_PER_DAY, MINUTES_PER_HOUR, Minutes, add_minutes, within_clock_window,
};
use jl_core::{ClockPair, Direction, Itinerary, PlannerConfig};

use crate::adaptation::AdaptationCurve;
use crate::timing::{Layover, TimedSegment, Timeline};
use crate::transit::LayoverKind;
use crate::{EventTag, EventType, Phase, PhaseShift, Schedule, ScheduleEvent, ScheduleResult};

/// Destination-clock night, `[22:00, 06:00)`.
pub const NIGHT_START: Minutes = 22 * MINUTES_PER_HOUR;
pub const NIGHT_END: Minutes = 6 * MINUTES_PER_HOUR;

/// In-flight sleep at least this long counts as core sleep.
const CORE_SLEEP_MIN: Minutes = 4 * MINUTES_PER_HOUR;

/// Destination-clock hours whose in-flight slot is a meal.
const MEAL_HOURS: [Minutes; 3] = [7 * MINUTES_PER_HOUR, 12 * MINUTES_PER_HOUR, 18 * MINUTES_PER_HOUR];

const EVENING_START: Minutes = 18 * MINUTES_PER_HOUR;

/// Minutes between touchdown and the first POST event.
pub(crate) const ARRIVAL_SETTLE: Minutes = 30;

/// Pre-flight meal, minutes before the first departure.
const PRE_FLIGHT_MEAL: Minutes = 180;

const DINNER: Minutes = 19 * MINUTES_PER_HOUR;

/// Destination mornings get a coffee this long after the wake-up.
const MORNING_COFFEE: Minutes = 30;

/// Lay out the base schedule for a resolved timeline.
pub fn build(timeline: &Timeline, shift: &PhaseShift, config: &PlannerConfig) -> Schedule {
    let clocks = timeline.clocks();
    let curve = AdaptationCurve::new(shift, config);

    let mut events = pre_phase(timeline, &curve, config);
    for segment in timeline.segments() {
        events.extend(flight_events(segment, &clocks));
    }
    let transits: Vec<ScheduleEvent> = timeline
        .layovers()
        .iter()
        .map(|layover| transit_event(layover, &events))
        .collect();
    events.extend(transits);
    events.extend(post_phase(timeline, &clocks, &curve, config));

    let schedule = Schedule::new(events);
    tracing::debug!(
        direction = %shift.direction,
        pre_days = curve.pre_days(),
        post_days = curve.post_days(),
        events = schedule.len(),
        "base schedule built"
    );
    schedule
}

/// Resolve and lay out `itinerary` in one call.
pub fn build_itinerary(itinerary: &Itinerary, config: &PlannerConfig) -> ScheduleResult<Schedule> {
    let timeline = Timeline::resolve(itinerary, config)?;
    let shift = PhaseShift::from_timeline(&timeline, config);
    Ok(build(&timeline, &shift, config))
}

// ── PRE / POST ────────────────────────────────────────────────────────────────

fn pre_phase(timeline: &Timeline, curve: &AdaptationCurve, config: &PlannerConfig) -> Vec<ScheduleEvent> {
    let departure = timeline.first_departure();
    let cutoff = add_minutes(departure, -config.airport_buffer_minutes);
    let departure_day = midnight(departure);

    let mut events = Vec::new();
    for k in 0..=curve.pre_days() {
        let back = (curve.pre_days() - k) as Minutes;
        let day = add_minutes(departure_day, -back * MINUTES_PER_DAY);
        let offset = curve.pre_shift(k);
        events.extend(
            baseline_day(Phase::Pre, day, curve.direction(), config)
                .into_iter()
                .map(|e| e.shifted(offset).adapted(k, offset)),
        );
    }
    let mut events: Vec<ScheduleEvent> = events.into_iter().filter_map(|e| clip_before(e, cutoff)).collect();

    events.push(
        ScheduleEvent::new(
            EventType::Food,
            Phase::Pre,
            add_minutes(departure, -PRE_FLIGHT_MEAL),
            "Light Pre-Flight Meal",
            "Eat something light and low in fat before heading to the airport.",
        )
        .lasting(30)
        .tagged(EventTag::Meal),
    );
    events
}

fn post_phase(
    timeline: &Timeline,
    clocks:   &ClockPair,
    curve:    &AdaptationCurve,
    config:   &PlannerConfig,
) -> Vec<ScheduleEvent> {
    let arrival = timeline.final_arrival();
    let arrival_local = clocks.to_destination(arrival);
    let settle = add_minutes(arrival, ARRIVAL_SETTLE);
    let arrival_day = midnight(arrival_local);

    let mut events = Vec::new();
    for d in 0..curve.post_days() {
        let day = add_minutes(arrival_day, d as Minutes * MINUTES_PER_DAY);
        let offset = curve.post_shift(d);
        events.extend(
            baseline_day(Phase::Post, day, curve.direction(), config)
                .into_iter()
                .map(|e| e.shifted(offset).adapted(d, offset)),
        );
        events.push(
            ScheduleEvent::new(
                EventType::Food,
                Phase::Post,
                add_minutes(day, DINNER),
                "Dinner on Local Time",
                "Eat dinner with the locals, even if you are not hungry yet.",
            )
            .lasting(60)
            .tagged(EventTag::Meal),
        );
    }

    if within_clock_window(arrival_local, NIGHT_END, EVENING_START) {
        events.push(
            ScheduleEvent::new(
                EventType::Light,
                Phase::Post,
                add_minutes(arrival_local, ARRIVAL_SETTLE),
                "Daylight Anchor",
                "Get outside in daylight soon after landing instead of napping.",
            )
            .lasting(config.light_window_minutes)
            .tagged(EventTag::LightSeeking),
        );
    }

    events
        .into_iter()
        .map(|e| e.shifted(-clocks.shift))
        .filter(|e| e.start >= settle)
        .collect()
}

/// One habitual day starting at `day` (a local midnight).
fn baseline_day(phase: Phase, day: NaiveDateTime, direction: Direction, config: &PlannerConfig) -> Vec<ScheduleEvent> {
    let wake = add_minutes(day, config.baseline_wake);
    let bed = add_minutes(day, config.baseline_bedtime);
    let window = config.light_window_minutes;

    let mut events = vec![
        ScheduleEvent::new(EventType::Activity, phase, wake, "Wake Up", "Get up at this time even if you slept poorly.")
            .tagged(EventTag::Wake),
    ];

    match direction {
        Direction::East | Direction::NorthSouth => {
            events.push(
                ScheduleEvent::new(
                    EventType::Light,
                    phase,
                    wake,
                    "Morning Light",
                    "Get bright light right after waking: outdoors or in front of a light box.",
                )
                .lasting(window)
                .tagged(EventTag::LightSeeking),
            );
            events.push(
                ScheduleEvent::new(
                    EventType::Dark,
                    phase,
                    add_minutes(bed, -120),
                    "Dim Evening Lights",
                    "Dim the lights and put screens away for the two hours before bed.",
                )
                .until(bed)
                .tagged(EventTag::WindDown),
            );
        }
        Direction::West => {
            events.push(
                ScheduleEvent::new(
                    EventType::Dark,
                    phase,
                    wake,
                    "Avoid Bright Morning Light",
                    "Keep the morning dim: sunglasses outside, curtains closed inside.",
                )
                .lasting(90),
            );
            events.push(
                ScheduleEvent::new(
                    EventType::Light,
                    phase,
                    add_minutes(bed, -240),
                    "Evening Light",
                    "Seek bright light in the early evening to push your clock later.",
                )
                .lasting(window)
                .tagged(EventTag::LightSeeking),
            );
            events.push(
                ScheduleEvent::new(
                    EventType::Dark,
                    phase,
                    add_minutes(bed, -60),
                    "Wind Down",
                    "Lower the lights for the last hour before bed.",
                )
                .until(bed)
                .tagged(EventTag::WindDown),
            );
        }
    }

    if phase == Phase::Post {
        events.push(ScheduleEvent::new(
            EventType::Caffeine,
            phase,
            add_minutes(wake, MORNING_COFFEE),
            "Morning Coffee",
            "One coffee or tea after getting up, then none after early afternoon.",
        ));
    }

    events.push(
        ScheduleEvent::new(EventType::Sleep, phase, bed, "Core Sleep", "Sleep in a dark, cool room.")
            .lasting(config.sleep_block_minutes)
            .tagged(EventTag::CoreSleep),
    );
    events
}

/// Drop `event` if it starts at or after `cutoff`, trim it if it runs past.
fn clip_before(event: ScheduleEvent, cutoff: NaiveDateTime) -> Option<ScheduleEvent> {
    if event.start >= cutoff {
        return None;
    }
    match event.end {
        Some(end) if end > cutoff => Some(event.until(cutoff)),
        _ => Some(event),
    }
}

// ── FLIGHT ────────────────────────────────────────────────────────────────────

fn flight_events(segment: &TimedSegment, clocks: &ClockPair) -> Vec<ScheduleEvent> {
    let mut events = vec![
        ScheduleEvent::new(
            EventType::Flight,
            Phase::Flight,
            segment.departs,
            format!("Flight {}", segment.flight_number),
            format!(
                "{} to {}, about {} in the air. Set your watch to destination time at boarding.",
                segment.origin,
                segment.destination,
                format_span(segment.elapsed),
            ),
        )
        .until(segment.arrives),
    ];

    let slots = hourly_slots(segment.departs, segment.arrives);
    let last = slots.len().saturating_sub(1);
    let mut sleep_run: Option<(NaiveDateTime, NaiveDateTime)> = None;

    for (i, &(start, end)) in slots.iter().enumerate() {
        let local = clocks.to_destination(start);
        if i != last && within_clock_window(local, NIGHT_START, NIGHT_END) {
            sleep_run = Some(match sleep_run {
                Some((from, _)) => (from, end),
                None => (start, end),
            });
            continue;
        }
        if let Some((from, to)) = sleep_run.take() {
            events.push(in_flight_sleep(from, to));
            events.push(
                ScheduleEvent::new(
                    EventType::Activity,
                    Phase::Flight,
                    start,
                    "Wake Up",
                    "Open the window shade and sit up: it is morning at your destination.",
                )
                .tagged(EventTag::Wake),
            );
        }
        events.push(slot_event(i, i == last, start, end, local));
    }
    events
}

/// `[departs, arrives)` cut into hour-long slots, the last one possibly
/// shorter.  Always at least one slot and never more than a
/// [`MAX_FLIGHT_MINUTES`] flight needs; the last slot absorbs any excess.
fn hourly_slots(departs: NaiveDateTime, arrives: NaiveDateTime) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let max_slots = (MAX_FLIGHT_MINUTES / MINUTES_PER_HOUR) as usize;
    let mut slots = Vec::new();
    let mut start = departs;
    loop {
        let end = add_minutes(start, MINUTES_PER_HOUR).min(arrives);
        if end >= arrives || slots.len() + 1 == max_slots {
            slots.push((start, arrives.max(start)));
            break;
        }
        slots.push((start, end));
        start = end;
    }
    slots
}

fn in_flight_sleep(from: NaiveDateTime, to: NaiveDateTime) -> ScheduleEvent {
    let event = ScheduleEvent::new(
        EventType::Sleep,
        Phase::Flight,
        from,
        "In-Flight Sleep",
        "Eye mask and earplugs on: it is night at your destination.",
    )
    .until(to);
    if event.duration() >= CORE_SLEEP_MIN {
        event.tagged(EventTag::CoreSleep)
    } else {
        ScheduleEvent { title: "In-Flight Nap".into(), ..event }
            .with_note("A short nap during the destination's night takes the edge off without confusing your clock.")
    }
}

fn slot_event(index: usize, last: bool, start: NaiveDateTime, end: NaiveDateTime, local: NaiveDateTime) -> ScheduleEvent {
    if last {
        return ScheduleEvent::new(
            EventType::Activity,
            Phase::Flight,
            start,
            "Prepare for Arrival",
            "Freshen up, drink water, and plan to stay awake until local bedtime.",
        )
        .until(end);
    }
    if MEAL_HOURS.iter().any(|&h| within_clock_window(local, h, h + MINUTES_PER_HOUR)) {
        return ScheduleEvent::new(
            EventType::Food,
            Phase::Flight,
            start,
            "Meal on Destination Time",
            "Eat now because it is mealtime at your destination. Skip trays served at other times.",
        )
        .until(end)
        .tagged(EventTag::Meal);
    }
    if within_clock_window(local, EVENING_START, NIGHT_START) {
        return ScheduleEvent::new(
            EventType::Dark,
            Phase::Flight,
            start,
            "Dim the Cabin",
            "Lower the shade, dim the screen, and let the evening settle in.",
        )
        .until(end)
        .tagged(EventTag::WindDown);
    }
    if index % 2 == 0 {
        ScheduleEvent::new(
            EventType::Light,
            Phase::Flight,
            start,
            "Cabin Light",
            "Keep the shade open and the reading light on: it is daytime at your destination.",
        )
        .until(end)
    } else {
        ScheduleEvent::new(
            EventType::Activity,
            Phase::Flight,
            start,
            "Stretch & Walk the Aisle",
            "Walk the aisle and stretch your calves to stay alert and keep blood moving.",
        )
        .until(end)
    }
}

// ── TRANSIT ───────────────────────────────────────────────────────────────────

/// The TRANSIT event for `layover`.  A long layover suggests a nap only
/// when it overlaps a SLEEP window already in `planned`.
pub(crate) fn transit_event(layover: &Layover, planned: &[ScheduleEvent]) -> ScheduleEvent {
    let span = format_span(layover.minutes);
    let event = match layover.kind {
        LayoverKind::Short => ScheduleEvent::new(
            EventType::Transit,
            Phase::Flight,
            layover.starts,
            format!("Short Layover in {}", layover.airport),
            format!(
                "{span} to connect. Brisk Walk to your gate, refill your water, and grab a light snack. \
                 Skip coffee and alcohol on this connection."
            ),
        )
        .tagged(EventTag::ShortLayover)
        .suggest("Brisk Walk")
        .suggest("Hydration: drink 250-500 ml of water")
        .suggest("Light snack such as fruit or nuts"),

        LayoverKind::Long => {
            let restful = planned
                .iter()
                .any(|e| e.event_type == EventType::Sleep && e.overlaps(layover.starts, layover.ends));
            let base = ScheduleEvent::new(
                EventType::Transit,
                Phase::Flight,
                layover.starts,
                format!("Long Layover in {}", layover.airport),
                if restful {
                    format!("{span} on the ground during your sleep window. Find a quiet spot or lounge and nap.")
                } else {
                    format!("{span} on the ground. Take a longer walk through the terminal and get daylight.")
                },
            )
            .tagged(EventTag::LongLayover);
            let base = if restful {
                base.suggest("Quiet spot or lounge for a nap")
            } else {
                base.suggest("Longer walk through the terminal")
            };
            base.suggest("Avoid heavy duty-free shopping to keep stress low.")
        }
    };
    event.until(layover.ends)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn midnight(t: NaiveDateTime) -> NaiveDateTime {
    t.date().and_time(NaiveTime::MIN)
}

/// `7h 05m`, or `45m` under an hour.
pub fn format_span(minutes: Minutes) -> String {
    let (h, m) = (minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR);
    if h == 0 { format!("{m}m") } else { format!("{h}h {m:02}m") }
}
