//! Schedule event model: `EventType`, `Phase`, `EventTag`, `ScheduleEvent`,
//! and the phase-ordered `Schedule`.
//!
//! # Clocks
//!
//! `start`/`end` are instants on the *home clock* (the first departure
//! airport).  The human-readable `HH:MM (ORIG) / HH:MM (DEST)` label is
//! derived from them with a [`ClockPair`] when the plan is rendered, so a
//! modifier that moves an event only ever touches `start`/`end`.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use jl_core::time::{Minutes, add_minutes, minutes_between};
use jl_core::ClockPair;

use crate::notes;

// ── EventType / Phase ─────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EventType {
    Sleep,
    /// Seek light.
    Light,
    /// Avoid light.
    Dark,
    Food,
    Caffeine,
    Activity,
    Flight,
    /// A layover between two segments.
    Transit,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Sleep    => "SLEEP",
            EventType::Light    => "LIGHT",
            EventType::Dark     => "DARK",
            EventType::Food     => "FOOD",
            EventType::Caffeine => "CAFFEINE",
            EventType::Activity => "ACTIVITY",
            EventType::Flight   => "FLIGHT",
            EventType::Transit  => "TRANSIT",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered: every PRE event sorts before every FLIGHT event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Phase {
    Pre,
    Flight,
    Post,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Pre    => "PRE",
            Phase::Flight => "FLIGHT",
            Phase::Post   => "POST",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── EventTag ──────────────────────────────────────────────────────────────────

/// Semantic markers the modifier rules select on.
///
/// `EventType` is what the traveller sees; tags are what the rules need to
/// know ("this ACTIVITY is the wake-up", "this TRANSIT is short").
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventTag {
    Wake,
    CoreSleep,
    LightSeeking,
    WindDown,
    Meal,
    Alcohol,
    SleepPrep,
    Hydration,
    ShortLayover,
    LongLayover,
}

/// Record of the phase-advance/delay offset the builder applied to a PRE or
/// POST event, so the age rule can recompute it with a gentler step.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Adaptation {
    /// Day index within the phase (0 = first PRE day / arrival day).
    pub day: u32,
    /// Signed minutes already applied to `start`/`end`.
    pub applied: Minutes,
}

// ── ScheduleEvent ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScheduleEvent {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub event_type: EventType,
    pub title: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub science_note: Option<String>,
    pub phase: Phase,
    /// Home-clock start.
    pub start: NaiveDateTime,
    /// Home-clock end; `None` for instantaneous cues.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub end: Option<NaiveDateTime>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "BTreeSet::is_empty", default))]
    pub tags: BTreeSet<EventTag>,
    /// Gear or behaviour suggestions attached by modifier rules.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty", default))]
    pub suggestions: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub adaptation: Option<Adaptation>,
}

impl ScheduleEvent {
    /// An instantaneous event carrying the default science note for its type.
    pub fn new(
        event_type:  EventType,
        phase:       Phase,
        start:       NaiveDateTime,
        title:       impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            event_type,
            title:        title.into(),
            description:  description.into(),
            science_note: Some(notes::template(event_type).to_owned()),
            phase,
            start,
            end:          None,
            tags:         BTreeSet::new(),
            suggestions:  Vec::new(),
            adaptation:   None,
        }
    }

    /// Give the event a duration.
    pub fn lasting(mut self, minutes: Minutes) -> Self {
        self.end = Some(add_minutes(self.start, minutes));
        self
    }

    /// Give the event an explicit end instant.
    pub fn until(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn tagged(mut self, tag: EventTag) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn adapted(mut self, day: u32, applied: Minutes) -> Self {
        self.adaptation = Some(Adaptation { day, applied });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.science_note = Some(note.into());
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    #[inline]
    pub fn has_tag(&self, tag: EventTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Wake-type events are ACTIVITY cues tagged as the wake-up.
    #[inline]
    pub fn is_wake(&self) -> bool {
        self.has_tag(EventTag::Wake)
    }

    /// Minutes from `start` to `end`, or 0 for an instant.
    pub fn duration(&self) -> Minutes {
        self.end.map_or(0, |end| minutes_between(self.start, end))
    }

    /// `true` if `t` falls inside `[start, end)`.
    pub fn covers(&self, t: NaiveDateTime) -> bool {
        match self.end {
            Some(end) => t >= self.start && t < end,
            None => t == self.start,
        }
    }

    /// `true` if `[start, end)` intersects `[from, to)`.
    pub fn overlaps(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        let end = self.end.unwrap_or(self.start);
        self.start < to && end > from
    }

    /// Move the whole event by `minutes`.
    pub fn shifted(mut self, minutes: Minutes) -> Self {
        self.start = add_minutes(self.start, minutes);
        self.end = self.end.map(|e| add_minutes(e, minutes));
        self
    }

    /// Add a sentence to the description.  Rules explain their adjustments
    /// here so the science note stays at one or two sentences.
    pub fn append_detail(&mut self, sentence: &str) {
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(sentence);
    }

    /// The display label, e.g. `22:30 (JFK) / 11:30 (SIN)`.
    pub fn time(&self, clocks: &ClockPair) -> String {
        clocks.render_window(self.start, self.end)
    }

    /// The wall clock this event is lived on: home before departure,
    /// destination afterwards.
    pub fn local_start(&self, clocks: &ClockPair) -> NaiveDateTime {
        match self.phase {
            Phase::Pre => self.start,
            Phase::Flight | Phase::Post => clocks.to_destination(self.start),
        }
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// An immutable, phase-ordered list of events.
///
/// Events are sorted by `(phase, start)`; the sort is stable so events that
/// share a start keep the order they were produced in.  Stages never edit a
/// `Schedule` in place: they build a new one with [`Schedule::new`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Schedule {
    events: Vec<ScheduleEvent>,
}

impl Schedule {
    pub fn new(mut events: Vec<ScheduleEvent>) -> Self {
        events.sort_by_key(|e| (e.phase, e.start));
        Self { events }
    }

    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<ScheduleEvent> {
        self.events
    }

    /// Events of one phase, in order.
    pub fn phase(&self, phase: Phase) -> impl Iterator<Item = &ScheduleEvent> {
        self.events.iter().filter(move |e| e.phase == phase)
    }

    /// Events of one type, in order.
    pub fn of_type(&self, event_type: EventType) -> impl Iterator<Item = &ScheduleEvent> {
        self.events.iter().filter(move |e| e.event_type == event_type)
    }

    /// Events whose title matches exactly.
    pub fn titled<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a ScheduleEvent> {
        self.events.iter().filter(move |e| e.title == title)
    }

    /// A new schedule with every event passed through `f`.
    pub fn map(&self, f: impl FnMut(ScheduleEvent) -> ScheduleEvent) -> Schedule {
        Schedule::new(self.events.iter().cloned().map(f).collect())
    }

    /// A new schedule with `extra` merged in.
    pub fn with_inserted(&self, extra: Vec<ScheduleEvent>) -> Schedule {
        let mut events = self.events.clone();
        events.extend(extra);
        Schedule::new(events)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEvent;
    type IntoIter = std::slice::Iter<'a, ScheduleEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
