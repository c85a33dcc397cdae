//! The finished, immutable plan.

use std::ops::Deref;

use jl_core::{ClockPair, Direction};
use jl_schedule::{
    EventType, ModifierContext, Phase, PhaseShift, Recommendation, ScheduleEvent, Staged,
};
use jl_validate::Warning;

/// Caller-supplied reading material, passed through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScienceLink {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl ScienceLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into(), description: description.into() }
    }
}

/// A schedule event with its rendered two-clock label.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanEvent {
    /// e.g. `22:30 (JFK) / 11:30 (SIN)`.
    pub time: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub event: ScheduleEvent,
}

impl Deref for PlanEvent {
    type Target = ScheduleEvent;

    fn deref(&self) -> &ScheduleEvent {
        &self.event
    }
}

/// One plan per `(Itinerary, BioProfile)`.  Identical inputs give identical
/// plans.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Plan {
    pub direction: Direction,
    pub phase_shift: PhaseShift,
    pub clocks: ClockPair,
    /// Phase-ordered, chronological within a phase.
    pub schedule: Vec<PlanEvent>,
    pub recommendations: Vec<Recommendation>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub science_links: Vec<ScienceLink>,
}

impl Plan {
    pub(crate) fn assemble(staged: Staged, ctx: &ModifierContext<'_>, science_links: Vec<ScienceLink>) -> Plan {
        let recommendations = staged.recommendations.aggregate();
        let schedule = staged
            .schedule
            .into_events()
            .into_iter()
            .map(|event| PlanEvent { time: event.time(&ctx.clocks), event })
            .collect();
        Plan {
            direction: ctx.shift.direction,
            phase_shift: ctx.shift,
            clocks: ctx.clocks.clone(),
            schedule,
            recommendations,
            science_links,
        }
    }

    pub fn phase(&self, phase: Phase) -> impl Iterator<Item = &PlanEvent> {
        self.schedule.iter().filter(move |e| e.phase == phase)
    }

    pub fn of_type(&self, event_type: EventType) -> impl Iterator<Item = &PlanEvent> {
        self.schedule.iter().filter(move |e| e.event_type == event_type)
    }

    pub fn titled<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a PlanEvent> {
        self.schedule.iter().filter(move |e| e.title == title)
    }

    /// Every recommended item name, across categories.
    pub fn recommended_names(&self) -> impl Iterator<Item = &str> {
        self.recommendations
            .iter()
            .flat_map(|r| r.items.iter().map(|i| i.name.as_str()))
    }
}

/// A plan plus the advisory warnings found on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanOutcome {
    pub plan: Plan,
    pub warnings: Vec<Warning>,
}
