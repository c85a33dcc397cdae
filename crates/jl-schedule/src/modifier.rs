//! `ScheduleModifier`: one bio-profile rule applied over a staged schedule.
//!
//! A modifier receives the schedule and recommendations produced by every
//! earlier stage and returns a *new* staged value, or `None` to leave it
//! untouched.  Modifiers never edit their input in place, so each stage can
//! be run and inspected on its own.
//!
//! # Stacking
//!
//! Stages run in a fixed order (see [`Pipeline::standard`]).  A later stage
//! may move, extend, retype, or annotate events an earlier stage produced,
//! and may add recommendations, but it must not drop events or science
//! notes.  Compose ad-hoc chains with [`ScheduleModifierExt::then`].

use chrono::NaiveDateTime;
use jl_core::time::{Minutes, add_minutes, minutes_between};
use jl_core::{BioProfile, ClockPair, PlannerConfig};

use crate::adaptation::AdaptationCurve;
use crate::builder::ARRIVAL_SETTLE;
use crate::recommendation::{Recommendation, RecommendationSet};
use crate::timing::Timeline;
use crate::{Phase, PhaseShift, Schedule, ScheduleEvent};

// ── Staged value and context ─────────────────────────────────────────────────

/// What flows between stages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Staged {
    pub schedule: Schedule,
    pub recommendations: RecommendationSet,
}

impl Staged {
    pub fn new(schedule: Schedule) -> Self {
        Self { schedule, recommendations: RecommendationSet::new() }
    }

    /// Same recommendations, different schedule.
    pub fn with_schedule(&self, schedule: Schedule) -> Self {
        Self { schedule, recommendations: self.recommendations.clone() }
    }
}

/// Read-only inputs every rule may consult.
#[derive(Clone, Debug)]
pub struct ModifierContext<'a> {
    pub profile:  &'a BioProfile,
    pub config:   &'a PlannerConfig,
    pub timeline: &'a Timeline,
    pub shift:    PhaseShift,
    pub clocks:   ClockPair,
    pub curve:    AdaptationCurve,
}

impl<'a> ModifierContext<'a> {
    pub fn new(
        profile:  &'a BioProfile,
        config:   &'a PlannerConfig,
        timeline: &'a Timeline,
        shift:    PhaseShift,
    ) -> Self {
        Self {
            profile,
            config,
            timeline,
            shift,
            clocks: timeline.clocks(),
            curve: AdaptationCurve::new(&shift, config),
        }
    }

    /// No PRE event may run past this: first departure minus the airport
    /// buffer.
    pub fn pre_cutoff(&self) -> NaiveDateTime {
        add_minutes(self.timeline.first_departure(), -self.config.airport_buffer_minutes)
    }

    /// No POST event may start before this: touchdown plus the time it
    /// takes to leave the airport.
    pub fn post_floor(&self) -> NaiveDateTime {
        add_minutes(self.timeline.final_arrival(), ARRIVAL_SETTLE)
    }

    /// `minutes` limited so that moving `event` by it keeps the event inside
    /// its phase.  FLIGHT events are anchored elsewhere and pass through.
    pub fn bounded_shift(&self, event: &ScheduleEvent, minutes: Minutes) -> Minutes {
        match event.phase {
            Phase::Pre => {
                let last = event.end.unwrap_or(event.start);
                minutes.min(minutes_between(last, self.pre_cutoff()).max(0))
            }
            Phase::Post => minutes.max(minutes_between(event.start, self.post_floor()).min(0)),
            Phase::Flight => minutes,
        }
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// One rule of the modifier pipeline.
///
/// # Contract
///
/// - Must be a pure function of `staged` and `ctx`.
/// - Must not block or perform I/O.
/// - Implementations must be `Send + Sync` (batch planning shares them
///   across Rayon threads).
pub trait ScheduleModifier: Send + Sync {
    /// Stage name reported to observers and logs.
    fn name(&self) -> &'static str;

    /// Optionally produce a new staged value.
    ///
    /// - Return `Some(staged)` to replace the input.
    /// - Return `None` when the rule does not apply to this profile.
    fn modify(&self, staged: &Staged, ctx: &ModifierContext<'_>) -> Option<Staged>;
}

// ── Chained modifier ──────────────────────────────────────────────────────────

/// Applies two modifiers in sequence.
///
/// The second modifier sees the (possibly modified) output of the first.
/// Construct chains with `modifier_a.then(modifier_b)`.
pub struct ChainedModifier<A: ScheduleModifier, B: ScheduleModifier> {
    first:  A,
    second: B,
}

impl<A: ScheduleModifier, B: ScheduleModifier> ScheduleModifier for ChainedModifier<A, B> {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn modify(&self, staged: &Staged, ctx: &ModifierContext<'_>) -> Option<Staged> {
        let after_first = self.first.modify(staged, ctx);
        let candidate = after_first.as_ref().unwrap_or(staged);
        self.second.modify(candidate, ctx).or(after_first)
    }
}

/// Extension trait that adds `.then(other)` to any `ScheduleModifier`.
pub trait ScheduleModifierExt: ScheduleModifier + Sized {
    fn then<B: ScheduleModifier>(self, other: B) -> ChainedModifier<Self, B> {
        ChainedModifier { first: self, second: other }
    }
}

impl<M: ScheduleModifier + Sized> ScheduleModifierExt for M {}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// An ordered list of boxed stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn ScheduleModifier>>,
}

impl Pipeline {
    /// An empty pipeline; add stages with [`with`](Self::with).
    pub fn new() -> Self {
        Self::default()
    }

    /// The seven bio-profile rules in precedence order:
    /// age → chronotype → caffeine → alcohol → melatonin → light → transit.
    pub fn standard() -> Self {
        use crate::rules::{
            AgeDampening, AlcoholRule, CaffeineRule, ChronotypeShift, LightSensitivityRule, MelatoninRule,
            TransitRule,
        };
        Self::new()
            .with(AgeDampening)
            .with(ChronotypeShift)
            .with(CaffeineRule)
            .with(AlcoholRule)
            .with(MelatoninRule)
            .with(LightSensitivityRule)
            .with(TransitRule)
    }

    pub fn with(mut self, stage: impl ScheduleModifier + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over `base`.
    pub fn apply(&self, base: Staged, ctx: &ModifierContext<'_>) -> Staged {
        self.apply_with(base, ctx, |_, _| {})
    }

    /// Like [`apply`](Self::apply), calling `on_stage` after every stage
    /// with the stage name and its output (unchanged input for a no-op).
    pub fn apply_with(
        &self,
        base: Staged,
        ctx: &ModifierContext<'_>,
        mut on_stage: impl FnMut(&'static str, &Staged),
    ) -> Staged {
        let mut current = base;
        for stage in &self.stages {
            if let Some(next) = stage.modify(&current, ctx) {
                tracing::debug!(
                    stage = stage.name(),
                    events = next.schedule.len(),
                    recommendations = next.recommendations.len(),
                    "modifier applied"
                );
                current = next;
            }
            on_stage(stage.name(), &current);
        }
        current
    }
}

/// Run the standard pipeline over `schedule` and return the final schedule
/// with its grouped recommendations.
pub fn apply(schedule: Schedule, ctx: &ModifierContext<'_>) -> (Schedule, Vec<Recommendation>) {
    let staged = Pipeline::standard().apply(Staged::new(schedule), ctx);
    let recommendations = staged.recommendations.aggregate();
    (staged.schedule, recommendations)
}
