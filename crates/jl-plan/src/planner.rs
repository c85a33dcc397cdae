//! `PlannerBuilder` and `Planner`: the single entry point from
//! `(Itinerary, BioProfile)` to a finished [`Plan`].

use jl_core::{BioProfile, Itinerary, PlannerConfig};
use jl_schedule::{ModifierContext, PhaseShift, Pipeline, Staged, Timeline, build};

use crate::observer::{NoopObserver, PlanObserver};
use crate::{Plan, PlanOutcome, PlanResult, ScienceLink};

// ── PlannerBuilder ────────────────────────────────────────────────────────────

/// Fluent builder for [`Planner`].
///
/// # Required
///
/// Nothing: `PlannerBuilder::new().build()` gives the standard seven-rule
/// pipeline with default tuning.
///
/// # Optional
///
/// | Method            | Default                         |
/// |-------------------|---------------------------------|
/// | `config`          | `PlannerConfig::default()`      |
/// | `pipeline`        | `Pipeline::standard()`          |
/// | `science_link(s)` | none                            |
pub struct PlannerBuilder {
    config: PlannerConfig,
    pipeline: Pipeline,
    science_links: Vec<ScienceLink>,
}

impl PlannerBuilder {
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
            pipeline: Pipeline::standard(),
            science_links: Vec::new(),
        }
    }

    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the modifier pipeline.  Mostly useful in tests.
    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn science_link(mut self, link: ScienceLink) -> Self {
        self.science_links.push(link);
        self
    }

    pub fn science_links(mut self, links: impl IntoIterator<Item = ScienceLink>) -> Self {
        self.science_links.extend(links);
        self
    }

    /// Validate the configuration and build the planner.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Config`][crate::PlanError::Config] for an
    /// inconsistent [`PlannerConfig`].
    pub fn build(self) -> PlanResult<Planner> {
        self.config.validate()?;
        tracing::debug!(stages = ?self.pipeline.stage_names(), "planner built");
        Ok(Planner {
            config: self.config,
            pipeline: self.pipeline,
            science_links: self.science_links,
        })
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Stateless between calls: `plan` takes `&self` and may be shared across
/// threads.
pub struct Planner {
    config: PlannerConfig,
    pipeline: Pipeline,
    science_links: Vec<ScienceLink>,
}

impl Planner {
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Produce the plan for one trip.
    ///
    /// Continuity warnings never block; they ride along in the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Schedule`][crate::PlanError::Schedule] when the
    /// itinerary is empty or a segment's timestamps cannot be parsed.
    pub fn plan(&self, itinerary: &Itinerary, profile: &BioProfile) -> PlanResult<PlanOutcome> {
        self.plan_observed(itinerary, profile, &mut NoopObserver)
    }

    /// Like [`plan`](Self::plan), reporting every step to `observer`.
    pub fn plan_observed<O: PlanObserver>(
        &self,
        itinerary: &Itinerary,
        profile: &BioProfile,
        observer: &mut O,
    ) -> PlanResult<PlanOutcome> {
        // ① Validate (advisory).
        let warnings = jl_validate::validate(itinerary);
        for warning in &warnings {
            tracing::warn!(%warning, "itinerary continuity");
        }
        observer.on_validated(&warnings);

        // ② Resolve onto the home clock and classify.
        let timeline = Timeline::resolve(itinerary, &self.config)?;
        let shift = PhaseShift::from_timeline(&timeline, &self.config);
        observer.on_classified(&shift);

        // ③ Base schedule.
        let base = build(&timeline, &shift, &self.config);
        observer.on_stage("builder", &base);

        // ④ Modifier pipeline.
        let ctx = ModifierContext::new(profile, &self.config, &timeline, shift);
        let staged = self
            .pipeline
            .apply_with(Staged::new(base), &ctx, |stage, staged| {
                observer.on_stage(stage, &staged.schedule)
            });

        // ⑤ Assemble.
        let plan = Plan::assemble(staged, &ctx, self.science_links.clone());
        tracing::info!(
            direction = %plan.direction,
            shift_minutes = plan.phase_shift.shift_minutes,
            events = plan.schedule.len(),
            recommendations = plan.recommendations.len(),
            warnings = warnings.len(),
            "plan generated"
        );
        observer.on_plan(&plan);

        Ok(PlanOutcome { plan, warnings })
    }

    /// Plan many trips.  Results keep input order.
    ///
    /// With the `parallel` feature the trips are planned on Rayon's thread
    /// pool.
    pub fn plan_batch(&self, trips: &[(Itinerary, BioProfile)]) -> Vec<PlanResult<PlanOutcome>> {
        #[cfg(not(feature = "parallel"))]
        {
            trips.iter().map(|(itinerary, profile)| self.plan(itinerary, profile)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            trips.par_iter().map(|(itinerary, profile)| self.plan(itinerary, profile)).collect()
        }
    }
}
