//! Planner observer trait for stage-by-stage inspection.

use jl_schedule::{PhaseShift, Schedule};
use jl_validate::Warning;

use crate::Plan;

/// Callbacks invoked by [`Planner::plan_observed`][crate::Planner::plan_observed]
/// at each step of the pipeline.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: stage counter
///
/// ```rust,ignore
/// struct StageSizes(Vec<(&'static str, usize)>);
///
/// impl PlanObserver for StageSizes {
///     fn on_stage(&mut self, stage: &'static str, schedule: &Schedule) {
///         self.0.push((stage, schedule.len()));
///     }
/// }
/// ```
pub trait PlanObserver {
    /// Called once with the validator's findings (possibly empty).
    fn on_validated(&mut self, _warnings: &[Warning]) {}

    /// Called once the trip's direction and shift are known.
    fn on_classified(&mut self, _shift: &PhaseShift) {}

    /// Called with the base schedule (stage `"builder"`) and after every
    /// modifier stage, in order.  A stage that did not apply reports the
    /// schedule it was given.
    fn on_stage(&mut self, _stage: &'static str, _schedule: &Schedule) {}

    /// Called once with the finished plan.
    fn on_plan(&mut self, _plan: &Plan) {}
}

/// A [`PlanObserver`] that does nothing.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}

/// Logs every step at `debug` level.
pub struct TracingObserver;

impl PlanObserver for TracingObserver {
    fn on_validated(&mut self, warnings: &[Warning]) {
        tracing::debug!(warnings = warnings.len(), "itinerary validated");
    }

    fn on_classified(&mut self, shift: &PhaseShift) {
        tracing::debug!(
            direction = %shift.direction,
            shift_minutes = shift.shift_minutes,
            inferred = shift.inferred,
            "phase shift classified"
        );
    }

    fn on_stage(&mut self, stage: &'static str, schedule: &Schedule) {
        tracing::debug!(stage, events = schedule.len(), "stage complete");
    }

    fn on_plan(&mut self, plan: &Plan) {
        tracing::debug!(
            events = plan.schedule.len(),
            categories = plan.recommendations.len(),
            "plan assembled"
        );
    }
}
