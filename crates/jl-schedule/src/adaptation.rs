//! Per-day phase-advance / phase-delay offsets.
//!
//! The body clock moves at most one *step* per day: `advance_step_minutes`
//! eastbound, `delay_step_minutes` westbound.  PRE days run from
//! `pre_days` days before departure up to departure day, moving one step
//! each; whatever is left after departure is worked off over the POST days.
//!
//! ```text
//! pre_offset(k)  = min(min(k + 1, pre_days) · step, total)     k = 0..=pre_days
//! achieved       = pre_offset(pre_days)
//! post_offset(d) = max(total − achieved − d · step, 0)          d = 0..post_days
//! ```

use jl_core::time::Minutes;
use jl_core::{Direction, PlannerConfig};

use crate::PhaseShift;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AdaptationCurve {
    direction: Direction,
    total:     Minutes,
    step:      Minutes,
    pre_days:  u32,
    post_days: u32,
}

impl AdaptationCurve {
    pub fn new(shift: &PhaseShift, config: &PlannerConfig) -> Self {
        let total = shift.magnitude();
        let step = match shift.direction {
            Direction::West => config.delay_step_minutes,
            _ => config.advance_step_minutes,
        }
        .max(1);

        let pre_days = if total == 0 { 0 } else { (div_ceil(total, step) as u32).min(config.max_pre_days) };
        let mut curve = Self { direction: shift.direction, total, step, pre_days, post_days: 1 };
        let residual = total - curve.achieved();
        curve.post_days = (div_ceil(residual, step) as u32 + 1).clamp(1, config.max_post_days.max(1));
        curve
    }

    /// Same day counts, different per-day step.
    pub fn with_step(&self, step: Minutes) -> Self {
        Self { step: step.max(1), ..*self }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn total(&self) -> Minutes {
        self.total
    }

    pub fn step(&self) -> Minutes {
        self.step
    }

    /// Number of adaptation days before departure day.
    pub fn pre_days(&self) -> u32 {
        self.pre_days
    }

    pub fn post_days(&self) -> u32 {
        self.post_days
    }

    /// Unsigned shift already achieved on PRE day `k` (`pre_days` is
    /// departure day).
    pub fn pre_offset(&self, k: u32) -> Minutes {
        let days = (k + 1).min(self.pre_days) as Minutes;
        (days * self.step).min(self.total)
    }

    /// Unsigned shift achieved by departure.
    pub fn achieved(&self) -> Minutes {
        self.pre_offset(self.pre_days)
    }

    /// Unsigned lag still carried on POST day `d` (0 = arrival day).
    pub fn post_offset(&self, d: u32) -> Minutes {
        (self.total - self.achieved() - d as Minutes * self.step).max(0)
    }

    /// Signed move for home-clock PRE events: eastbound earlier, westbound
    /// later.
    pub fn pre_shift(&self, k: u32) -> Minutes {
        -self.direction.sign() * self.pre_offset(k)
    }

    /// Signed move for destination-clock POST events: the body still lags,
    /// so eastbound bedtimes land later and westbound earlier.
    pub fn post_shift(&self, d: u32) -> Minutes {
        self.direction.sign() * self.post_offset(d)
    }
}

fn div_ceil(a: Minutes, b: Minutes) -> Minutes {
    if a <= 0 { 0 } else { (a + b - 1) / b }
}
