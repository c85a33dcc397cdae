//! Planner tuning knobs.
//!
//! Typically left at `Default`; the demo binary can load overrides from a
//! TOML file.  Every field has a default so partial files are fine.

use crate::time::Minutes;
use crate::{AgeGroup, CoreError, CoreResult};

/// Top-level planner configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// A folded shift no larger than this is `NORTH_SOUTH`.
    pub north_south_threshold_minutes: Minutes,

    /// Layovers strictly shorter than this are "short".
    pub short_layover_minutes: Minutes,

    /// Eastbound per-day phase advance.
    pub advance_step_minutes: Minutes,

    /// Westbound per-day phase delay.  Delays are easier, hence larger.
    pub delay_step_minutes: Minutes,

    /// Upper bound on pre-departure adaptation days (look-back window).
    pub max_pre_days: u32,

    /// Upper bound on post-arrival consolidation days.
    pub max_post_days: u32,

    /// Length of a PRE/POST light-seeking window before dampening.
    pub light_window_minutes: Minutes,

    /// Length of a core sleep block.
    pub sleep_block_minutes: Minutes,

    /// Habitual bedtime, minutes after midnight (23:00).
    pub baseline_bedtime: Minutes,

    /// Habitual wake time, minutes after midnight (07:00).
    pub baseline_wake: Minutes,

    /// PRE events must end this long before the first departure.
    pub airport_buffer_minutes: Minutes,

    /// Percent of the normal step and light window kept for 50-70.
    pub senior_dampening_percent: u32,

    /// Percent of the normal step and light window kept for 70+.
    pub elder_dampening_percent: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            north_south_threshold_minutes: 60,
            short_layover_minutes:         120,
            advance_step_minutes:          60,
            delay_step_minutes:            90,
            max_pre_days:                  3,
            max_post_days:                 3,
            light_window_minutes:          60,
            sleep_block_minutes:           480,
            baseline_bedtime:              23 * 60,
            baseline_wake:                 7 * 60,
            airport_buffer_minutes:        120,
            senior_dampening_percent:      75,
            elder_dampening_percent:       50,
        }
    }
}

impl PlannerConfig {
    /// Reject settings the scheduler cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.advance_step_minutes <= 0 || self.delay_step_minutes <= 0 {
            return Err(CoreError::Config("adaptation steps must be positive".into()));
        }
        if self.sleep_block_minutes <= 0 || self.light_window_minutes <= 0 {
            return Err(CoreError::Config(
                "sleep block and light window must be positive".into(),
            ));
        }
        if self.short_layover_minutes < 0 || self.north_south_threshold_minutes < 0 {
            return Err(CoreError::Config("thresholds must not be negative".into()));
        }
        for (name, clock) in [("baseline_bedtime", self.baseline_bedtime), ("baseline_wake", self.baseline_wake)] {
            if !(0..1_440).contains(&clock) {
                return Err(CoreError::Config(format!("{name} must be within 0..1440, got {clock}")));
            }
        }
        for pct in [self.senior_dampening_percent, self.elder_dampening_percent] {
            if !(1..=100).contains(&pct) {
                return Err(CoreError::Config(format!(
                    "dampening percent must be within 1..=100, got {pct}"
                )));
            }
        }
        Ok(())
    }

    /// Percent of the normal eastbound step/light window kept for `age`.
    pub fn dampening_percent(&self, age: AgeGroup) -> u32 {
        match age {
            AgeGroup::Senior => self.senior_dampening_percent,
            AgeGroup::Elder => self.elder_dampening_percent,
            _ => 100,
        }
    }

    /// `minutes` scaled by `percent`, never below one minute.
    #[inline]
    pub fn scale(minutes: Minutes, percent: u32) -> Minutes {
        (minutes * percent as Minutes / 100).max(1)
    }
}
