//! The seven bio-profile rules, one module each, in precedence order.

mod age;
mod alcohol;
mod caffeine;
mod chronotype;
mod light;
mod melatonin;
mod transit;

pub use age::AgeDampening;
pub use alcohol::{AlcoholRule, HYDRATION_RECOVERY, OPTIONAL_DRINK};
pub use caffeine::{CaffeineRule, HERBAL_HYDRATION, STRATEGIC_CAFFEINE};
pub use chronotype::ChronotypeShift;
pub use light::{BLUE_BLOCKERS, LightSensitivityRule};
pub use melatonin::{BEFORE_SLEEP, MELATONIN_INTAKE, MelatoninRule, SLEEP_SNACK};
pub use transit::TransitRule;

use chrono::NaiveDateTime;

use crate::{EventTag, Schedule};

/// `true` if `t` falls inside a short-layover TRANSIT window, where
/// stimulants and alcohol are never suggested.
pub(crate) fn in_short_layover(schedule: &Schedule, t: NaiveDateTime) -> bool {
    schedule
        .iter()
        .any(|e| e.has_tag(EventTag::ShortLayover) && e.covers(t))
}
