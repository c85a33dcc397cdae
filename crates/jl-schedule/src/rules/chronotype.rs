use jl_core::Chronotype;
use jl_core::time::Minutes;

use crate::modifier::{ModifierContext, ScheduleModifier, Staged};
use crate::{EventType, Phase, ScheduleEvent};

const NIGHT_OWL_SHIFT: Minutes = 90;
const EARLY_BIRD_SHIFT: Minutes = -60;

/// Moves the daily rhythm outside the FLIGHT phase to suit the traveller's
/// chronotype.
///
/// A move never carries a PRE event past the airport cutoff or a POST event
/// to before the traveller has left the arrival airport; such events go as
/// far as the boundary and stop.
pub struct ChronotypeShift;

impl ChronotypeShift {
    pub fn offset(chronotype: Chronotype) -> Minutes {
        match chronotype {
            Chronotype::NightOwl => NIGHT_OWL_SHIFT,
            Chronotype::EarlyBird => EARLY_BIRD_SHIFT,
            Chronotype::Balanced => 0,
        }
    }

    /// Events this rule moves: wake-ups, sleep, light and dark windows, and
    /// the morning coffee that follows the wake-up.
    pub fn applies_to(event: &ScheduleEvent) -> bool {
        event.phase != Phase::Flight
            && (event.is_wake()
                || matches!(
                    event.event_type,
                    EventType::Sleep | EventType::Light | EventType::Dark | EventType::Caffeine
                ))
    }
}

impl ScheduleModifier for ChronotypeShift {
    fn name(&self) -> &'static str {
        "chronotype"
    }

    fn modify(&self, staged: &Staged, ctx: &ModifierContext<'_>) -> Option<Staged> {
        let chronotype = ctx.profile.chronotype;
        let offset = Self::offset(chronotype);
        if offset == 0 {
            return None;
        }
        let schedule = staged.schedule.map(|event| {
            if !Self::applies_to(&event) {
                return event;
            }
            let moved = ctx.bounded_shift(&event, offset);
            if moved == 0 {
                return event;
            }
            let mut event = event.shifted(moved);
            event.append_detail(&if moved > 0 {
                format!("Moved {moved} minutes later to suit a {chronotype} chronotype.")
            } else {
                format!("Moved {} minutes earlier to suit an {chronotype} chronotype.", -moved)
            });
            event
        });
        Some(staged.with_schedule(schedule))
    }
}
