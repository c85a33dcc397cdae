use jl_core::CaffeinePreference;
use jl_core::time::{Minutes, add_minutes};

use crate::modifier::{ModifierContext, ScheduleModifier, Staged};
use crate::rules::in_short_layover;
use crate::{EventTag, EventType, Phase, ScheduleEvent};

/// Strategic dose before each wake-up.
const BEFORE_WAKE: Minutes = 30;
/// Last dose before the final touchdown.
const BEFORE_ARRIVAL: Minutes = 120;

pub const STRATEGIC_CAFFEINE: &str = "Strategic Caffeine";
pub const HERBAL_HYDRATION: &str = "Herbal Hydration";

/// `optimized` inserts timed doses, `avoid` replaces every caffeine cue with
/// a caffeine-free drink, `necessary` leaves the schedule alone.
pub struct CaffeineRule;

impl ScheduleModifier for CaffeineRule {
    fn name(&self) -> &'static str {
        "caffeine"
    }

    fn modify(&self, staged: &Staged, ctx: &ModifierContext<'_>) -> Option<Staged> {
        match ctx.profile.caffeine {
            CaffeinePreference::Necessary => None,
            CaffeinePreference::Optimized => Some(insert_doses(staged, ctx)),
            CaffeinePreference::Avoid => {
                if staged.schedule.of_type(EventType::Caffeine).next().is_none() {
                    return None;
                }
                let schedule = staged.schedule.map(|event| {
                    if event.event_type != EventType::Caffeine {
                        return event;
                    }
                    let mut event = ScheduleEvent {
                        event_type:  EventType::Food,
                        title:       HERBAL_HYDRATION.into(),
                        description: "Caffeine-free herbal tea or water instead of coffee.".into(),
                        ..event
                    }
                    .tagged(EventTag::Hydration);
                    event.append_detail("Swapped for a caffeine-free drink to match your preference.");
                    event
                });
                Some(staged.with_schedule(schedule))
            }
        }
    }
}

fn insert_doses(staged: &Staged, ctx: &ModifierContext<'_>) -> Staged {
    let schedule = &staged.schedule;
    let mut doses: Vec<ScheduleEvent> = schedule
        .iter()
        .filter(|e| e.is_wake())
        .map(|wake| (wake.phase, add_minutes(wake.start, -BEFORE_WAKE)))
        .filter(|&(_, at)| !in_short_layover(schedule, at))
        .map(|(phase, at)| {
            ScheduleEvent::new(
                EventType::Caffeine,
                phase,
                at,
                STRATEGIC_CAFFEINE,
                "Have a coffee or tea now so it kicks in as you get up.",
            )
        })
        .collect();

    let pre_arrival = add_minutes(ctx.timeline.final_arrival(), -BEFORE_ARRIVAL);
    if !in_short_layover(schedule, pre_arrival) {
        doses.push(
            ScheduleEvent::new(
                EventType::Caffeine,
                Phase::Flight,
                pre_arrival,
                STRATEGIC_CAFFEINE,
                "One cup now keeps you alert through landing and immigration.",
            ),
        );
    }
    staged.with_schedule(schedule.with_inserted(doses))
}
