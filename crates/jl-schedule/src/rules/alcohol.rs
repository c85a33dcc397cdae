use std::collections::BTreeSet;

use chrono::{NaiveDateTime, Timelike};
use jl_core::AlcoholPreference;
use jl_core::time::{Minutes, add_minutes, minutes_between};

use crate::modifier::{ModifierContext, ScheduleModifier, Staged};
use crate::rules::in_short_layover;
use crate::{EventTag, EventType, Phase, ScheduleEvent};

const DRINK_AFTER_MEAL: Minutes = 15;
const DRINK_LENGTH: Minutes = 45;
const RECOVERY_AFTER_DRINK: Minutes = 30;
const SLEEP_EXTENSION: Minutes = 45;

/// Local hours `[17, 22)` count as dinner.
const DINNER_HOURS: std::ops::Range<u32> = 17..22;

pub const OPTIONAL_DRINK: &str = "Optional Drink with Dinner";
pub const HYDRATION_RECOVERY: &str = "Hydration Recovery (+500ml water)";

/// `relax`: a drink with each dinner, water after every drink, and a longer
/// sleep afterwards.
pub struct AlcoholRule;

impl ScheduleModifier for AlcoholRule {
    fn name(&self) -> &'static str {
        "alcohol"
    }

    fn modify(&self, staged: &Staged, ctx: &ModifierContext<'_>) -> Option<Staged> {
        if ctx.profile.alcohol != AlcoholPreference::Relax {
            return None;
        }
        let schedule = &staged.schedule;

        // ── Drinks with dinner ────────────────────────────────────────────
        let drinks: Vec<ScheduleEvent> = schedule
            .iter()
            .filter(|e| e.has_tag(EventTag::Meal))
            .filter(|e| DINNER_HOURS.contains(&e.local_start(&ctx.clocks).hour()))
            .map(|meal| (meal, add_minutes(meal.start, DRINK_AFTER_MEAL)))
            .filter(|&(_, at)| !in_short_layover(schedule, at))
            .filter(|&(_, at)| !schedule.iter().any(|e| e.has_tag(EventTag::Alcohol) && e.start == at))
            .map(|(meal, at)| {
                ScheduleEvent::new(
                    EventType::Activity,
                    meal.phase,
                    at,
                    OPTIONAL_DRINK,
                    "One glass with food is fine. Stop at least three hours before bed.",
                )
                .lasting(DRINK_LENGTH)
                .tagged(EventTag::Alcohol)
                .with_note(
                    "Alcohol helps you fall asleep but fragments the second half of the night. \
                     Pairing it with food and water blunts the effect.",
                )
            })
            .collect();
        let with_drinks = schedule.with_inserted(drinks);

        // ── Recovery water and a longer sleep ─────────────────────────────
        let alcohol: Vec<&ScheduleEvent> = with_drinks.iter().filter(|e| e.has_tag(EventTag::Alcohol)).collect();
        let recoveries: Vec<ScheduleEvent> = alcohol
            .iter()
            .map(|drink| (drink.phase, add_minutes(drink.start, RECOVERY_AFTER_DRINK)))
            .filter(|&(_, at)| !with_drinks.titled(HYDRATION_RECOVERY).any(|e| e.start == at))
            .map(|(phase, at)| {
                ScheduleEvent::new(
                    EventType::Food,
                    phase,
                    at,
                    HYDRATION_RECOVERY,
                    "Drink 500 ml of water to offset the drink.",
                )
                .tagged(EventTag::Hydration)
            })
            .collect();

        let extend: BTreeSet<NaiveDateTime> = alcohol
            .iter()
            .filter_map(|drink| {
                with_drinks
                    .of_type(EventType::Sleep)
                    .find(|s| s.start >= drink.start)
                    .map(|s| s.start)
            })
            .collect();

        let schedule = with_drinks.with_inserted(recoveries).map(|event| {
            if event.event_type != EventType::Sleep || !extend.contains(&event.start) {
                return event;
            }
            let Some(end) = event.end else {
                return event;
            };
            let extra = match event.phase {
                Phase::Pre => SLEEP_EXTENSION.min(minutes_between(end, ctx.pre_cutoff()).max(0)),
                _ => SLEEP_EXTENSION,
            };
            if extra == 0 {
                return event;
            }
            let mut event = event.until(add_minutes(end, extra));
            event.append_detail(&format!("Extended by {extra} minutes to make up for lighter sleep after alcohol."));
            event
        });
        Some(staged.with_schedule(schedule))
    }
}
