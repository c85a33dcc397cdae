use chrono::Timelike;
use jl_core::LightSensitivity;

use crate::modifier::{ModifierContext, ScheduleModifier, Staged};
use crate::recommendation::RecommendationItem;
use crate::{EventTag, EventType, ScheduleEvent};

pub const BLUE_BLOCKERS: &str = "Blue-Blocker Glasses";

/// Local hour from which a DARK cue counts as evening.
const EVENING_HOUR: u32 = 17;

/// `high`: blue blockers for the evening and a blackout mask for sleep.
pub struct LightSensitivityRule;

impl LightSensitivityRule {
    fn is_evening_cue(event: &ScheduleEvent, ctx: &ModifierContext<'_>) -> bool {
        event.has_tag(EventTag::WindDown)
            || (event.event_type == EventType::Dark && event.local_start(&ctx.clocks).hour() >= EVENING_HOUR)
    }
}

impl ScheduleModifier for LightSensitivityRule {
    fn name(&self) -> &'static str {
        "light"
    }

    fn modify(&self, staged: &Staged, ctx: &ModifierContext<'_>) -> Option<Staged> {
        if ctx.profile.light_sensitivity != LightSensitivity::High {
            return None;
        }
        let schedule = staged.schedule.map(|event| {
            if !Self::is_evening_cue(&event, ctx) || event.suggestions.iter().any(|s| s == BLUE_BLOCKERS) {
                return event;
            }
            event.suggest(BLUE_BLOCKERS)
        });

        let mut next = staged.with_schedule(schedule);
        next.recommendations.push(
            "Light Management",
            RecommendationItem::new(
                BLUE_BLOCKERS,
                "Amber lenses that filter the blue light that delays melatonin.",
                true,
            ),
        );
        next.recommendations.push(
            "Sleep",
            RecommendationItem::new(
                "Total Blackout Mask",
                "Contoured mask that blocks all light during sleep.",
                true,
            ),
        );
        Some(next)
    }
}
