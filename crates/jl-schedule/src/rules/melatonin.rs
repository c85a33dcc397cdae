use jl_core::MelatoninPreference;
use jl_core::time::{Minutes, add_minutes};

use crate::modifier::{ModifierContext, ScheduleModifier, Staged};
use crate::recommendation::RecommendationItem;
use crate::{EventTag, EventType, ScheduleEvent};

/// Sleep prep happens this long before every SLEEP event.
pub const BEFORE_SLEEP: Minutes = 30;

pub const MELATONIN_INTAKE: &str = "Melatonin Intake";
pub const SLEEP_SNACK: &str = "Sleep-Inducing Snack";

/// `supplements`: a low dose before every sleep.  `natural`: a snack that
/// supports sleep instead.  Exactly one of the two per profile.
pub struct MelatoninRule;

impl ScheduleModifier for MelatoninRule {
    fn name(&self) -> &'static str {
        "melatonin"
    }

    fn modify(&self, staged: &Staged, ctx: &ModifierContext<'_>) -> Option<Staged> {
        let preference = ctx.profile.melatonin;
        let (event_type, title) = match preference {
            MelatoninPreference::Supplements => (EventType::Activity, MELATONIN_INTAKE),
            MelatoninPreference::Natural => (EventType::Food, SLEEP_SNACK),
        };

        let schedule = &staged.schedule;
        let prep: Vec<ScheduleEvent> = schedule
            .of_type(EventType::Sleep)
            .map(|sleep| (sleep.phase, add_minutes(sleep.start, -BEFORE_SLEEP)))
            .filter(|&(_, at)| !schedule.titled(title).any(|e| e.start == at))
            .map(|(phase, at)| prep_event(preference, event_type, title, phase, at))
            .collect();

        let mut next = staged.with_schedule(schedule.with_inserted(prep));
        match preference {
            MelatoninPreference::Supplements => {
                next.recommendations.push(
                    "Sleep Aids",
                    RecommendationItem::new(
                        "Melatonin (0.5-3 mg)",
                        "Low-dose melatonin taken 30 minutes before destination bedtime.",
                        true,
                    ),
                );
            }
            MelatoninPreference::Natural => {
                next.recommendations.push(
                    "Sleep Nutrition",
                    RecommendationItem::new(
                        "Tart Cherry Juice Concentrate",
                        "A small glass in the evening is a natural way to wind down.",
                        true,
                    ),
                );
                next.recommendations.push(
                    "Sleep Nutrition",
                    RecommendationItem::new(
                        "Magnesium-Rich Snack Pack",
                        "Almonds, pumpkin seeds, and dark chocolate for the bedtime snack.",
                        true,
                    ),
                );
            }
        }
        Some(next)
    }
}

fn prep_event(
    preference: MelatoninPreference,
    event_type: EventType,
    title:      &str,
    phase:      crate::Phase,
    at:         chrono::NaiveDateTime,
) -> ScheduleEvent {
    let event = match preference {
        MelatoninPreference::Supplements => ScheduleEvent::new(
            event_type,
            phase,
            at,
            title,
            "Take 0.5-3 mg of melatonin with water.",
        )
        .with_note(
            "A small dose of melatonin signals night to your body clock. \
             Timing matters more than dose.",
        ),
        MelatoninPreference::Natural => ScheduleEvent::new(
            event_type,
            phase,
            at,
            title,
            "A small snack: tart cherries, a banana, or a handful of almonds.",
        ),
    };
    event.tagged(EventTag::SleepPrep)
}
