use jl_core::{Direction, PlannerConfig};

use crate::modifier::{ModifierContext, ScheduleModifier, Staged};
use crate::{EventTag, Phase};

/// Gentler eastbound adaptation for travellers aged 50 and over.
///
/// Light-seeking windows in PRE and POST are shortened and every adapted
/// event is re-placed on a curve with a smaller daily step, never past the
/// phase boundaries.  No event is removed.
pub struct AgeDampening;

impl ScheduleModifier for AgeDampening {
    fn name(&self) -> &'static str {
        "age"
    }

    fn modify(&self, staged: &Staged, ctx: &ModifierContext<'_>) -> Option<Staged> {
        let age = ctx.profile.age_group;
        if ctx.shift.direction != Direction::East || !age.adapts_slowly() {
            return None;
        }
        let percent = ctx.config.dampening_percent(age);
        let gentle = ctx.curve.with_step(PlannerConfig::scale(ctx.curve.step(), percent));

        let schedule = staged.schedule.map(|mut event| {
            if event.phase == Phase::Flight {
                return event;
            }
            if let Some(mut adaptation) = event.adaptation {
                let target = match event.phase {
                    Phase::Pre => gentle.pre_shift(adaptation.day),
                    _ => gentle.post_shift(adaptation.day),
                };
                let delta = ctx.bounded_shift(&event, target - adaptation.applied);
                adaptation.applied += delta;
                event = event.shifted(delta);
                event.adaptation = Some(adaptation);
            }
            if event.has_tag(EventTag::LightSeeking) && event.end.is_some() {
                let shortened = PlannerConfig::scale(event.duration(), percent);
                event = event.lasting(shortened);
                event.append_detail(&format!(
                    "Shortened to {shortened} minutes because clocks adjust more slowly in the {age} age group."
                ));
            }
            event
        });
        Some(staged.with_schedule(schedule))
    }
}
