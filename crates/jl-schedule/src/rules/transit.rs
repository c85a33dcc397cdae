use crate::modifier::{ModifierContext, ScheduleModifier, Staged};
use crate::recommendation::RecommendationItem;
use crate::transit::LayoverKind;

/// Gear for the layovers on this trip.  TRANSIT events are left as the
/// builder made them.
pub struct TransitRule;

impl ScheduleModifier for TransitRule {
    fn name(&self) -> &'static str {
        "transit"
    }

    fn modify(&self, staged: &Staged, ctx: &ModifierContext<'_>) -> Option<Staged> {
        let layovers = ctx.timeline.layovers();
        if layovers.is_empty() {
            return None;
        }
        let mut next = staged.clone();
        for layover in layovers {
            match layover.kind {
                LayoverKind::Short => {
                    next.recommendations.push(
                        "Hydration",
                        RecommendationItem::new(
                            "Collapsible Water Bottle",
                            "Fill it after security so tight connections never leave you thirsty.",
                            true,
                        ),
                    );
                }
                LayoverKind::Long => {
                    next.recommendations.push(
                        "Comfort",
                        RecommendationItem::new(
                            "Compact Travel Pillow",
                            "Makes a terminal nap possible on a long connection.",
                            true,
                        ),
                    );
                    next.recommendations.push(
                        "Comfort",
                        RecommendationItem::new(
                            "Airport Lounge Day Pass",
                            "A quiet place to rest or shower between flights.",
                            false,
                        ),
                    );
                }
            }
        }
        Some(next)
    }
}
