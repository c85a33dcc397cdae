//! Default science notes, one or two plain sentences per event type.
//!
//! A narrative source outside the engine may replace these; rules only ever
//! append to them.

use crate::EventType;

pub fn template(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Sleep => {
            "Sleeping during the destination's night tells your master clock which hours are night. \
             Darkness lets melatonin rise on schedule."
        }
        EventType::Light => {
            "Bright light is the strongest signal your body clock responds to. \
             Timed exposure pulls your rhythm toward the new time zone."
        }
        EventType::Dark => {
            "Light at the wrong time pushes your clock the wrong way. \
             Dimming it lets melatonin build when the destination expects night."
        }
        EventType::Food => {
            "Meal timing resets the clocks in your gut and liver. \
             Eating on local time helps them catch up with your brain."
        }
        EventType::Caffeine => {
            "Caffeine blocks the sleep pressure signal adenosine for several hours. \
             Timed well it bridges a slump without wrecking the next sleep."
        }
        EventType::Activity => {
            "Movement and social cues are secondary time signals. \
             They reinforce what light and meals are telling your body."
        }
        EventType::Flight => {
            "Switching to destination time at boarding starts the adjustment early. \
             Cabin air is dry, so steady hydration matters."
        }
        EventType::Transit => {
            "A connection is a chance to move, hydrate, and catch real light. \
             Keeping it calm stops stress hormones from fighting your sleep plan."
        }
    }
}
