//! `jl-schedule`: phase-shift classification, base schedule layout, the
//! bio-profile modifier rules, and gear aggregation.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                   |
//! |--------------------|------------------------------------------------------------|
//! | [`timing`]         | `Timeline::resolve`, `TimedSegment`, `Layover`             |
//! | [`transit`]        | `LayoverKind` (short / long)                               |
//! | [`classifier`]     | `PhaseShift`, `classify`, `classify_with`                  |
//! | [`adaptation`]     | `AdaptationCurve` (per-day advance / delay offsets)        |
//! | [`event`]          | `EventType`, `Phase`, `EventTag`, `ScheduleEvent`, `Schedule` |
//! | [`notes`]          | default science note per event type                        |
//! | [`builder`]        | `build`, `build_itinerary`                                 |
//! | [`modifier`]       | `ScheduleModifier` trait, `ChainedModifier`, `Pipeline`    |
//! | [`rules`]          | the seven rules, age → chronotype → … → transit            |
//! | [`recommendation`] | `RecommendationItem`, `RecommendationSet`, `aggregate`     |
//! | [`loader`]         | `load_itinerary_csv`, `load_itinerary_reader`              |
//! | [`error`]          | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Flow (summary)
//!
//! ```text
//! Itinerary ──resolve──▶ Timeline ──classify──▶ PhaseShift
//!                           │                       │
//!                           └───────build───────────┘
//!                                     │
//!                              base Schedule ──Pipeline──▶ Schedule + recommendations
//! ```
//!
//! Every stage returns a new value; nothing is edited in place.

pub mod adaptation;
pub mod builder;
pub mod classifier;
pub mod error;
pub mod event;
pub mod loader;
pub mod modifier;
pub mod notes;
pub mod recommendation;
pub mod rules;
pub mod timing;
pub mod transit;


pub use adaptation::AdaptationCurve;
pub use builder::{build, build_itinerary};
pub use classifier::{PhaseShift, classify, classify_with};
pub use error::{ScheduleError, ScheduleResult, TimingField};
pub use event::{Adaptation, EventTag, EventType, Phase, Schedule, ScheduleEvent};
pub use loader::{load_itinerary_csv, load_itinerary_reader};
pub use modifier::{
    ChainedModifier, ModifierContext, Pipeline, ScheduleModifier, ScheduleModifierExt, Staged, apply,
};
pub use recommendation::{Recommendation, RecommendationItem, RecommendationSet, aggregate};
pub use timing::{Layover, TimedSegment, Timeline};
pub use transit::LayoverKind;
