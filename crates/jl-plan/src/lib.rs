//! `jl-plan`: one call from itinerary and profile to a finished plan.
//!
//! # Pipeline
//!
//! ```text
//! plan(itinerary, profile):
//!   ① Validate : continuity warnings (advisory, never fatal).
//!   ② Resolve  : put every segment on the home clock; infer the shift.
//!   ③ Build    : base schedule for PRE / FLIGHT / POST (layovers inside FLIGHT).
//!   ④ Modify   : age → chronotype → caffeine → alcohol → melatonin
//!                 → light → transit.
//!   ⑤ Assemble : render two-clock time labels, group recommendations.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | `Planner::plan_batch` runs on Rayon's thread pool.      |
//! | `serde`    | Serde derives on `Plan` and everything it embeds.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use jl_core::{BioProfile, Itinerary};
//! use jl_plan::PlannerBuilder;
//!
//! let planner = PlannerBuilder::new().build()?;
//! let outcome = planner.plan(&itinerary, &BioProfile::default())?;
//! for event in &outcome.plan.schedule {
//!     println!("{}  {}", event.time, event.title);
//! }
//! ```

pub mod error;
pub mod observer;
pub mod plan;
pub mod planner;
pub mod session;

#[cfg(test)]
mod tests;

pub use error::{PlanError, PlanResult};
pub use observer::{NoopObserver, PlanObserver, TracingObserver};
pub use plan::{Plan, PlanEvent, PlanOutcome, ScienceLink};
pub use planner::{Planner, PlannerBuilder};
pub use session::SessionGate;
