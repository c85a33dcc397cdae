//! `jl-core`: foundational types for the jet-lag planning engine.
//!
//! This crate is a dependency of every other `jl-*` crate.  It has no `jl-*`
//! dependencies and only a few external ones (`chrono`, `regex`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `SegmentId`, `TicketId`                                    |
//! | [`time`]        | `Minutes`, local-clock parsing, `ClockPair`, `Direction`   |
//! | [`itinerary`]   | `FlightSegment`, `Itinerary`, airport-code extraction      |
//! | [`profile`]     | `BioProfile` and its six closed enumerations               |
//! | [`config`]      | `PlannerConfig`                                            |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types, using  |
//! |         | the camelCase field names of the planning wizard's JSON.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod itinerary;
pub mod profile;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::PlannerConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{SegmentId, TicketId};
pub use itinerary::{FlightSegment, Itinerary, airport_code};
pub use profile::{
    AgeGroup, AlcoholPreference, BioProfile, CaffeinePreference, Chronotype, LightSensitivity,
    MelatoninPreference,
};
pub use time::{ClockPair, Direction, Minutes};
