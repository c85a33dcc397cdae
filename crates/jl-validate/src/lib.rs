//! `jl-validate`: itinerary continuity validator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                   |
//! |---------------|--------------------------------------------|
//! | [`warning`]   | `Warning` (`TimeContinuity`, `LocationMismatch`) |
//! | [`validator`] | `validate`                                 |
//!
//! # Design notes
//!
//! Validation is advisory.  It never fails and never rejects input: every
//! finding is returned as data and the caller decides whether to block.
//! Fields that do not parse (timestamps, airport codes) are skipped for the
//! check that needs them rather than reported, so free-text input never
//! produces a false positive.

pub mod validator;
pub mod warning;


pub use validator::validate;
pub use warning::Warning;
