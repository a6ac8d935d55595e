//! Shelter finder library
//!
//! Ranks emergency shelters and cooling centres for a user by blending
//! distance and historical occupancy pressure.
//!
//! - `domain/` - Location, shelter history, user and error types
//! - `services/` - Scoring core (distance, occupancy, eligibility, scorer) and ranking
//! - `infra/` - Configuration and calendar
//! - `io/` - Dataset loading and report rendering

pub mod domain;
pub mod infra;
pub mod io;
pub mod services;
