//! Services - scoring core and the ranking pass
//!
//! - `distance` - flat-earth distance and its weight
//! - `occupancy` - windowed two-year occupancy estimate and weight
//! - `eligibility` - shelter gate with the rejection reason
//! - `scorer` - composite score
//! - `ranking` - parallel scoring pass, kind filter and ordering

pub mod distance;
pub mod eligibility;
pub mod occupancy;
pub mod ranking;
pub mod scorer;

pub use eligibility::Eligibility;
pub use ranking::{ranked, score_all, KindFilter, RankedEntry, RankingOptions, ScoringPass};
pub use scorer::{ScoreBreakdown, Scorer, ScoringParams};
