//! Scoring pass and ranking
//!
//! `score_all` scores every location for one user and day in parallel and
//! writes each location's score slot once. Locations whose occupancy window
//! has no data keep an empty score and are reported as failures; they are
//! never ranked with a substitute score.

use crate::domain::error::{ScoreError, UnknownValue};
use crate::domain::location::Location;
use crate::domain::types::{DayIndex, User};
use crate::services::scorer::{ScoreBreakdown, Scorer};
use rayon::prelude::*;
use serde::Deserialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Which kinds of location to rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    Shelters,
    Other,
    #[default]
    All,
}

impl std::str::FromStr for KindFilter {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shelters" | "shelter" => Ok(KindFilter::Shelters),
            "other" | "cooling" => Ok(KindFilter::Other),
            "all" => Ok(KindFilter::All),
            _ => Err(UnknownValue::new("location kind", s)),
        }
    }
}

impl KindFilter {
    #[inline]
    pub fn matches(&self, location: &Location) -> bool {
        match self {
            KindFilter::Shelters => location.is_shelter(),
            KindFilter::Other => !location.is_shelter(),
            KindFilter::All => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KindFilter::Shelters => "shelters",
            KindFilter::Other => "other",
            KindFilter::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOptions {
    pub kind: KindFilter,
    /// Maximum entries returned (0 = no limit)
    pub limit: usize,
    /// Keep shelters the eligibility gate rejected (they score 0.0)
    pub include_ineligible: bool,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self { kind: KindFilter::All, limit: 10, include_ineligible: false }
    }
}

/// Outcome of one scoring pass, index-aligned with the scored slice
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPass {
    day: DayIndex,
    outcomes: Vec<Result<ScoreBreakdown, ScoreError>>,
}

impl ScoringPass {
    #[inline]
    pub fn day(&self) -> DayIndex {
        self.day
    }

    pub fn outcomes(&self) -> &[Result<ScoreBreakdown, ScoreError>] {
        &self.outcomes
    }

    pub fn scored_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn ineligible_count(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, Ok(b) if b.is_ineligible())).count()
    }

    /// (index into the scored slice, error) for every failed location
    pub fn failures(&self) -> impl Iterator<Item = (usize, ScoreError)> + '_ {
        self.outcomes.iter().enumerate().filter_map(|(i, o)| o.as_ref().err().map(|e| (i, *e)))
    }
}

/// Score every location and store the result on it
pub fn score_all(
    scorer: &Scorer,
    locations: &mut [Location],
    user: &User,
    day: DayIndex,
) -> ScoringPass {
    let outcomes: Vec<_> = locations
        .par_iter_mut()
        .map(|location| {
            let outcome = scorer.explain(location, user, day);
            location.record_score(outcome.as_ref().ok().map(|b| b.score));
            if let Err(e) = &outcome {
                warn!(location = %location.name, day = %day, error = %e, "location_score_failed");
            }
            outcome
        })
        .collect();

    let pass = ScoringPass { day, outcomes };
    debug!(
        day = %day,
        locations = %locations.len(),
        scored = %pass.scored_count(),
        ineligible = %pass.ineligible_count(),
        failed = %pass.failures().count(),
        "scoring_pass_complete"
    );
    pass
}

/// One row of a ranking
#[derive(Debug, Clone, Copy)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub location: &'a Location,
    pub breakdown: &'a ScoreBreakdown,
}

impl RankedEntry<'_> {
    #[inline]
    pub fn score(&self) -> f64 {
        self.breakdown.score
    }
}

/// Highest score first; ties broken by name so output is stable
pub fn ranked<'a>(
    locations: &'a [Location],
    pass: &'a ScoringPass,
    options: &RankingOptions,
) -> Vec<RankedEntry<'a>> {
    let mut entries: Vec<(&Location, &ScoreBreakdown)> = locations
        .iter()
        .zip(pass.outcomes.iter())
        .filter_map(|(location, outcome)| outcome.as_ref().ok().map(|b| (location, b)))
        .filter(|(location, _)| options.kind.matches(location))
        .filter(|(_, breakdown)| options.include_ineligible || !breakdown.is_ineligible())
        .collect();

    entries.sort_by(|(la, a), (lb, b)| match b.score.total_cmp(&a.score) {
        Ordering::Equal => la.name.cmp(&lb.name),
        other => other,
    });

    if options.limit > 0 {
        entries.truncate(options.limit);
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (location, breakdown))| RankedEntry { rank: i + 1, location, breakdown })
        .collect()
}
