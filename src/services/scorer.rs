//! Composite location score
//!
//! Non-shelter locations score on distance alone. Shelters go through the
//! eligibility gate first (ineligible scores exactly 0.0) and then blend
//! distance and occupancy weights. An `UndefinedCapacity` from the occupancy
//! window is returned to the caller unchanged.

use crate::domain::error::ScoreError;
use crate::domain::location::{Location, LocationKind};
use crate::domain::types::{DayIndex, User};
use crate::services::distance::{distance_km, DistanceWeighting};
use crate::services::eligibility::{self, Eligibility};
use crate::services::occupancy::OccupancyEstimator;
use serde::Serialize;
use tracing::trace;

/// Tunable constants of the score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Share of the distance weight in a shelter's score
    pub distance_share: f64,
    /// Share of the occupancy weight in a shelter's score
    pub occupancy_share: f64,
    /// Distance (km) at which the distance weight is 0.5
    pub half_weight_km: f64,
    /// Days on each side of the target day averaged for occupancy
    pub window_radius_days: u16,
    pub older_year_share: f64,
    pub recent_year_share: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            distance_share: 0.8,
            occupancy_share: 0.2,
            half_weight_km: 5.0,
            window_radius_days: 3,
            older_year_share: 0.3,
            recent_year_share: 0.7,
        }
    }
}

/// How a score was obtained
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub distance_km: f64,
    pub distance_weight: f64,
    /// Only set for eligible shelters
    pub occupancy_weight: Option<f64>,
    /// None for locations that are not shelters
    #[serde(skip)]
    pub eligibility: Option<Eligibility>,
    pub score: f64,
}

impl ScoreBreakdown {
    #[inline]
    pub fn is_ineligible(&self) -> bool {
        matches!(self.eligibility, Some(e) if !e.is_eligible())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    distance: DistanceWeighting,
    occupancy: OccupancyEstimator,
    distance_share: f64,
    occupancy_share: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringParams::default())
    }
}

impl Scorer {
    pub fn new(params: ScoringParams) -> Self {
        Self {
            distance: DistanceWeighting::new(params.half_weight_km),
            occupancy: OccupancyEstimator::new(
                params.window_radius_days,
                params.older_year_share,
                params.recent_year_share,
            ),
            distance_share: params.distance_share,
            occupancy_share: params.occupancy_share,
        }
    }

    pub fn distance_weighting(&self) -> &DistanceWeighting {
        &self.distance
    }

    pub fn occupancy_estimator(&self) -> &OccupancyEstimator {
        &self.occupancy
    }

    /// Final score of `location` for `user` on `day`
    pub fn score(&self, location: &Location, user: &User, day: DayIndex) -> Result<f64, ScoreError> {
        self.explain(location, user, day).map(|breakdown| breakdown.score)
    }

    /// Score together with the intermediate weights
    pub fn explain(
        &self,
        location: &Location,
        user: &User,
        day: DayIndex,
    ) -> Result<ScoreBreakdown, ScoreError> {
        let distance_km = distance_km(user.coordinates, location.coordinates);
        let distance_weight = self.distance.weight_for_km(distance_km);

        let shelter = match &location.kind {
            LocationKind::Other { .. } => {
                return Ok(ScoreBreakdown {
                    distance_km,
                    distance_weight,
                    occupancy_weight: None,
                    eligibility: None,
                    score: distance_weight,
                });
            }
            LocationKind::Shelter(shelter) => shelter,
        };

        let eligibility = eligibility::check(shelter, user, day);
        if !eligibility.is_eligible() {
            trace!(
                location = %location.name,
                day = %day,
                reason = %eligibility.as_str(),
                "shelter_ineligible"
            );
            return Ok(ScoreBreakdown {
                distance_km,
                distance_weight,
                occupancy_weight: None,
                eligibility: Some(eligibility),
                score: 0.0,
            });
        }

        let occupancy_weight = self.occupancy.occupancy_weight(&shelter.history, day)?;
        let score = self.distance_share * distance_weight + self.occupancy_share * occupancy_weight;

        Ok(ScoreBreakdown {
            distance_km,
            distance_weight,
            occupancy_weight: Some(occupancy_weight),
            eligibility: Some(eligibility),
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::{DayRecord, OccupancyHistory, Shelter, YearSeries};
    use crate::domain::types::{Coordinates, ShelterSector, UserRestriction};
    use approx::assert_relative_eq;

    const LAT: f64 = 43.6465;
    const LON: f64 = -79.3963;

    fn day(n: i64) -> DayIndex {
        DayIndex::new(n).unwrap()
    }

    fn shelter_at(sector: ShelterSector, older: YearSeries, recent: YearSeries) -> Location {
        Location::new(
            "Seaton House",
            "339 George St",
            Coordinates::new(LAT, LON),
            LocationKind::Shelter(Shelter::new(sector, OccupancyHistory::new(older, recent))),
        )
    }

    fn other_at(latitude: f64, longitude: f64) -> Location {
        Location::new(
            "Library",
            "789 Yonge St",
            Coordinates::new(latitude, longitude),
            LocationKind::Other { category: "cooling_centre".to_string() },
        )
    }

    #[test]
    fn test_other_location_scores_distance_only() {
        let scorer = Scorer::default();
        let location = other_at(LAT + 0.02, LON - 0.03);

        let restrictions =
            [UserRestriction::MaleOnly, UserRestriction::FemaleOnly, UserRestriction::Any];
        for restriction in restrictions {
            let user = User::new(restriction, LAT, LON);
            for d in [0, 180, 364] {
                let score = scorer.score(&location, &user, day(d)).unwrap();
                assert_eq!(score, scorer.distance_weighting().weight(&location, &user));
            }
        }
    }

    #[test]
    fn test_eligible_shelter_blends_weights() {
        let recent = YearSeries::empty(2018).with_day(day(100), DayRecord::from_raw(100, 40));
        let location = shelter_at(ShelterSector::Men, YearSeries::empty(2017), recent);
        let user = User::new(UserRestriction::MaleOnly, LAT, LON);

        let breakdown = Scorer::default().explain(&location, &user, day(100)).unwrap();
        assert_eq!(breakdown.distance_weight, 1.0);
        assert_relative_eq!(breakdown.occupancy_weight.unwrap(), 0.6, epsilon = 1e-12);
        assert_relative_eq!(breakdown.score, 0.92, epsilon = 1e-12);
        assert!(!breakdown.is_ineligible());
    }

    #[test]
    fn test_restriction_mismatch_scores_exactly_zero() {
        let recent = YearSeries::empty(2018).with_day(day(100), DayRecord::from_raw(100, 40));
        let location = shelter_at(ShelterSector::Women, YearSeries::empty(2017), recent);
        let user = User::new(UserRestriction::MaleOnly, LAT, LON);

        let breakdown = Scorer::default().explain(&location, &user, day(100)).unwrap();
        assert_eq!(breakdown.score, 0.0);
        assert_eq!(breakdown.eligibility, Some(Eligibility::RestrictionMismatch));
        assert!(breakdown.is_ineligible());
    }

    #[test]
    fn test_missing_capacity_on_target_day_scores_exactly_zero() {
        let older = YearSeries::empty(2017).with_day(day(99), DayRecord::from_raw(0, 10));
        let recent = YearSeries::empty(2018).with_day(day(101), DayRecord::from_raw(50, 10));
        let location = shelter_at(ShelterSector::CoEd, older, recent);
        let user = User::new(UserRestriction::Any, LAT, LON);

        assert_eq!(Scorer::default().score(&location, &user, day(100)), Ok(0.0));
    }

    #[test]
    fn test_ineligible_shelter_with_empty_history_is_zero_not_error() {
        let location =
            shelter_at(ShelterSector::Youth, YearSeries::empty(2017), YearSeries::empty(2018));
        let user = User::new(UserRestriction::Any, LAT, LON);

        assert_eq!(Scorer::default().score(&location, &user, day(10)), Ok(0.0));
    }

    #[test]
    fn test_custom_shares() {
        let recent = YearSeries::empty(2018).with_day(day(50), DayRecord::from_raw(10, 5));
        let location = shelter_at(ShelterSector::Families, YearSeries::empty(2017), recent);
        let user = User::new(UserRestriction::FemaleOnly, LAT, LON);
        let scorer = Scorer::new(ScoringParams {
            distance_share: 0.5,
            occupancy_share: 0.5,
            ..ScoringParams::default()
        });

        // 0.5 * 1.0 + 0.5 * (1 - 5/10)
        assert_relative_eq!(scorer.score(&location, &user, day(50)).unwrap(), 0.75, epsilon = 1e-12);
    }
}
