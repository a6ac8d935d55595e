//! Shelter eligibility gate
//!
//! Wraps the two checks on `Shelter` and keeps the reason a shelter was
//! turned away, so the ranking pass can log and count it.

use crate::domain::location::Shelter;
use crate::domain::types::{DayIndex, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// Sector does not serve the user's restriction
    RestrictionMismatch,
    /// Neither tracked year has capacity on the target day
    NoCapacityData,
}

impl Eligibility {
    #[inline]
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Eligibility::Eligible => "eligible",
            Eligibility::RestrictionMismatch => "restriction_mismatch",
            Eligibility::NoCapacityData => "no_capacity_data",
        }
    }
}

/// Run the gate. The restriction check wins when both fail.
pub fn check(shelter: &Shelter, user: &User, day: DayIndex) -> Eligibility {
    if !shelter.is_valid_type(user) {
        Eligibility::RestrictionMismatch
    } else if !shelter.is_valid_capacity(day) {
        Eligibility::NoCapacityData
    } else {
        Eligibility::Eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::{DayRecord, OccupancyHistory, YearSeries};
    use crate::domain::types::{ShelterSector, UserRestriction};

    fn shelter(sector: ShelterSector) -> Shelter {
        let day = DayIndex::new(200).unwrap();
        let recent = YearSeries::empty(2018).with_day(day, DayRecord::from_raw(30, 12));
        Shelter::new(sector, OccupancyHistory::new(YearSeries::empty(2017), recent))
    }

    #[test]
    fn test_eligible() {
        let user = User::new(UserRestriction::MaleOnly, 43.6, -79.4);
        let result = check(&shelter(ShelterSector::Men), &user, DayIndex::new(200).unwrap());
        assert_eq!(result, Eligibility::Eligible);
        assert!(result.is_eligible());
    }

    #[test]
    fn test_restriction_mismatch() {
        let user = User::new(UserRestriction::FemaleOnly, 43.6, -79.4);
        let result = check(&shelter(ShelterSector::Men), &user, DayIndex::new(200).unwrap());
        assert_eq!(result, Eligibility::RestrictionMismatch);
        assert_eq!(result.as_str(), "restriction_mismatch");
    }

    #[test]
    fn test_no_capacity_data() {
        let user = User::new(UserRestriction::Any, 43.6, -79.4);
        let result = check(&shelter(ShelterSector::CoEd), &user, DayIndex::new(201).unwrap());
        assert_eq!(result, Eligibility::NoCapacityData);
        assert!(!result.is_eligible());
    }

    #[test]
    fn test_restriction_reported_before_capacity() {
        let user = User::new(UserRestriction::MaleOnly, 43.6, -79.4);
        let result = check(&shelter(ShelterSector::Women), &user, DayIndex::new(5).unwrap());
        assert_eq!(result, Eligibility::RestrictionMismatch);
    }
}
