//! Shared value types for the scoring core

use crate::domain::error::{ScoreError, UnknownValue};
use serde::{Deserialize, Serialize};

/// Number of days held by every yearly series (day indices 0..=364)
pub const DAYS_PER_SERIES: usize = 365;

/// Highest valid day index
pub const LAST_DAY: u16 = (DAYS_PER_SERIES - 1) as u16;

/// Zero-based day of year used to index the daily series
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(transparent)]
pub struct DayIndex(u16);

impl DayIndex {
    /// Validate a raw index
    pub fn new(day: i64) -> Result<Self, ScoreError> {
        if (0..=i64::from(LAST_DAY)).contains(&day) {
            Ok(Self(day as u16))
        } else {
            Err(ScoreError::DayOutOfRange { day })
        }
    }

    /// Clamp to the last day of the series (leap-year Dec 31 lands on 364)
    #[inline]
    pub fn saturating(day: u32) -> Self {
        Self(day.min(u32::from(LAST_DAY)) as u16)
    }

    #[inline]
    pub fn value(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Days `self - radius ..= self + radius` that fall inside the series.
    ///
    /// Out-of-range neighbours are dropped, never wrapped to the other end of
    /// the year, so the window near day 0 or day 364 is shorter.
    pub fn window(self, radius: u16) -> impl Iterator<Item = DayIndex> {
        let center = i64::from(self.0);
        let radius = i64::from(radius);
        ((center - radius)..=(center + radius)).filter_map(|day| DayIndex::new(day).ok())
    }
}

impl std::fmt::Display for DayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Which sex-restricted shelters a user may be referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserRestriction {
    MaleOnly,
    FemaleOnly,
    Any,
}

impl std::str::FromStr for UserRestriction {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "male-only" | "male" | "men" => Ok(UserRestriction::MaleOnly),
            "female-only" | "female" | "women" => Ok(UserRestriction::FemaleOnly),
            "any" | "none" => Ok(UserRestriction::Any),
            _ => Err(UnknownValue::new("user restriction", s)),
        }
    }
}

impl UserRestriction {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRestriction::MaleOnly => "male-only",
            UserRestriction::FemaleOnly => "female-only",
            UserRestriction::Any => "any",
        }
    }
}

/// Shelter sector as published by the shelter operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelterSector {
    Men,
    Women,
    CoEd,
    Families,
    Youth,
}

impl std::str::FromStr for ShelterSector {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "men" => Ok(ShelterSector::Men),
            "women" => Ok(ShelterSector::Women),
            "coed" | "co-ed" => Ok(ShelterSector::CoEd),
            "families" => Ok(ShelterSector::Families),
            "youth" => Ok(ShelterSector::Youth),
            _ => Err(UnknownValue::new("shelter sector", s)),
        }
    }
}

impl ShelterSector {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShelterSector::Men => "men",
            ShelterSector::Women => "women",
            ShelterSector::CoEd => "coed",
            ShelterSector::Families => "families",
            ShelterSector::Youth => "youth",
        }
    }

    /// Sex-restriction compatibility between this sector and a user.
    ///
    /// Only the single-sex sectors turn anyone away; a user without a stated
    /// restriction is accepted everywhere.
    pub fn accepts(&self, restriction: UserRestriction) -> bool {
        match (self, restriction) {
            (ShelterSector::Men, UserRestriction::FemaleOnly) => false,
            (ShelterSector::Women, UserRestriction::MaleOnly) => false,
            _ => true,
        }
    }
}

/// The person a ranking is computed for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct User {
    pub restriction: UserRestriction,
    pub coordinates: Coordinates,
}

impl User {
    #[inline]
    pub fn new(restriction: UserRestriction, latitude: f64, longitude: f64) -> Self {
        Self { restriction, coordinates: Coordinates::new(latitude, longitude) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_index_bounds() {
        assert_eq!(DayIndex::new(0).unwrap().value(), 0);
        assert_eq!(DayIndex::new(364).unwrap().value(), 364);
        assert_eq!(DayIndex::new(365), Err(ScoreError::DayOutOfRange { day: 365 }));
        assert_eq!(DayIndex::new(-1), Err(ScoreError::DayOutOfRange { day: -1 }));
        assert_eq!(DayIndex::saturating(365).value(), 364);
        assert_eq!(DayIndex::saturating(42).value(), 42);
    }

    #[test]
    fn test_window_interior_has_seven_days() {
        let days: Vec<u16> = DayIndex::new(100).unwrap().window(3).map(DayIndex::value).collect();
        assert_eq!(days, vec![97, 98, 99, 100, 101, 102, 103]);
    }

    #[test]
    fn test_window_skips_days_before_start_of_year() {
        let days: Vec<u16> = DayIndex::new(0).unwrap().window(3).map(DayIndex::value).collect();
        assert_eq!(days, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_window_skips_days_after_end_of_year() {
        let days: Vec<u16> = DayIndex::new(363).unwrap().window(3).map(DayIndex::value).collect();
        assert_eq!(days, vec![360, 361, 362, 363, 364]);
    }

    #[test]
    fn test_user_restriction_from_str() {
        assert_eq!("male-only".parse::<UserRestriction>().unwrap(), UserRestriction::MaleOnly);
        assert_eq!("FEMALE_ONLY".parse::<UserRestriction>().unwrap(), UserRestriction::FemaleOnly);
        assert_eq!("none".parse::<UserRestriction>().unwrap(), UserRestriction::Any);
        assert!("martian".parse::<UserRestriction>().is_err());
    }

    #[test]
    fn test_sector_compatibility_table() {
        use ShelterSector::*;
        use UserRestriction::*;

        assert!(Men.accepts(MaleOnly));
        assert!(!Men.accepts(FemaleOnly));
        assert!(Men.accepts(Any));

        assert!(!Women.accepts(MaleOnly));
        assert!(Women.accepts(FemaleOnly));
        assert!(Women.accepts(Any));

        for sector in [CoEd, Families, Youth] {
            for restriction in [MaleOnly, FemaleOnly, Any] {
                assert!(sector.accepts(restriction), "{:?} / {:?}", sector, restriction);
            }
        }
    }
}
