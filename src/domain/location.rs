//! Location records and the shelter occupancy history
//!
//! A shelter carries two yearly series (an older and a more recent year).
//! Each day of a series is either `Missing` or a recorded capacity and
//! occupancy; a recorded capacity is never zero. `OccupancyHistory::day`
//! folds both years into a `DayHistory` telling which years apply.

use crate::domain::types::{Coordinates, DayIndex, ShelterSector, User, DAYS_PER_SERIES};
use serde::Serialize;
use std::num::NonZeroU32;

/// One day of one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DayRecord {
    #[default]
    Missing,
    Recorded { capacity: NonZeroU32, occupancy: u32 },
}

impl DayRecord {
    /// Build a record from raw published numbers.
    ///
    /// Source data encodes "no data for this day" as a capacity of 0.
    pub fn from_raw(capacity: u32, occupancy: u32) -> Self {
        match NonZeroU32::new(capacity) {
            Some(capacity) => DayRecord::Recorded { capacity, occupancy },
            None => DayRecord::Missing,
        }
    }

    #[inline]
    pub fn capacity(&self) -> Option<NonZeroU32> {
        match self {
            DayRecord::Recorded { capacity, .. } => Some(*capacity),
            DayRecord::Missing => None,
        }
    }

    #[inline]
    pub fn occupancy(&self) -> Option<u32> {
        match self {
            DayRecord::Recorded { occupancy, .. } => Some(*occupancy),
            DayRecord::Missing => None,
        }
    }
}

/// A full year of daily records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSeries {
    year: i32,
    days: Vec<DayRecord>,
}

impl YearSeries {
    /// A year with no recorded days
    pub fn empty(year: i32) -> Self {
        Self { year, days: vec![DayRecord::Missing; DAYS_PER_SERIES] }
    }

    /// Set one day, returning the series for chaining
    pub fn with_day(mut self, day: DayIndex, record: DayRecord) -> Self {
        self.set(day, record);
        self
    }

    pub fn set(&mut self, day: DayIndex, record: DayRecord) {
        self.days[day.as_usize()] = record;
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub fn get(&self, day: DayIndex) -> DayRecord {
        self.days[day.as_usize()]
    }

    /// Number of days carrying a recorded capacity
    pub fn recorded_days(&self) -> usize {
        self.days.iter().filter(|d| matches!(d, DayRecord::Recorded { .. })).count()
    }
}

/// A recorded day, stripped of the `Missing` case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    pub capacity: NonZeroU32,
    pub occupancy: u32,
}

/// Which tracked years have data for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayHistory {
    Both { older: Recorded, recent: Recorded },
    OlderOnly(Recorded),
    RecentOnly(Recorded),
    Undefined,
}

impl DayHistory {
    #[inline]
    pub fn is_defined(&self) -> bool {
        !matches!(self, DayHistory::Undefined)
    }

    /// Capacity for the day, preferring the more recent year
    pub fn capacity(&self) -> Option<NonZeroU32> {
        match self {
            DayHistory::Both { recent, .. } | DayHistory::RecentOnly(recent) => {
                Some(recent.capacity)
            }
            DayHistory::OlderOnly(older) => Some(older.capacity),
            DayHistory::Undefined => None,
        }
    }
}

/// Two tracked years of daily capacity and occupancy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyHistory {
    older: YearSeries,
    recent: YearSeries,
}

impl OccupancyHistory {
    pub fn new(older: YearSeries, recent: YearSeries) -> Self {
        Self { older, recent }
    }

    pub fn older(&self) -> &YearSeries {
        &self.older
    }

    pub fn recent(&self) -> &YearSeries {
        &self.recent
    }

    pub fn day(&self, day: DayIndex) -> DayHistory {
        let as_recorded = |record: DayRecord| match record {
            DayRecord::Recorded { capacity, occupancy } => Some(Recorded { capacity, occupancy }),
            DayRecord::Missing => None,
        };

        match (as_recorded(self.older.get(day)), as_recorded(self.recent.get(day))) {
            (Some(older), Some(recent)) => DayHistory::Both { older, recent },
            (Some(older), None) => DayHistory::OlderOnly(older),
            (None, Some(recent)) => DayHistory::RecentOnly(recent),
            (None, None) => DayHistory::Undefined,
        }
    }
}

/// Shelter-specific data attached to a location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shelter {
    pub sector: ShelterSector,
    pub history: OccupancyHistory,
}

impl Shelter {
    pub fn new(sector: ShelterSector, history: OccupancyHistory) -> Self {
        Self { sector, history }
    }

    /// Sex-restriction compatibility with the user
    #[inline]
    pub fn is_valid_type(&self, user: &User) -> bool {
        self.sector.accepts(user.restriction)
    }

    /// At least one tracked year has capacity on exactly this day
    #[inline]
    pub fn is_valid_capacity(&self, day: DayIndex) -> bool {
        self.history.day(day).is_defined()
    }

    #[inline]
    pub fn is_eligible(&self, user: &User, day: DayIndex) -> bool {
        self.is_valid_type(user) && self.is_valid_capacity(day)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationKind {
    Shelter(Shelter),
    /// Cooling centres, drop-ins and other points without occupancy data
    Other { category: String },
}

/// A candidate point of interest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub kind: LocationKind,
    score: Option<f64>,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        coordinates: Coordinates,
        kind: LocationKind,
    ) -> Self {
        Self { name: name.into(), address: address.into(), coordinates, kind, score: None }
    }

    pub fn shelter(&self) -> Option<&Shelter> {
        match &self.kind {
            LocationKind::Shelter(shelter) => Some(shelter),
            LocationKind::Other { .. } => None,
        }
    }

    #[inline]
    pub fn is_shelter(&self) -> bool {
        self.shelter().is_some()
    }

    /// Score from the latest scoring pass, if it succeeded
    #[inline]
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Store the result of a scoring pass, replacing any previous one
    pub fn record_score(&mut self, score: Option<f64>) {
        self.score = score;
    }
}
