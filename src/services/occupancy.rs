//! Occupancy estimation from the two-year history
//!
//! The estimate averages a window of days centred on the target day. Days
//! where both years are recorded are blended (the recent year weighted
//! higher); days with a single recorded year use that year alone; days with
//! no data are skipped. Window days outside the year are dropped, not
//! wrapped.

use crate::domain::error::ScoreError;
use crate::domain::location::{DayHistory, OccupancyHistory};
use crate::domain::types::DayIndex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccupancyEstimator {
    /// Days on each side of the target day (3 gives a 7-day window)
    window_radius_days: u16,
    older_year_share: f64,
    recent_year_share: f64,
}

impl Default for OccupancyEstimator {
    fn default() -> Self {
        Self { window_radius_days: 3, older_year_share: 0.3, recent_year_share: 0.7 }
    }
}

impl OccupancyEstimator {
    pub fn new(window_radius_days: u16, older_year_share: f64, recent_year_share: f64) -> Self {
        Self { window_radius_days, older_year_share, recent_year_share }
    }

    #[inline]
    pub fn window_radius_days(&self) -> u16 {
        self.window_radius_days
    }

    /// Contribution of one day, or None when neither year has data
    fn day_occupancy(&self, day: DayHistory) -> Option<f64> {
        match day {
            DayHistory::Both { older, recent } => Some(
                self.older_year_share * f64::from(older.occupancy)
                    + self.recent_year_share * f64::from(recent.occupancy),
            ),
            DayHistory::OlderOnly(only) | DayHistory::RecentOnly(only) => {
                Some(f64::from(only.occupancy))
            }
            DayHistory::Undefined => None,
        }
    }

    /// Smoothed occupancy around `day`, truncated to a whole number of beds
    pub fn average_occupancy(
        &self,
        history: &OccupancyHistory,
        day: DayIndex,
    ) -> Result<u32, ScoreError> {
        let mut sum = 0.0;
        let mut counted: u64 = 0;

        for candidate in day.window(self.window_radius_days) {
            if let Some(occupancy) = self.day_occupancy(history.day(candidate)) {
                sum += occupancy;
                counted += 1;
            }
        }

        if counted == 0 {
            return Err(ScoreError::UndefinedCapacity { day: day.value() });
        }

        Ok(((sum.trunc() as u64) / counted) as u32)
    }

    /// `1 - average / capacity` at `day`.
    ///
    /// Not clamped: an average above capacity gives a negative weight.
    pub fn occupancy_weight(
        &self,
        history: &OccupancyHistory,
        day: DayIndex,
    ) -> Result<f64, ScoreError> {
        let average = self.average_occupancy(history, day)?;
        let capacity = history
            .day(day)
            .capacity()
            .ok_or(ScoreError::UndefinedCapacity { day: day.value() })?;

        Ok(1.0 - f64::from(average) / f64::from(capacity.get()))
    }
}
