//! Scoring errors

use thiserror::Error;

/// Failures raised by the scoring core.
///
/// `UndefinedCapacity` is a per-location failure: the caller decides how to
/// present it, the core never substitutes a fallback score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// No tracked year has capacity data for the days the estimator needed.
    #[error("capacity undefined around day {day}")]
    UndefinedCapacity { day: u16 },

    #[error("day index {day} is outside 0..=364")]
    DayOutOfRange { day: i64 },
}

/// A textual enum value that matched none of the known spellings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} '{value}'")]
pub struct UnknownValue {
    pub field: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub(crate) fn new(field: &'static str, value: &str) -> Self {
        Self { field, value: value.to_string() }
    }
}
