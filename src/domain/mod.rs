//! Domain models - records consumed by the scoring core
//!
//! - `types` - day index, coordinates, user and restriction enums
//! - `location` - `Location`, `Shelter` and the two-year occupancy history
//! - `error` - `ScoreError`

pub mod error;
pub mod location;
pub mod types;

pub use error::ScoreError;
pub use location::{DayHistory, DayRecord, Location, LocationKind, OccupancyHistory, Shelter, YearSeries};
pub use types::{Coordinates, DayIndex, ShelterSector, User, UserRestriction};
