//! Location dataset loading (JSON)
//!
//! The dataset is already cleaned upstream; this only maps it onto domain
//! records. Days not listed for a year are missing, and a listed capacity of
//! 0 also means missing.
//!
//! ```json
//! { "locations": [
//!   { "name": "Seaton House", "address": "339 George St",
//!     "latitude": 43.66, "longitude": -79.37,
//!     "kind": "shelter", "sector": "men",
//!     "history": {
//!       "older":  { "year": 2017, "days": [ { "day": 100, "capacity": 120, "occupancy": 110 } ] },
//!       "recent": { "year": 2018, "days": [] } } },
//!   { "name": "Metro Hall", "latitude": 43.64, "longitude": -79.39,
//!     "kind": "other", "category": "cooling_centre" } ] }
//! ```

use crate::domain::location::{
    DayRecord, Location, LocationKind, OccupancyHistory, Shelter, YearSeries,
};
use crate::domain::types::{Coordinates, DayIndex, ShelterSector, DAYS_PER_SERIES};
use anyhow::{bail, ensure, Context};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct RawDataset {
    locations: Vec<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    name: String,
    #[serde(default)]
    address: String,
    latitude: f64,
    longitude: f64,
    #[serde(flatten)]
    kind: RawKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawKind {
    Shelter { sector: ShelterSector, history: RawHistory },
    Other {
        #[serde(default = "default_category")]
        category: String,
    },
}

fn default_category() -> String {
    "other".to_string()
}

#[derive(Debug, Deserialize)]
struct RawHistory {
    older: RawYear,
    recent: RawYear,
}

#[derive(Debug, Deserialize)]
struct RawYear {
    year: i32,
    #[serde(default)]
    days: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    day: i64,
    capacity: u32,
    #[serde(default)]
    occupancy: u32,
}

impl RawYear {
    fn into_series(self) -> anyhow::Result<YearSeries> {
        let mut series = YearSeries::empty(self.year);
        let mut seen = [false; DAYS_PER_SERIES];

        for raw in self.days {
            let day = DayIndex::new(raw.day).with_context(|| format!("year {}", self.year))?;
            if seen[day.as_usize()] {
                bail!("year {}: day {} listed more than once", self.year, day);
            }
            seen[day.as_usize()] = true;
            series.set(day, DayRecord::from_raw(raw.capacity, raw.occupancy));
        }

        Ok(series)
    }
}

impl RawLocation {
    fn into_location(self) -> anyhow::Result<Location> {
        ensure!(
            (-90.0..=90.0).contains(&self.latitude),
            "latitude {} out of range",
            self.latitude
        );
        ensure!(
            (-180.0..=180.0).contains(&self.longitude),
            "longitude {} out of range",
            self.longitude
        );

        let kind = match self.kind {
            RawKind::Shelter { sector, history } => {
                let older = history.older.into_series().context("older year")?;
                let recent = history.recent.into_series().context("recent year")?;
                LocationKind::Shelter(Shelter::new(sector, OccupancyHistory::new(older, recent)))
            }
            RawKind::Other { category } => LocationKind::Other { category },
        };

        Ok(Location::new(
            self.name,
            self.address,
            Coordinates::new(self.latitude, self.longitude),
            kind,
        ))
    }
}

/// Parse a dataset from JSON text
pub fn parse_locations(json: &str) -> anyhow::Result<Vec<Location>> {
    let dataset: RawDataset = serde_json::from_str(json).context("Failed to parse dataset")?;

    dataset
        .locations
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let name = raw.name.clone();
            raw.into_location().with_context(|| format!("location #{} '{}'", i, name))
        })
        .collect()
}

/// Load a dataset file
pub fn load_locations<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Location>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let locations =
        parse_locations(&content).with_context(|| format!("In dataset {}", path.display()))?;

    let shelters = locations.iter().filter(|l| l.is_shelter()).count();
    info!(
        file = %path.display(),
        locations = %locations.len(),
        shelters = %shelters,
        other = %(locations.len() - shelters),
        "dataset_loaded"
    );

    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::DayHistory;

    const SAMPLE: &str = r#"
    { "locations": [
        { "name": "Seaton House", "address": "339 George St",
          "latitude": 43.6605, "longitude": -79.3733,
          "kind": "shelter", "sector": "men",
          "history": {
            "older":  { "year": 2017, "days": [ { "day": 100, "capacity": 120, "occupancy": 110 },
                                                 { "day": 101, "capacity": 0, "occupancy": 4 } ] },
            "recent": { "year": 2018, "days": [ { "day": 101, "capacity": 130, "occupancy": 0 } ] } } },
        { "name": "Metro Hall", "latitude": 43.6455, "longitude": -79.3894,
          "kind": "other", "category": "cooling_centre" },
        { "name": "Library", "latitude": 43.67, "longitude": -79.39, "kind": "other" }
    ] }"#;

    fn day(n: i64) -> DayIndex {
        DayIndex::new(n).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let locations = parse_locations(SAMPLE).unwrap();
        assert_eq!(locations.len(), 3);

        let shelter = locations[0].shelter().unwrap();
        assert_eq!(shelter.sector, ShelterSector::Men);
        assert_eq!(locations[0].address, "339 George St");
        assert!(matches!(shelter.history.day(day(100)), DayHistory::OlderOnly(r) if r.occupancy == 110));
        // capacity 0 in the older year is missing; recent has a genuine zero occupancy
        assert!(matches!(shelter.history.day(day(101)), DayHistory::RecentOnly(r) if r.occupancy == 0));
        assert_eq!(shelter.history.day(day(102)), DayHistory::Undefined);
        assert_eq!(shelter.history.recent().year(), 2018);

        assert_eq!(
            locations[1].kind,
            LocationKind::Other { category: "cooling_centre".to_string() }
        );
        assert_eq!(locations[2].kind, LocationKind::Other { category: "other".to_string() });
        assert_eq!(locations[2].address, "");
    }

    #[test]
    fn test_day_out_of_range_is_error() {
        let json = r#"{ "locations": [ { "name": "X", "latitude": 43.0, "longitude": -79.0,
            "kind": "shelter", "sector": "coed",
            "history": { "older": { "year": 2017, "days": [ { "day": 365, "capacity": 5 } ] },
                         "recent": { "year": 2018 } } } ] }"#;

        let err = parse_locations(json).unwrap_err();
        assert!(format!("{:#}", err).contains("365"));
    }

    #[test]
    fn test_duplicate_day_is_error() {
        let json = r#"{ "locations": [ { "name": "X", "latitude": 43.0, "longitude": -79.0,
            "kind": "shelter", "sector": "youth",
            "history": { "older": { "year": 2017 },
                         "recent": { "year": 2018, "days": [ { "day": 3, "capacity": 5 },
                                                             { "day": 3, "capacity": 6 } ] } } } ] }"#;

        let err = parse_locations(json).unwrap_err();
        assert!(format!("{:#}", err).contains("more than once"));
    }

    #[test]
    fn test_bad_coordinates_is_error() {
        let json = r#"{ "locations": [ { "name": "X", "latitude": 143.0, "longitude": -79.0,
            "kind": "other" } ] }"#;
        assert!(parse_locations(json).is_err());
    }

    #[test]
    fn test_unknown_sector_is_error() {
        let json = r#"{ "locations": [ { "name": "X", "latitude": 43.0, "longitude": -79.0,
            "kind": "shelter", "sector": "seniors",
            "history": { "older": { "year": 2017 }, "recent": { "year": 2018 } } } ] }"#;
        assert!(parse_locations(json).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_locations("/nonexistent/locations.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset"));
    }
}
