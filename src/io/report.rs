//! Ranking output - text table or JSON lines

use crate::domain::location::{Location, LocationKind};
use crate::infra::config::OutputFormat;
use crate::services::ranking::RankedEntry;
use serde::Serialize;
use std::io::{self, Write};

/// JSON representation of one ranked location
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    rank: usize,
    name: &'a str,
    address: &'a str,
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sector: Option<&'static str>,
    latitude: f64,
    longitude: f64,
    distance_km: f64,
    distance_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    occupancy_weight: Option<f64>,
    score: f64,
}

/// Short label for the kind column
fn kind_label(location: &Location) -> &str {
    match &location.kind {
        LocationKind::Shelter(_) => "shelter",
        LocationKind::Other { category } => category,
    }
}

impl<'a> ReportRow<'a> {
    fn from_entry(entry: &RankedEntry<'a>) -> Self {
        let location = entry.location;
        Self {
            rank: entry.rank,
            name: &location.name,
            address: &location.address,
            kind: kind_label(location),
            sector: location.shelter().map(|s| s.sector.as_str()),
            latitude: location.coordinates.latitude,
            longitude: location.coordinates.longitude,
            distance_km: entry.breakdown.distance_km,
            distance_weight: entry.breakdown.distance_weight,
            occupancy_weight: entry.breakdown.occupancy_weight,
            score: entry.score(),
        }
    }
}

pub fn render<W: Write>(
    entries: &[RankedEntry<'_>],
    format: OutputFormat,
    out: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => render_table(entries, out),
        OutputFormat::Json => render_json(entries, out),
    }
}

fn render_json<W: Write>(entries: &[RankedEntry<'_>], out: &mut W) -> io::Result<()> {
    for entry in entries {
        serde_json::to_writer(&mut *out, &ReportRow::from_entry(entry))?;
        writeln!(out)?;
    }
    Ok(())
}

fn render_table<W: Write>(entries: &[RankedEntry<'_>], out: &mut W) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No matching locations.");
    }

    writeln!(
        out,
        "{:>4}  {:>6}  {:>7}  {:>9}  {:<14}  {}",
        "rank", "score", "km", "occupancy", "kind", "name"
    )?;
    for entry in entries {
        let occupancy = entry
            .breakdown
            .occupancy_weight
            .map(|w| format!("{:.3}", w))
            .unwrap_or_else(|| "-".to_string());
        let name = if entry.location.address.is_empty() {
            entry.location.name.clone()
        } else {
            format!("{} ({})", entry.location.name, entry.location.address)
        };
        writeln!(
            out,
            "{:>4}  {:>6.3}  {:>7.2}  {:>9}  {:<14}  {}",
            entry.rank,
            entry.score(),
            entry.breakdown.distance_km,
            occupancy,
            kind_label(entry.location),
            name
        )?;
    }
    Ok(())
}
