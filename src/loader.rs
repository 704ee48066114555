//! Bulk loader for the MEI facilities CSV export.
//!
//! The loader, the export's column layout and the API are tightly coupled: if
//! the export changes shape, `MeiFacilityRow` is the place to follow it.

use anyhow::Context;
use api_client::FacilityApi;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use core_types::FacilityPayload;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Lines of title/notes text the export carries above its header row.
pub const DEFAULT_SKIP_ROWS: usize = 6;

/// The subset of export columns that map onto a facility. Other columns are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MeiFacilityRow {
    #[serde(rename = "unique_id")]
    pub uid: String,
    #[serde(rename = "Segment")]
    pub segment: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Technology")]
    pub technology: String,
    #[serde(rename = "Subcategory")]
    pub subcategory: String,
    #[serde(rename = "Investment_Status")]
    pub investment_status: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Investment_Estimated")]
    pub estimated_investment: Option<f64>,
    #[serde(rename = "Announcement_Date")]
    pub announcement_date: String,
}

impl MeiFacilityRow {
    /// Reshapes the row into the API's wire format. Returns `None` when the
    /// announcement date cannot be read, in which case the row is skipped.
    pub fn into_payload(self) -> Option<FacilityPayload> {
        let announcement_date = parse_announcement_date(&self.announcement_date)?;
        Some(FacilityPayload {
            uid: self.uid,
            segment: self.segment,
            company: self.company,
            technology: self.technology,
            subcategory: self.subcategory,
            investment_status: self.investment_status,
            latitude: self.latitude,
            longitude: self.longitude,
            estimated_investment: coerce_investment(self.estimated_investment),
            announcement_date,
        })
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub created: usize,
    pub skipped: usize,
}

/// Reduces the export's date or timestamp to a calendar date.
pub fn parse_announcement_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.date());
        }
    }
    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Whole currency units; fractional cents are rounded away.
pub fn coerce_investment(amount: Option<f64>) -> Option<i64> {
    amount.filter(|v| v.is_finite()).map(|v| v.round() as i64)
}

/// Reads every facility row from the export, after skipping `skip_rows`
/// preamble lines. A row that does not fit the expected columns is an error.
pub fn read_rows(path: &Path, skip_rows: usize) -> anyhow::Result<Vec<MeiFacilityRow>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut line = String::new();
    for _ in 0..skip_rows {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
    }

    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for (idx, record) in csv_reader.deserialize::<MeiFacilityRow>().enumerate() {
        rows.push(record.with_context(|| format!("reading CSV record {idx}"))?);
    }
    Ok(rows)
}

/// Creates one facility per row, sequentially.
///
/// Rows with an unreadable announcement date are logged and skipped. Any
/// failed create aborts the whole run.
pub async fn load_facilities(
    api: &dyn FacilityApi,
    rows: Vec<MeiFacilityRow>,
) -> anyhow::Result<LoadSummary> {
    let mut summary = LoadSummary::default();

    for (idx, row) in rows.into_iter().enumerate() {
        let uid = row.uid.clone();
        let Some(payload) = row.into_payload() else {
            tracing::warn!(idx, %uid, "Found bad date field - skipping facility.");
            summary.skipped += 1;
            continue;
        };

        tracing::info!(idx, %uid, "Processing facility.");
        api.create_facility(&payload)
            .await
            .with_context(|| format!("creating facility {uid} (row {idx})"))?;
        summary.created += 1;
    }

    Ok(summary)
}

/// Loads the CSV at `path` through `api`.
pub async fn run(api: &dyn FacilityApi, path: &Path, skip_rows: usize) -> anyhow::Result<LoadSummary> {
    let rows = read_rows(path, skip_rows)?;
    tracing::info!(rows = rows.len(), path = %path.display(), "Read facilities export.");

    let summary = load_facilities(api, rows).await?;
    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        "Bulk load complete."
    );
    Ok(summary)
}
