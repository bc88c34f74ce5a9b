use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use shared::domain::{
    FlightNumber, InvalidPayloadRange, LaunchRecord, Outcome, OutcomeCounts, PayloadRange,
    SiteSelection,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset row: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: outcome class must be 0 or 1, got {class}")]
    InvalidOutcome { line: u64, class: u8 },
    #[error("row {row}: payload mass must be a non-negative number, got {payload}")]
    InvalidPayload { row: usize, payload: f64 },
    #[error("dataset contains no launch records")]
    Empty,
    #[error(transparent)]
    Bounds(#[from] InvalidPayloadRange),
}

/// Column layout of the launch CSV. Unlisted columns (such as the unnamed
/// index column) are ignored.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

impl RawLaunchRow {
    fn into_record(self, line: u64) -> Result<LaunchRecord, DatasetError> {
        let outcome = Outcome::from_class(self.class).ok_or(DatasetError::InvalidOutcome {
            line,
            class: self.class,
        })?;
        Ok(LaunchRecord {
            flight_number: self.flight_number.map(FlightNumber),
            launch_site: self.launch_site.trim().to_string(),
            payload_mass_kg: self.payload_mass_kg,
            outcome,
            booster_version: self
                .booster_version
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            booster_category: self.booster_category.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    pub launch_site: String,
    pub outcomes: OutcomeCounts,
}

/// Immutable, fully loaded launch table.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    bounds: PayloadRange,
    sites: Vec<String>,
    booster_categories: Vec<String>,
}

impl LaunchTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.display(), rows = table.len(), "loaded launch dataset");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let mut records = Vec::new();
        for (index, row) in csv_reader.deserialize::<RawLaunchRow>().enumerate() {
            // header occupies line 1
            let line = index as u64 + 2;
            records.push(row?.into_record(line)?);
        }
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| !r.payload_mass_kg.is_finite() || r.payload_mass_kg < 0.0)
        {
            return Err(DatasetError::InvalidPayload {
                row: index + 1,
                payload: record.payload_mass_kg,
            });
        }

        let mut payloads = records.iter().map(|r| r.payload_mass_kg);
        let first = payloads.next().ok_or(DatasetError::Empty)?;
        let (min, max) = payloads.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        let bounds = PayloadRange::new(min, max)?;

        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        for record in &records {
            if !sites.contains(&record.launch_site) {
                sites.push(record.launch_site.clone());
            }
            if !booster_categories.contains(&record.booster_category) {
                booster_categories.push(record.booster_category.clone());
            }
        }

        Ok(Self {
            records,
            bounds,
            sites,
            booster_categories,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest payload in the table, computed at load time.
    pub fn payload_bounds(&self) -> PayloadRange {
        self.bounds
    }

    /// Distinct launch sites in order of first appearance.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster categories in order of first appearance.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn has_site(&self, launch_site: &str) -> bool {
        self.sites.iter().any(|site| site == launch_site)
    }

    pub fn select_site(&self, site: &SiteSelection) -> Vec<&LaunchRecord> {
        self.records
            .iter()
            .filter(|record| site.matches(&record.launch_site))
            .collect()
    }

    /// Rows inside the payload range, then narrowed to the selected site.
    pub fn select(&self, site: &SiteSelection, range: &PayloadRange) -> Vec<&LaunchRecord> {
        self.records
            .iter()
            .filter(|record| range.contains(record.payload_mass_kg))
            .filter(|record| site.matches(&record.launch_site))
            .collect()
    }

    pub fn site_summaries(&self) -> Vec<SiteSummary> {
        self.sites
            .iter()
            .map(|site| SiteSummary {
                launch_site: site.clone(),
                outcomes: outcome_counts(
                    self.records.iter().filter(|r| &r.launch_site == site),
                ),
            })
            .collect()
    }
}

pub fn outcome_counts<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> OutcomeCounts {
    let mut counts = OutcomeCounts::default();
    for record in records {
        counts.record(record.outcome);
    }
    counts
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
