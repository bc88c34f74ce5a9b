use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dropdown value that stands for every launch site.
pub const ALL_SITES: &str = "ALL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightNumber(pub u32);

/// Binary mission outcome, stored as `class` (0 or 1) in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub const ALL: [Outcome; 2] = [Outcome::Failure, Outcome::Success];

    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failed Launches",
            Outcome::Success => "Successful Launches",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub flight_number: Option<FlightNumber>,
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version: Option<String>,
    pub booster_category: String,
}

/// Site dropdown state: either every site or one site by exact name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, launch_site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => site == launch_site,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value)
        }
    }
}

impl From<SiteSelection> for String {
    fn from(value: SiteSelection) -> Self {
        match value {
            SiteSelection::All => ALL_SITES.to_string(),
            SiteSelection::Site(site) => site,
        }
    }
}

impl FromStr for SiteSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SiteSelection::from(s.to_string()))
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidPayloadRange {
    #[error("payload range bounds must be finite numbers")]
    NotFinite,
    #[error("payload range low bound {low} exceeds high bound {high}")]
    Inverted { low: f64, high: f64 },
}

/// Inclusive payload mass interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, InvalidPayloadRange> {
        if !low.is_finite() || !high.is_finite() {
            return Err(InvalidPayloadRange::NotFinite);
        }
        if low > high {
            return Err(InvalidPayloadRange::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        payload_mass_kg >= self.low && payload_mass_kg <= self.high
    }

    pub fn is_within(&self, outer: &PayloadRange) -> bool {
        self.low >= outer.low && self.high <= outer.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub failure: usize,
    pub success: usize,
}

impl OutcomeCounts {
    pub fn get(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Failure => self.failure,
            Outcome::Success => self.success,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Failure => self.failure += 1,
            Outcome::Success => self.success += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.failure + self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_round_trips_through_strings() {
        assert_eq!("ALL".parse::<SiteSelection>(), Ok(SiteSelection::All));
        assert_eq!(
            "KSC LC-39A".parse::<SiteSelection>(),
            Ok(SiteSelection::Site("KSC LC-39A".into()))
        );
        assert_eq!(String::from(SiteSelection::All), "ALL");
    }

    #[test]
    fn site_selection_matching() {
        assert!(SiteSelection::All.matches("CCAFS LC-40"));
        let site = SiteSelection::Site("CCAFS LC-40".into());
        assert!(site.matches("CCAFS LC-40"));
        assert!(!site.matches("CCAFS SLC-40"));
    }

    #[test]
    fn payload_range_is_inclusive() {
        let range = PayloadRange::new(1000.0, 2000.0).expect("range");
        assert!(range.contains(1000.0));
        assert!(range.contains(2000.0));
        assert!(!range.contains(999.9));
        assert!(!range.contains(2000.1));
    }

    #[test]
    fn payload_range_rejects_inverted_and_nan_bounds() {
        assert!(matches!(
            PayloadRange::new(5.0, 1.0),
            Err(InvalidPayloadRange::Inverted { .. })
        ));
        assert_eq!(
            PayloadRange::new(f64::NAN, 1.0),
            Err(InvalidPayloadRange::NotFinite)
        );
    }

    #[test]
    fn outcome_class_mapping_is_binary() {
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(2), None);
        for outcome in Outcome::ALL {
            assert_eq!(Outcome::from_class(outcome.class()), Some(outcome));
        }
    }
}
