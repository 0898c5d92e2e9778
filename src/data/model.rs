use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary launch result
// ---------------------------------------------------------------------------

/// Launch result as stored in the `class` column: 1 = success, 0 = failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value (0 or 1).
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Interpret a raw class value; anything but 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flight_number: Option<i64>,
    pub launch_site: String,
    /// Always finite and non-negative (checked by the loader).
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version: Option<String>,
    /// Used only to colour the scatter chart.
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed control indices.
///
/// Never mutated after construction; a new file produces a new dataset.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in first-appearance order.
    sites: Vec<String>,
    /// Distinct booster categories in first-appearance order.
    booster_categories: Vec<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    /// Build the dataset and its indices. Returns `None` for an empty table,
    /// which has no payload bounds.
    pub fn from_records(records: Vec<LaunchRecord>) -> Option<Self> {
        let first = records.first()?;
        let mut payload_min = first.payload_mass_kg;
        let mut payload_max = first.payload_mass_kg;
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();

        for rec in &records {
            payload_min = payload_min.min(rec.payload_mass_kg);
            payload_max = payload_max.max(rec.payload_mass_kg);
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            if !booster_categories.contains(&rec.booster_version_category) {
                booster_categories.push(rec.booster_version_category.clone());
            }
        }

        Some(LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_min,
            payload_max,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites in first-appearance order.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster version categories in first-appearance order.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Minimum and maximum payload mass over all records.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.payload_min, self.payload_max)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
