use std::fmt;

use super::model::LaunchDataset;
use crate::chart::{ScatterChart, ScatterPoint};

/// Value of the "all sites" entry in the site selector.
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Control values
// ---------------------------------------------------------------------------

/// The site selector: every site, or one exact `Launch Site` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a selector value; `"ALL"` is the sentinel, anything else is a site name.
    /// A site literally named `"ALL"` cannot be reached this way; the drop-down
    /// goes through `controls::selection_at` instead.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The selector value as shown to the host (`"ALL"` or the site name).
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s,
        }
    }

    /// Whether a record at `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Closed payload interval `[low, high]` in kilograms.
///
/// `low > high` is representable and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

/// Snapshot of both control values, owned by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub selected_site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl ControlState {
    /// Defaults for a freshly loaded dataset: all sites, full payload range.
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        let (min, max) = dataset.payload_bounds();
        Self {
            selected_site: SiteSelection::All,
            payload_range: PayloadRange::new(min, max),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter
// ---------------------------------------------------------------------------

/// Filter records by payload range, then by site, into a scatter of
/// payload (x) against outcome class (y), coloured by booster category.
///
/// Never fails: an inverted range or unknown site yields zero points.
pub fn filter_scatter(
    dataset: &LaunchDataset,
    selected_site: &SiteSelection,
    payload_range: PayloadRange,
) -> ScatterChart {
    let title = match selected_site {
        SiteSelection::All => "Payload vs. Success for All Sites".to_string(),
        SiteSelection::Site(site) => format!("Payload vs. Success for {site}"),
    };

    let points = dataset
        .records()
        .iter()
        .filter(|rec| payload_range.contains(rec.payload_mass_kg))
        .filter(|rec| selected_site.matches(&rec.launch_site))
        .map(|rec| ScatterPoint {
            x: rec.payload_mass_kg,
            y: f64::from(rec.outcome.class()),
            group: rec.booster_version_category.clone(),
            hover: hover_text(rec.flight_number, rec.booster_version.as_deref()),
        })
        .collect();

    ScatterChart {
        title,
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "class".to_string(),
        color_label: "Booster Version Category".to_string(),
        points,
    }
}

fn hover_text(flight_number: Option<i64>, booster_version: Option<&str>) -> Option<String> {
    match (flight_number, booster_version) {
        (Some(n), Some(b)) => Some(format!("Flight {n} ({b})")),
        (Some(n), None) => Some(format!("Flight {n}")),
        (None, Some(b)) => Some(b.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, small_dataset};
    use crate::data::model::LaunchRecord;
    use proptest::prelude::*;

    #[test]
    fn low_payload_window_keeps_one_point() {
        let ds = small_dataset();
        let chart = filter_scatter(&ds, &SiteSelection::All, PayloadRange::new(0.0, 600.0));
        assert_eq!(chart.title, "Payload vs. Success for All Sites");
        assert_eq!(chart.points.len(), 1);
        let p = &chart.points[0];
        assert_eq!((p.x, p.y, p.group.as_str()), (500.0, 1.0, "v1.0"));
    }

    #[test]
    fn bounds_are_inclusive() {
        let ds = small_dataset();
        let chart = filter_scatter(&ds, &SiteSelection::All, PayloadRange::new(500.0, 1000.0));
        assert_eq!(chart.points.len(), 3);
    }

    #[test]
    fn site_filter_applies_after_range() {
        let ds = small_dataset();
        let site = SiteSelection::from_value("SiteA");
        let chart = filter_scatter(&ds, &site, PayloadRange::new(0.0, 10_000.0));
        assert_eq!(chart.title, "Payload vs. Success for SiteA");
        let xs: Vec<f64> = chart.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![500.0, 700.0]);
    }

    #[test]
    fn unknown_site_is_empty_not_an_error() {
        let ds = small_dataset();
        let site = SiteSelection::from_value("Nowhere");
        let chart = filter_scatter(&ds, &site, PayloadRange::new(0.0, 10_000.0));
        assert!(chart.points.is_empty());
    }

    #[test]
    fn hover_uses_optional_columns() {
        let mut rec = record("SiteA", 1.0, 1, "FT");
        rec.flight_number = Some(7);
        rec.booster_version = Some("F9 FT B1021".into());
        let ds = LaunchDataset::from_records(vec![rec]).unwrap();
        let chart = filter_scatter(&ds, &SiteSelection::All, PayloadRange::new(0.0, 2.0));
        assert_eq!(chart.points[0].hover.as_deref(), Some("Flight 7 (F9 FT B1021)"));
    }

    #[test]
    fn selector_value_round_trips() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        assert_eq!(SiteSelection::from_value("SiteB").value(), "SiteB");
        assert_eq!(SiteSelection::All.to_string(), "ALL");
    }

    #[test]
    fn defaults_cover_full_range() {
        let ds = small_dataset();
        let controls = ControlState::for_dataset(&ds);
        assert_eq!(controls.selected_site, SiteSelection::All);
        assert_eq!(controls.payload_range, PayloadRange::new(500.0, 1000.0));
    }

    fn arb_records() -> impl Strategy<Value = Vec<LaunchRecord>> {
        prop::collection::vec(
            (0usize..3, 0.0f64..10_000.0, 0u8..2, 0usize..2),
            1..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(s, p, c, b)| record(["A", "B", "C"][s], p, c, ["FT", "B5"][b]))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_inverted_range_is_empty(
            records in arb_records(),
            low in 0.0f64..10_000.0,
            gap in 0.001f64..5_000.0,
        ) {
            let ds = LaunchDataset::from_records(records).unwrap();
            let range = PayloadRange::new(low + gap, low);
            let chart = filter_scatter(&ds, &SiteSelection::All, range);
            prop_assert!(chart.points.is_empty());
        }

        #[test]
        fn prop_filter_is_idempotent(records in arb_records(), lo in 0.0f64..5_000.0, hi in 5_000.0f64..10_000.0) {
            let ds = LaunchDataset::from_records(records).unwrap();
            let site = SiteSelection::from_value("B");
            let range = PayloadRange::new(lo, hi);
            prop_assert_eq!(filter_scatter(&ds, &site, range), filter_scatter(&ds, &site, range));
        }

        #[test]
        fn prop_points_satisfy_both_filters(records in arb_records(), lo in 0.0f64..5_000.0, hi in 5_000.0f64..10_000.0) {
            let ds = LaunchDataset::from_records(records).unwrap();
            let range = PayloadRange::new(lo, hi);
            let chart = filter_scatter(&ds, &SiteSelection::from_value("A"), range);
            let expected = ds
                .records()
                .iter()
                .filter(|r| r.launch_site == "A" && range.contains(r.payload_mass_kg))
                .count();
            prop_assert_eq!(chart.points.len(), expected);
        }
    }
}
