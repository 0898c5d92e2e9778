use super::filter::SiteSelection;
use super::model::{LaunchDataset, Outcome};
use crate::chart::{PieChart, PieSlice};

// ---------------------------------------------------------------------------
// Launch outcomes by site (pie chart)
// ---------------------------------------------------------------------------

/// Count launch outcomes for the pie chart.
///
/// * `All` → successful launches per site, sites in first-appearance order.
/// * one site → records at that site per outcome class, largest count first
///   (ties: first-appearing class first). An unknown site gives zero slices.
pub fn aggregate_outcomes(dataset: &LaunchDataset, selected_site: &SiteSelection) -> PieChart {
    match selected_site {
        SiteSelection::All => successes_by_site(dataset),
        SiteSelection::Site(site) => outcomes_at_site(dataset, site),
    }
}

fn successes_by_site(dataset: &LaunchDataset) -> PieChart {
    let mut slices: Vec<PieSlice> = Vec::new();
    for rec in dataset.records().iter().filter(|r| r.outcome.is_success()) {
        match slices.iter_mut().find(|s| s.label == rec.launch_site) {
            Some(slice) => slice.value += 1,
            None => slices.push(PieSlice {
                label: rec.launch_site.clone(),
                value: 1,
            }),
        }
    }

    PieChart {
        title: "Total Successful Launches by Site".to_string(),
        names: "Launch Site".to_string(),
        slices,
    }
}

fn outcomes_at_site(dataset: &LaunchDataset, site: &str) -> PieChart {
    // Classes in first-appearance order; the stable sort keeps that order on ties.
    let mut present: Vec<(Outcome, usize)> = Vec::with_capacity(2);
    for rec in dataset.records().iter().filter(|r| r.launch_site == site) {
        match present.iter_mut().find(|(o, _)| *o == rec.outcome) {
            Some((_, n)) => *n += 1,
            None => present.push((rec.outcome, 1)),
        }
    }
    present.sort_by(|(_, na), (_, nb)| nb.cmp(na));

    if present.is_empty() {
        log::warn!("No launches recorded for site {site:?}");
    }

    PieChart {
        title: format!("Success vs Failure for Site: {site}"),
        names: "class".to_string(),
        slices: present
            .into_iter()
            .map(|(outcome, value)| PieSlice {
                label: outcome.to_string(),
                value,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, small_dataset};
    use crate::data::model::LaunchRecord;
    use proptest::prelude::*;

    fn as_pairs(chart: &PieChart) -> Vec<(&str, usize)> {
        chart
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect()
    }

    #[test]
    fn all_sites_counts_successes() {
        let chart = aggregate_outcomes(&small_dataset(), &SiteSelection::All);
        assert_eq!(chart.title, "Total Successful Launches by Site");
        assert_eq!(as_pairs(&chart), vec![("SiteA", 1), ("SiteB", 1)]);
    }

    #[test]
    fn single_site_splits_by_class() {
        let chart = aggregate_outcomes(&small_dataset(), &SiteSelection::from_value("SiteA"));
        assert_eq!(chart.title, "Success vs Failure for Site: SiteA");
        assert_eq!(as_pairs(&chart), vec![("1", 1), ("0", 1)]);
    }

    #[test]
    fn single_site_ties_keep_first_appearance() {
        let ds = LaunchDataset::from_records(vec![
            record("S", 1.0, 0, "FT"),
            record("S", 2.0, 1, "FT"),
        ])
        .unwrap();
        let chart = aggregate_outcomes(&ds, &SiteSelection::from_value("S"));
        assert_eq!(as_pairs(&chart), vec![("0", 1), ("1", 1)]);
    }

    #[test]
    fn single_site_orders_by_count() {
        let ds = LaunchDataset::from_records(vec![
            record("S", 1.0, 0, "FT"),
            record("S", 2.0, 1, "FT"),
            record("S", 3.0, 1, "FT"),
        ])
        .unwrap();
        let chart = aggregate_outcomes(&ds, &SiteSelection::from_value("S"));
        assert_eq!(as_pairs(&chart), vec![("1", 2), ("0", 1)]);
    }

    #[test]
    fn only_present_classes_get_slices() {
        let chart = aggregate_outcomes(&small_dataset(), &SiteSelection::from_value("SiteB"));
        assert_eq!(as_pairs(&chart), vec![("1", 1)]);
    }

    #[test]
    fn unknown_site_has_no_slices() {
        let chart = aggregate_outcomes(&small_dataset(), &SiteSelection::from_value("Mars"));
        assert!(chart.slices.is_empty());
        assert_eq!(chart.title, "Success vs Failure for Site: Mars");
    }

    #[test]
    fn all_sites_skips_sites_without_success() {
        let ds = LaunchDataset::from_records(vec![
            record("Fails", 1.0, 0, "FT"),
            record("Works", 2.0, 1, "FT"),
        ])
        .unwrap();
        let chart = aggregate_outcomes(&ds, &SiteSelection::All);
        assert_eq!(as_pairs(&chart), vec![("Works", 1)]);
    }

    fn arb_records() -> impl Strategy<Value = Vec<LaunchRecord>> {
        prop::collection::vec((0usize..4, 0.0f64..10_000.0, 0u8..2), 1..50).prop_map(|rows| {
            rows.into_iter()
                .map(|(s, p, c)| record(["A", "B", "C", "D"][s], p, c, "FT"))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_all_total_is_success_count(records in arb_records()) {
            let ds = LaunchDataset::from_records(records).unwrap();
            let successes = ds.records().iter().filter(|r| r.outcome.is_success()).count();
            prop_assert_eq!(aggregate_outcomes(&ds, &SiteSelection::All).total(), successes);
        }

        #[test]
        fn prop_site_total_is_site_count(records in arb_records(), pick in 0usize..4) {
            let ds = LaunchDataset::from_records(records).unwrap();
            let site = ["A", "B", "C", "D"][pick];
            let at_site = ds.records().iter().filter(|r| r.launch_site == site).count();
            let chart = aggregate_outcomes(&ds, &SiteSelection::from_value(site));
            prop_assert_eq!(chart.total(), at_site);
        }

        #[test]
        fn prop_aggregate_is_idempotent(records in arb_records(), pick in 0usize..4) {
            let ds = LaunchDataset::from_records(records).unwrap();
            let site = SiteSelection::from_value(["A", "B", "C", "D"][pick]);
            prop_assert_eq!(aggregate_outcomes(&ds, &site), aggregate_outcomes(&ds, &site));
        }
    }
}
