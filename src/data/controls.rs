use super::filter::{ALL_SITES, SiteSelection};
use super::model::LaunchDataset;

/// One entry of the site drop-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// "All Sites" followed by every distinct site in first-appearance order.
pub fn site_options(dataset: &LaunchDataset) -> Vec<SiteOption> {
    std::iter::once(SiteOption {
        label: "All Sites".to_string(),
        value: ALL_SITES.to_string(),
    })
    .chain(dataset.sites().iter().map(|site| SiteOption {
        label: site.clone(),
        value: site.clone(),
    }))
    .collect()
}

/// Selection for the drop-down entry at `index`. Entry 0 is every site; any
/// other entry is that exact site, even one whose name is the `"ALL"` sentinel.
pub fn selection_at(options: &[SiteOption], index: usize) -> Option<SiteSelection> {
    match index {
        0 => Some(SiteSelection::All),
        i => options.get(i).map(|o| SiteSelection::Site(o.value.clone())),
    }
}

/// Drop-down entry showing `selection`, the inverse of [`selection_at`].
pub fn option_index(options: &[SiteOption], selection: &SiteSelection) -> Option<usize> {
    match selection {
        SiteSelection::All => Some(0),
        SiteSelection::Site(site) => options
            .iter()
            .skip(1)
            .position(|o| &o.value == site)
            .map(|i| i + 1),
    }
}

/// Slider bounds and default range: `(min, max)` payload mass.
pub fn payload_bounds(dataset: &LaunchDataset) -> (f64, f64) {
    dataset.payload_bounds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::aggregate_outcomes;
    use crate::data::model::fixtures::{record, small_dataset};

    #[test]
    fn options_start_with_all_sites() {
        let opts = site_options(&small_dataset());
        let pairs: Vec<(&str, &str)> = opts
            .iter()
            .map(|o| (o.label.as_str(), o.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("All Sites", "ALL"), ("SiteA", "SiteA"), ("SiteB", "SiteB")]
        );
    }

    #[test]
    fn site_named_like_the_sentinel_stays_selectable() {
        let ds = LaunchDataset::from_records(vec![
            record("ALL", 10.0, 1, "FT"),
            record("SiteB", 20.0, 0, "FT"),
        ])
        .unwrap();
        let opts = site_options(&ds);
        assert_eq!(selection_at(&opts, 0), Some(SiteSelection::All));
        let all_site = selection_at(&opts, 1).unwrap();
        assert_eq!(all_site, SiteSelection::Site("ALL".to_string()));
        assert_eq!(option_index(&opts, &all_site), Some(1));
        assert_eq!(option_index(&opts, &SiteSelection::All), Some(0));
        assert_eq!(selection_at(&opts, 3), None);

        let pie = aggregate_outcomes(&ds, &all_site);
        assert_eq!(pie.title, "Success vs Failure for Site: ALL");
        assert_eq!(pie.total(), 1);
    }

    #[test]
    fn bounds_span_all_payloads() {
        assert_eq!(payload_bounds(&small_dataset()), (500.0, 1000.0));
    }
}
