use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::{ChartSpec, PieChart, ScatterChart};
use crate::color::ColorMap;
use crate::data::aggregate::aggregate_outcomes;
use crate::data::controls::{SiteOption, site_options};
use crate::data::filter::{ControlState, PayloadRange, SiteSelection, filter_scatter};
use crate::data::loader::load_file;
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<LaunchDataset>,

    /// Entries of the site drop-down, derived from the dataset.
    pub site_options: Vec<SiteOption>,

    /// Current control values.
    pub controls: Option<ControlState>,

    /// Step of the payload sliders, in kg.
    pub payload_step: f64,

    /// Latest pie chart (recomputed when the site changes).
    pub pie: Option<PieChart>,

    /// Latest scatter chart (recomputed when site or payload range changes).
    pub scatter: Option<ScatterChart>,

    /// Colours for pie slices in the all-sites view.
    pub site_colors: Option<ColorMap>,

    /// Colours for pie slices in the single-site view.
    pub outcome_colors: ColorMap,

    /// Colours for scatter groups.
    pub booster_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(payload_step: f64) -> Self {
        Self {
            dataset: None,
            site_options: Vec::new(),
            controls: None,
            payload_step,
            pie: None,
            scatter: None,
            site_colors: None,
            outcome_colors: ColorMap::outcomes(),
            booster_colors: None,
            status_message: None,
            loading: false,
        }
    }

    /// Load a file and ingest it, or record the error in the status line.
    pub fn load_path(&mut self, path: &Path) {
        self.loading = true;
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} with sites {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.sites()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    /// Ingest a newly loaded dataset: derive controls, reset them to their
    /// defaults and compute both charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.site_options = site_options(&dataset);
        self.controls = Some(ControlState::for_dataset(&dataset));
        self.site_colors = Some(ColorMap::new(dataset.sites().iter().map(String::as_str)));
        self.booster_colors = Some(ColorMap::new(
            dataset.booster_categories().iter().map(String::as_str),
        ));

        self.dataset = Some(dataset);
        self.recompute_pie();
        self.recompute_scatter();
        self.status_message = None;
        self.loading = false;
    }

    /// Change the site selector. Both charts depend on it.
    pub fn select_site(&mut self, site: SiteSelection) {
        let Some(controls) = &mut self.controls else {
            return;
        };
        if controls.selected_site == site {
            return;
        }
        controls.selected_site = site;
        self.recompute_pie();
        self.recompute_scatter();
    }

    /// Change the payload range. Only the scatter chart depends on it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        let Some(controls) = &mut self.controls else {
            return;
        };
        if controls.payload_range == range {
            return;
        }
        controls.payload_range = range;
        self.recompute_scatter();
    }

    fn recompute_pie(&mut self) {
        if let (Some(ds), Some(controls)) = (&self.dataset, &self.controls) {
            let pie = aggregate_outcomes(ds, &controls.selected_site);
            log::debug!("pie '{}': {} slices", pie.title, pie.slices.len());
            self.pie = Some(pie);
        }
    }

    fn recompute_scatter(&mut self) {
        if let (Some(ds), Some(controls)) = (&self.dataset, &self.controls) {
            let scatter = filter_scatter(ds, &controls.selected_site, controls.payload_range);
            log::debug!("scatter '{}': {} points", scatter.title, scatter.points.len());
            self.scatter = Some(scatter);
        }
    }

    /// Colour map matching the current pie chart's slice labels.
    pub fn pie_colors(&self) -> Option<&ColorMap> {
        match self.controls.as_ref().map(|c| &c.selected_site) {
            Some(SiteSelection::All) => self.site_colors.as_ref(),
            Some(SiteSelection::Site(_)) => Some(&self.outcome_colors),
            None => None,
        }
    }

    /// Both current charts, in display order.
    pub fn chart_specs(&self) -> Vec<ChartSpec> {
        let mut specs = Vec::new();
        if let Some(pie) = &self.pie {
            specs.push(ChartSpec::Pie(pie.clone()));
        }
        if let Some(scatter) = &self.scatter {
            specs.push(ChartSpec::Scatter(scatter.clone()));
        }
        specs
    }

    /// Write the current charts as pretty-printed JSON.
    pub fn export_charts(&self, path: &Path) -> Result<()> {
        let specs = self.chart_specs();
        for spec in &specs {
            log::debug!("exporting chart '{}'", spec.title());
        }
        let json = serde_json::to_string_pretty(&specs).context("serialising charts")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing charts to {}", path.display()))?;
        Ok(())
    }
}
