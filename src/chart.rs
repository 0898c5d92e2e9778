use serde::Serialize;

// ---------------------------------------------------------------------------
// Declarative chart descriptions, independent of rendering
// ---------------------------------------------------------------------------

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
}

/// A pie chart: title plus slices in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub names: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Sum of all slice sizes.
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Fraction of the whole taken by each slice, in slice order.
    /// Empty when the chart has no data.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.slices
            .iter()
            .map(|s| s.value as f64 / total as f64)
            .collect()
    }
}

/// One point of a scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Colour group the point belongs to.
    pub group: String,
    /// Hover text (flight number / booster version when known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
}

/// A scatter chart with categorical colour groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Points grouped by colour group, groups in first-appearance order.
    pub fn series(&self) -> Vec<(&str, Vec<[f64; 2]>)> {
        let mut series: Vec<(&str, Vec<[f64; 2]>)> = Vec::new();
        for p in &self.points {
            match series.iter_mut().find(|(g, _)| *g == p.group) {
                Some((_, pts)) => pts.push([p.x, p.y]),
                None => series.push((p.group.as_str(), vec![[p.x, p.y]])),
            }
        }
        series
    }
}

/// Either chart, tagged by type for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(c) => &c.title,
            ChartSpec::Scatter(c) => &c.title,
        }
    }
}
