/// Rendering: control panels and the two charts.
pub mod panels;
pub mod plot;
