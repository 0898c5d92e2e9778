use std::f32::consts::TAU;

use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, Plot, Points};

use crate::chart::{PieChart, ScatterChart};
use crate::color::ColorMap;

/// Largest angle drawn as one polygon; keeps every piece convex.
const MAX_WEDGE: f32 = TAU / 16.0;

// ---------------------------------------------------------------------------
// Pie chart (painter-drawn, egui_plot has no pie primitive)
// ---------------------------------------------------------------------------

/// Render a pie chart with its legend, `height` points tall.
pub fn pie_chart(ui: &mut Ui, chart: &PieChart, colors: Option<&ColorMap>, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(chart.title.as_str());
    });

    let fractions = chart.fractions();
    if fractions.is_empty() {
        ui.allocate_ui(Vec2::new(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No launches match the current selection.");
            });
        });
        return;
    }

    let (rect, _) = ui.allocate_exact_size(Vec2::new(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);

    let legend_width = (rect.width() * 0.35).min(260.0);
    let pie_rect = Rect::from_min_max(rect.min, Pos2::new(rect.max.x - legend_width, rect.max.y));
    let center = pie_rect.center();
    let radius = 0.45 * pie_rect.width().min(pie_rect.height());

    let color_of = |label: &str| colors.map_or(Color32::LIGHT_BLUE, |cm| cm.color_for(label));

    // Start at 12 o'clock, go clockwise.
    let mut start = -TAU / 4.0;
    for (slice, fraction) in chart.slices.iter().zip(&fractions) {
        let sweep = *fraction as f32 * TAU;
        let color = color_of(&slice.label);
        for shape in sector_shapes(center, radius, start, sweep, color) {
            painter.add(shape);
        }

        if *fraction >= 0.04 {
            let mid = start + sweep / 2.0;
            let pos = center + 0.65 * radius * Vec2::angled(mid);
            painter.text(
                pos,
                Align2::CENTER_CENTER,
                format!("{:.1}%", fraction * 100.0),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
        }
        start += sweep;
    }

    // Legend: one swatch per slice, in slice order.
    let mut y = rect.min.y + 8.0;
    let x = rect.max.x - legend_width + 8.0;
    for slice in &chart.slices {
        let swatch = Rect::from_min_size(Pos2::new(x, y), Vec2::splat(12.0));
        painter.rect_filled(swatch, 2.0, color_of(&slice.label));
        painter.text(
            Pos2::new(x + 18.0, y + 6.0),
            Align2::LEFT_CENTER,
            format!("{}  ({})", slice.label, slice.value),
            FontId::proportional(13.0),
            ui.visuals().text_color(),
        );
        y += 18.0;
    }
}

/// Split a sector into convex wedges no wider than [`MAX_WEDGE`].
fn sector_shapes(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Vec<Shape> {
    let pieces = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
    let step = sweep / pieces as f32;
    (0..pieces)
        .map(|i| {
            let a0 = start + i as f32 * step;
            // A few arc points per wedge keep the rim round.
            let mut points = vec![center];
            for k in 0..=4 {
                let a = a0 + step * k as f32 / 4.0;
                points.push(center + radius * Vec2::angled(a));
            }
            Shape::convex_polygon(points, color, Stroke::NONE)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter
// ---------------------------------------------------------------------------

/// Render the scatter chart: one legend entry per colour group, hover shows
/// flight and booster when the source file had them.
pub fn scatter_plot(ui: &mut Ui, chart: &ScatterChart, colors: Option<&ColorMap>) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(chart.title.as_str());
    });

    // Owned copy so the formatter does not borrow the chart.
    let hovers: Vec<(String, [f64; 2], String)> = chart
        .points
        .iter()
        .filter_map(|p| Some((p.group.clone(), [p.x, p.y], p.hover.clone()?)))
        .collect();

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .label_formatter(move |name, value| {
            let hover = hovers
                .iter()
                .find(|(g, xy, _)| g == name && xy[0] == value.x && xy[1] == value.y)
                .map(|(_, _, h)| h.as_str());
            match hover {
                Some(h) => format!("{name}\n{h}\n{}", point_label(value.x, value.y)),
                None if name.is_empty() => format!("{:.0} kg", value.x),
                None => format!("{name}\n{}", point_label(value.x, value.y)),
            }
        })
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (group, pts) in chart.series() {
                let color = colors.map_or(Color32::LIGHT_BLUE, |cm| cm.color_for(group));
                let points = Points::new(pts)
                    .name(group)
                    .color(color)
                    .radius(4.0)
                    .filled(true);
                plot_ui.points(points);
            }
        });
}

fn point_label(payload: f64, class: f64) -> String {
    format!("{payload:.0} kg, class {class:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_label_is_single_line() {
        assert_eq!(point_label(2490.4, 1.0), "2490 kg, class 1");
        assert!(!point_label(0.0, 0.0).contains('\n'));
    }

    fn wedge_count(sweep: f32) -> usize {
        sector_shapes(Pos2::ZERO, 10.0, 0.0, sweep, Color32::RED).len()
    }

    #[test]
    fn full_circle_is_split_into_convex_wedges() {
        assert_eq!(wedge_count(TAU), 16);
        assert_eq!(wedge_count(MAX_WEDGE / 2.0), 1);
        assert_eq!(wedge_count(MAX_WEDGE * 1.5), 2);
    }
}
