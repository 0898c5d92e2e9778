use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::controls::{option_index, payload_bounds, selection_at};
use crate::data::filter::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – control widgets
// ---------------------------------------------------------------------------

/// Render the left control panel: site drop-down and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let (Some(dataset), Some(controls)) = (&state.dataset, &state.controls) else {
        ui.label("No dataset loaded.");
        return;
    };

    let (min_payload, max_payload) = payload_bounds(dataset);
    let current_site = controls.selected_site.clone();
    let PayloadRange { mut low, mut high } = controls.payload_range;

    // ---- Launch site selector ----
    ui.strong("Launch Site");
    let current_index = option_index(&state.site_options, &current_site);
    let selected_text = current_index
        .and_then(|i| state.site_options.get(i))
        .map(|o| o.label.clone())
        .unwrap_or_else(|| "Select Launch Site".to_string());

    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (i, opt) in state.site_options.iter().enumerate() {
                if ui
                    .selectable_label(current_index == Some(i), &opt.label)
                    .clicked()
                {
                    picked = selection_at(&state.site_options, i);
                }
            }
        });
    if let Some(site) = picked {
        state.select_site(site);
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let step = state.payload_step;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, min_payload..=max_payload)
                .step_by(step)
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, min_payload..=max_payload)
                .step_by(step)
                .text("to"),
        )
        .changed();
    ui.horizontal(|ui: &mut Ui| {
        ui.small(format!("{min_payload:.0}"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.small(format!("{max_payload:.0}"));
        });
    });
    if ui.small_button("Full range").clicked() {
        low = min_payload;
        high = max_payload;
        state.set_payload_range(PayloadRange::new(low, high));
    } else if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }

    if low > high {
        ui.label(RichText::new("Lower bound is above upper bound: no launches match.").weak());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_charts = state.pie.is_some() || state.scatter.is_some();
            if ui
                .add_enabled(has_charts, egui::Button::new("Export charts…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.loading {
            ui.spinner();
        }

        if let Some(ds) = &state.dataset {
            let shown = state.scatter.as_ref().map_or(0, |s| s.points.len());
            ui.label(format!("{} launches loaded, {} in scatter", ds.len(), shown));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .set_file_name("charts.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match state.export_charts(&path) {
            Ok(()) => {
                log::info!("Exported charts to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
