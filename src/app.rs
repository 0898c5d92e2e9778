use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    /// Build the app and load the configured data file.
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::new(config.payload_step);
        state.load_path(&config.data);
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("SpaceX Launch Records Dashboard");
            });
            ui.separator();

            let state = &self.state;
            let (Some(pie), Some(scatter)) = (&state.pie, &state.scatter) else {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a launch records file  (File → Open…)");
                });
                return;
            };

            let pie_height = (ui.available_height() * 0.45).max(160.0);
            plot::pie_chart(ui, pie, state.pie_colors(), pie_height);
            ui.separator();
            plot::scatter_plot(ui, scatter, state.booster_colors.as_ref());
        });
    }
}
