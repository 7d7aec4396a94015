use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct JobExplorerApp {
    pub state: AppState,
}

impl JobExplorerApp {
    /// Start with a table already loaded (file given on the command line).
    pub fn with_file(path: &std::path::Path) -> Self {
        let mut app = Self::default();
        match job_explorer::data::load_file(path) {
            Ok(table) => app.state.set_table(table, path),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                app.state.set_error(format!("Error: {e}"));
            }
        }
        app
    }
}

impl eframe::App for JobExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + view tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table / charts / summary ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Table => table::records_table(ui, &self.state),
            View::Chart(kind) => plot::chart_view(ui, &self.state, kind),
            View::Summary => panels::summary_view(ui, &self.state),
        });
    }
}
