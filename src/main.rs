mod app;
mod color;
mod state;
mod ui;

use app::JobExplorerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional file to open at startup.
    let initial = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Job Market Explorer",
        options,
        Box::new(move |_cc| {
            let app = match initial {
                Some(path) => JobExplorerApp::with_file(&path),
                None => JobExplorerApp::default(),
            };
            Ok(Box::new(app))
        }),
    )
}
