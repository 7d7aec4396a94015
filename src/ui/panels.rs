use eframe::egui::{self, Color32, Grid, RichText, ScrollArea, Ui};
use job_explorer::charts::ChartKind;
use job_explorer::data::{job_summary, load_file_with_warnings, salary_stats, summary::format_thousands};

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let before = state.criteria.clone();
    let mut reset = false;
    let (salary_lo, salary_hi) = state.salary_bounds();
    let (years_lo, years_hi) = state.experience_bounds();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Job title");
            choice_box(ui, "title_filter", &mut state.criteria.job_title, &state.title_options);
            ui.add_space(6.0);

            ui.strong("Location");
            choice_box(ui, "location_filter", &mut state.criteria.location, &state.location_options);
            ui.separator();

            ui.strong("Salary ($)");
            bound_row(ui, "Min", &mut state.criteria.min_salary, salary_lo, 1000.0);
            bound_row(ui, "Max", &mut state.criteria.max_salary, salary_hi, 1000.0);
            ui.separator();

            ui.strong("Experience (years)");
            bound_row(ui, "Min", &mut state.criteria.min_experience, years_lo, 1.0);
            bound_row(ui, "Max", &mut state.criteria.max_experience, years_hi, 1.0);
            ui.separator();

            ui.strong("Keyword in description");
            let mut keyword = state.criteria.keyword.clone().unwrap_or_default();
            if ui.text_edit_singleline(&mut keyword).changed() {
                state.criteria.keyword = Some(keyword);
            }
            ui.add_space(8.0);

            reset = ui.button("Reset filters").clicked();
        });

    if reset {
        state.reset_filters();
    } else if state.criteria != before {
        state.refilter();
    }
}

/// Dropdown over `options`; the first entry is the `"All"` sentinel.
fn choice_box(ui: &mut Ui, id: &str, value: &mut Option<String>, options: &[String]) {
    let current = value.clone().unwrap_or_else(|| options[0].clone());
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui.selectable_label(current == *option, option).clicked() {
                    *value = Some(option.clone());
                }
            }
        });
}

/// Checkbox that switches a bound on, plus a drag value for it.
fn bound_row(ui: &mut Ui, label: &str, bound: &mut Option<f64>, default: f64, speed: f64) {
    ui.horizontal(|ui: &mut Ui| {
        let mut enabled = bound.is_some();
        if ui.checkbox(&mut enabled, label).changed() {
            *bound = enabled.then_some(default);
        }
        if let Some(v) = bound {
            ui.add(egui::DragValue::new(v).speed(speed).range(0.0..=f64::MAX));
        }
    });
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
            let can_export = state.table.is_some();
            if ui.add_enabled(can_export, egui::Button::new("Export…")).clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let name = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}: {} jobs loaded, {} visible",
                table.len(),
                state.filtered.len()
            ));
            ui.separator();
        }

        ui.selectable_value(&mut state.view, View::Table, "Table");
        for kind in ChartKind::ALL {
            ui.selectable_value(&mut state.view, View::Chart(kind), kind.title());
        }
        ui.selectable_value(&mut state.view, View::Summary, "Summary");

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if state.status_is_error {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Summary view
// ---------------------------------------------------------------------------

/// Headline numbers and top groupings of the filtered records.
pub fn summary_view(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore jobs  (File → Open…)");
        });
        return;
    }

    let summary = job_summary(&state.filtered);
    let stats = salary_stats(&state.filtered);
    let money = |v: f64| format!("${}", format_thousands(v));

    ui.heading("Job Market Summary");
    ui.add_space(6.0);
    Grid::new("summary_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            let rows = [
                ("Total jobs", summary.total_jobs.to_string()),
                ("Unique companies", summary.unique_companies.to_string()),
                ("Unique locations", summary.unique_locations.to_string()),
                ("Average salary", money(summary.avg_salary)),
                ("Median salary", money(stats.median)),
                ("Salary range", summary.salary_range.clone()),
            ];
            for (label, value) in rows {
                ui.strong(label);
                ui.label(value);
                ui.end_row();
            }
        });

    ui.add_space(10.0);
    ui.columns(2, |columns| {
        ranked_list(&mut columns[0], "Top locations", &summary.top_locations);
        ranked_list(&mut columns[1], "Top companies", &summary.top_companies);
    });
}

fn ranked_list(ui: &mut Ui, title: &str, entries: &[(String, usize)]) {
    ui.strong(title);
    if entries.is_empty() {
        ui.label("—");
    }
    for (i, (name, count)) in entries.iter().enumerate() {
        ui.label(format!("{}. {name}  ({count})", i + 1));
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open job listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq", "xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xls", "ods"])
        .pick_file();

    if let Some(path) = file {
        match load_file_with_warnings(&path) {
            Ok(outcome) => {
                let skipped = outcome.warnings.len();
                state.set_table(outcome.table, &path);
                if skipped > 0 {
                    state.set_status(format!("{skipped} salary/experience values could not be read"));
                }
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.set_error(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered jobs")
        .set_file_name("filtered_jobs.xlsx")
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet"])
        .save_file();

    if let Some(path) = file {
        state.export_filtered(&path);
    }
}
