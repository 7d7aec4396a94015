use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};
use job_explorer::charts::{
    ChartKind, ExperienceFigure, Figure, LocationFigure, SalaryFigure, NO_DATA,
};

use crate::color::ColorMap;
use crate::state::AppState;

const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);
const LIGHT_GREEN: Color32 = Color32::from_rgb(144, 238, 144);
const ORANGE: Color32 = Color32::from_rgb(255, 165, 0);
const PURPLE: Color32 = Color32::from_rgb(128, 0, 128);

// ---------------------------------------------------------------------------
// Chart views (central panel)
// ---------------------------------------------------------------------------

/// Render one chart kind for the currently filtered records.
pub fn chart_view(ui: &mut Ui, state: &AppState, kind: ChartKind) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore jobs  (File → Open…)");
        });
        return;
    }

    ui.heading(kind.title());
    match kind.build(&state.filtered) {
        Figure::NoData => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(NO_DATA);
            });
        }
        Figure::Salary(fig) => salary_charts(ui, &fig),
        Figure::Location(fig) => location_charts(ui, &fig, state.location_colors.as_ref()),
        Figure::Experience(fig) => experience_chart(ui, &fig),
    }
}

fn salary_charts(ui: &mut Ui, fig: &SalaryFigure) {
    ui.columns(2, |columns| {
        columns[0].strong("Average Salary by Job Title");
        let bars = named_bars(&fig.avg_by_title, |_| SKY_BLUE);
        Plot::new("salary_by_title")
            .legend(Legend::default())
            .x_axis_label("Salary ($)")
            .show(&mut columns[0], |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Average salary"));
            });

        columns[1].strong("Salary Distribution");
        let hist = &fig.histogram;
        let bars: Vec<Bar> = hist
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let (centre, width) = hist.bin(i);
                Bar::new(centre, count as f64)
                    .width(width)
                    .fill(LIGHT_GREEN)
                    .stroke((1.0, Color32::BLACK))
            })
            .collect();
        Plot::new("salary_histogram")
            .x_axis_label("Salary ($)")
            .y_axis_label("Frequency")
            .show(&mut columns[1], |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Jobs"));
            });
    });
}

fn location_charts(ui: &mut Ui, fig: &LocationFigure, colors: Option<&ColorMap>) {
    let color_of = |label: &str| colors.map_or(ORANGE, |cm| cm.color_for(label));

    ui.columns(2, |columns| {
        columns[0].strong("Job Distribution by Location");
        let bars: Vec<Bar> = fig
            .shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                Bar::new(i as f64, share.count as f64)
                    .name(format!("{} ({:.1}%)", share.label, share.percent))
                    .fill(color_of(&share.label))
            })
            .collect();
        Plot::new("location_share")
            .y_axis_label("Number of Jobs")
            .show(&mut columns[0], |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Jobs"));
            });

        columns[1].strong("Average Salary by Location");
        let bars = named_bars(&fig.avg_by_location, color_of);
        Plot::new("salary_by_location")
            .x_axis_label("Salary ($)")
            .show(&mut columns[1], |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Average salary"));
            });
    });
}

fn experience_chart(ui: &mut Ui, fig: &ExperienceFigure) {
    ui.strong("Job Distribution by Experience Level");
    let bars: Vec<Bar> = fig
        .counts
        .iter()
        .enumerate()
        .map(|(i, (level, count))| {
            Bar::new(i as f64, *count as f64)
                .name(level)
                .fill(PURPLE.gamma_multiply(0.7))
        })
        .collect();
    Plot::new("experience_levels")
        .x_axis_label("Experience Level")
        .y_axis_label("Number of Jobs")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Jobs"));
        });
}

/// One bar per `(label, value)`, hover text = label.
fn named_bars(series: &[(String, f64)], color: impl Fn(&str) -> Color32) -> Vec<Bar> {
    series
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            Bar::new(i as f64, *value)
                .name(label)
                .fill(color(label))
        })
        .collect()
}
