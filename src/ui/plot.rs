use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::chart::{ChartDescription, Dashboard, SPECIALTY_TITLE, SeriesStyle};

const PLOT_HEIGHT: f32 = 260.0;
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Dashboard sections (central panel)
// ---------------------------------------------------------------------------

/// Render every chart of the page, section by section.
pub fn dashboard(ui: &mut Ui, page: &Dashboard) {
    ui.heading("Taxas");
    for (i, chart) in page.rates.iter().enumerate() {
        chart_plot(ui, chart, ("rate", i));
    }

    ui.add_space(8.0);
    ui.heading("Quantidades");
    for (i, chart) in page.deliveries.iter().enumerate() {
        chart_plot(ui, chart, ("delivery", i));
    }

    ui.add_space(8.0);
    ui.heading(SPECIALTY_TITLE);
    match &page.surgeries {
        Some(chart) => chart_plot(ui, chart, ("surgeries", 0)),
        None => {
            ui.label("Selecione pelo menos uma especialidade para visualizar o gráfico.");
        }
    }
}

// ---------------------------------------------------------------------------
// Single chart
// ---------------------------------------------------------------------------

/// Category labels in order of first appearance across all series.
/// Repeated labels share one slot on the x axis.
fn categories(chart: &ChartDescription) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for series in &chart.series {
        for x in &series.x {
            if !labels.contains(x) {
                labels.push(x.clone());
            }
        }
    }
    labels
}

fn slot(labels: &[String], x: &str) -> f64 {
    labels.iter().position(|l| l == x).unwrap_or(0) as f64
}

/// Render one chart description with a categorical x axis.
pub fn chart_plot(ui: &mut Ui, chart: &ChartDescription, id: impl std::hash::Hash) {
    let labels = categories(chart);
    let axis_labels = labels.clone();
    let bar_series = chart
        .series
        .iter()
        .filter(|s| s.style == SeriesStyle::Bar)
        .count();
    let bar_width = GROUP_WIDTH / bar_series.max(1) as f64;

    ui.label(RichText::new(&chart.title).strong());
    Plot::new(id)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            axis_labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let mut bar_index = 0;
            for series in &chart.series {
                let color = series.color.to_color32();
                match series.style {
                    SeriesStyle::DashedLine => {
                        let points: PlotPoints = series
                            .points()
                            .filter(|(_, y)| y.is_finite())
                            .map(|(x, y)| [slot(&labels, x), y])
                            .collect();
                        let line = Line::new(points)
                            .name(&series.name)
                            .color(color)
                            .style(LineStyle::dashed_loose())
                            .width(1.5);
                        plot_ui.line(line);
                    }
                    SeriesStyle::Bar => {
                        let offset = -GROUP_WIDTH / 2.0 + bar_width * (bar_index as f64 + 0.5);
                        let bars: Vec<Bar> = series
                            .points()
                            .filter(|(_, y)| y.is_finite())
                            .map(|(x, y)| {
                                Bar::new(slot(&labels, x) + offset, y)
                                    .width(bar_width)
                                    .name(x)
                            })
                            .collect();
                        plot_ui.bar_chart(BarChart::new(bars).name(&series.name).color(color));
                        bar_index += 1;
                    }
                }
            }
        });
    ui.add_space(4.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Series;
    use crate::color::SeriesColor;

    fn series(x: &[&str]) -> Series {
        Series {
            name: "s".into(),
            color: SeriesColor::green(),
            style: SeriesStyle::Bar,
            x: x.iter().map(|s| s.to_string()).collect(),
            y: vec![1.0; x.len()],
        }
    }

    #[test]
    fn repeated_labels_share_a_slot() {
        let chart = ChartDescription {
            title: "t".into(),
            x_label: "Mês".into(),
            y_label: "y".into(),
            series: vec![series(&["Jan", "Feb", "Mar", "Feb"]), series(&["Abr"])],
        };
        let labels = categories(&chart);
        assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Abr"]);
        assert_eq!(slot(&labels, "Feb"), 1.0);
        assert_eq!(slot(&labels, "Abr"), 3.0);
    }
}
