use serde::Serialize;

use crate::color::SeriesColor;
use crate::data::filter::{FilterState, filtered_months};
use crate::data::model::{IndicatorTable, MONTH_COLUMN};

// ---------------------------------------------------------------------------
// Indicator catalogue
// ---------------------------------------------------------------------------

pub const RATE_METRICS: [&str; 4] = [
    "Taxa de Ocupação (%)",
    "Taxa de Infecção (%)",
    "Taxa de Mortalidade (%)",
    "Taxa de Satisfação (%)",
];

pub const DELIVERY_METRICS: [&str; 4] = [
    "Partos Vaginais SUS",
    "Partos Cesáreos SUS",
    "Partos Vaginais Particular",
    "Partos Cesáreos Particular",
];

pub const SPECIALTY_TITLE: &str = "Cirurgias Realizadas por Especialidade";
pub const SPECIALTY_Y_LABEL: &str = "Número de Cirurgias Realizadas";

/// Every column the dashboard plots unconditionally.
pub fn required_columns() -> Vec<&'static str> {
    RATE_METRICS.iter().chain(DELIVERY_METRICS.iter()).copied().collect()
}

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStyle {
    /// Dashed line, used for rates and counts.
    DashedLine,
    Bar,
}

/// One named series. `x` and `y` are not required to have the same length;
/// a renderer pairs them up to the shorter of the two.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub color: SeriesColor,
    pub style: SeriesStyle,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

impl Series {
    /// The (x, y) pairs a renderer actually draws.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.x.iter().map(String::as_str).zip(self.y.iter().copied())
    }
}

/// Renderer-agnostic description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescription {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

// ---------------------------------------------------------------------------
// Chart builder
// ---------------------------------------------------------------------------

/// Replace the x-values of every series with the month-filtered sequence.
///
/// Only x changes: y keeps one value per table row, so a shortened x pairs
/// with a prefix of y rather than with the rows it came from.
fn apply_month_filter(series: &mut [Series], table: &IndicatorTable, filters: &FilterState) {
    if !filters.months_active() {
        return;
    }
    let months = filtered_months(table, filters);
    for s in series {
        s.x = months.clone();
    }
}

fn column_series(
    table: &IndicatorTable,
    column: &str,
    color: &SeriesColor,
    style: SeriesStyle,
) -> Series {
    let y = table
        .numeric_values(column)
        .unwrap_or_else(|| panic!("column '{column}' is not in the table"));
    Series {
        name: column.to_string(),
        color: color.clone(),
        style,
        x: table.months().to_vec(),
        y,
    }
}

/// One chart with one series per column, in the given order.
///
/// # Panics
///
/// If a column is not in the table. Callers validate their columns when the
/// table is opened.
pub fn build_metric_chart(
    table: &IndicatorTable,
    filters: &FilterState,
    title: &str,
    y_label: &str,
    columns: &[&str],
    color: &SeriesColor,
    style: SeriesStyle,
) -> ChartDescription {
    let mut series: Vec<Series> = columns
        .iter()
        .map(|col| column_series(table, col, color, style))
        .collect();
    apply_month_filter(&mut series, table, filters);

    ChartDescription {
        title: title.to_string(),
        x_label: MONTH_COLUMN.to_string(),
        y_label: y_label.to_string(),
        series,
    }
}

/// Bar chart of the selected specialties, or `None` when none is selected.
pub fn build_specialty_chart(
    table: &IndicatorTable,
    filters: &FilterState,
) -> Option<ChartDescription> {
    let selected = filters.selected_specialties();
    if selected.is_empty() {
        return None;
    }

    let accent = SeriesColor::green();
    let mut series: Vec<Series> = selected
        .iter()
        .map(|col| column_series(table, col, &accent, SeriesStyle::Bar))
        .collect();
    apply_month_filter(&mut series, table, filters);

    Some(ChartDescription {
        title: SPECIALTY_TITLE.to_string(),
        x_label: MONTH_COLUMN.to_string(),
        y_label: SPECIALTY_Y_LABEL.to_string(),
        series,
    })
}

// ---------------------------------------------------------------------------
// Dashboard: every chart on the page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub rates: Vec<ChartDescription>,
    pub deliveries: Vec<ChartDescription>,
    pub surgeries: Option<ChartDescription>,
}

fn delivery_color(column: &str) -> SeriesColor {
    if column.contains("Vaginais") {
        SeriesColor::gray()
    } else {
        SeriesColor::green()
    }
}

/// Build the whole page from the table and the current selections.
pub fn build_dashboard(table: &IndicatorTable, filters: &FilterState) -> Dashboard {
    let rates = RATE_METRICS
        .into_iter()
        .map(|rate| {
            build_metric_chart(
                table,
                filters,
                &format!("Gráfico da {rate}"),
                rate,
                &[rate],
                &SeriesColor::green(),
                SeriesStyle::DashedLine,
            )
        })
        .collect();

    let deliveries = DELIVERY_METRICS
        .into_iter()
        .map(|count| {
            build_metric_chart(
                table,
                filters,
                &format!("Gráfico de {count}"),
                count,
                &[count],
                &delivery_color(count),
                SeriesStyle::DashedLine,
            )
        })
        .collect();

    Dashboard {
        rates,
        deliveries,
        surgeries: build_specialty_chart(table, filters),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
