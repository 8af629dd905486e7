use eframe::egui::{self, Align, Color32, Layout, RichText, ScrollArea, Ui};

use crate::config::Config;
use crate::data::model::IndicatorTable;
use crate::state::{AppState, FilterEvent, Session};

// ---------------------------------------------------------------------------
// Page header – title, sector and logos
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, config: &Config) {
    ui.horizontal(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.heading(RichText::new("Dashboard").size(28.0));
            ui.label(RichText::new("Bem-vindo ao Dashboard").size(20.0).strong());
            ui.label(RichText::new("Setor: NQSP - Gestão de Indicadores").size(16.0).strong());
        });
        ui.with_layout(Layout::right_to_left(Align::TOP), |ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                for logo in [&config.hospital_logo, &config.nqsp_logo] {
                    let uri = format!("file://{}", logo.display());
                    ui.add(egui::Image::new(uri).max_width(config.logo_width));
                }
            });
        });
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel; returns the user's actions this frame.
pub fn side_panel(ui: &mut Ui, session: &Session) -> Vec<FilterEvent> {
    let mut events = Vec::new();

    ui.heading("Filtros");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let months = session.filters().selected_months();
            multiselect(
                ui,
                "Selecione os meses:",
                &session.month_options(),
                |m| months.contains(m),
                &mut events,
                FilterEvent::ToggleMonth,
                FilterEvent::ClearMonths,
            );
            ui.separator();

            let specialties = session.filters().selected_specialties();
            multiselect(
                ui,
                "Selecione as especialidades:",
                &session.specialty_options(),
                |s| specialties.iter().any(|sel| sel == s),
                &mut events,
                FilterEvent::ToggleSpecialty,
                FilterEvent::ClearSpecialties,
            );
        });

    events
}

/// A collapsible checkbox list with a clear button.
fn multiselect(
    ui: &mut Ui,
    label: &str,
    options: &[String],
    is_selected: impl Fn(&str) -> bool,
    events: &mut Vec<FilterEvent>,
    toggle: fn(String) -> FilterEvent,
    clear: FilterEvent,
) {
    let n_selected = options.iter().filter(|o| is_selected(o)).count();
    let header_text = format!("{label}  ({n_selected}/{})", options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Limpar").clicked() {
                events.push(clear);
            }
            for option in options {
                let mut checked = is_selected(option);
                if ui.checkbox(&mut checked, option.as_str()).changed() {
                    events.push(toggle(option.clone()));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Arquivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Exportar gráficos…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Ok(session) = &state.session {
            ui.label(table_summary(session.table()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Row/column count for the menu bar.
fn table_summary(table: &IndicatorTable) -> String {
    if table.is_empty() {
        return format!("Nenhum mês carregado, {} colunas", table.column_names().len());
    }
    format!(
        "{} meses carregados, {} colunas",
        table.len(),
        table.column_names().len()
    )
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir indicadores")
        .add_filter("Tabelas", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_table(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Ok(session) = &state.session else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Exportar gráficos")
        .add_filter("JSON", &["json"])
        .set_file_name("graficos.json")
        .save_file();

    if let Some(path) = file {
        match crate::export::write_dashboard(&session.dashboard(), &path) {
            Ok(()) => {
                log::info!("Exported charts to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Erro: {e:#}"));
            }
        }
    }
}
