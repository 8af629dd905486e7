use eframe::egui::{self, Color32, RichText, ScrollArea};

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(config: Config) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A table that failed to load ends the session: show only the message.
        if let Err(e) = &self.state.session {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.heading(RichText::new(e.to_string()).color(Color32::RED));
                });
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        let Ok(session) = &self.state.session else {
            return;
        };

        // ---- Left side panel: filters ----
        let events = egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, session))
            .inner;

        // Any filter change is applied before the charts are rebuilt below.
        self.state.handle_events(events);

        let Ok(session) = &self.state.session else {
            return;
        };
        let page = session.dashboard();

        // ---- Central panel: header and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::header(ui, &self.state.config);
                    plot::dashboard(ui, &page);
                });
        });
    }
}
