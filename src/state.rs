use std::path::Path;

use crate::chart::{Dashboard, build_dashboard, required_columns};
use crate::config::Config;
use crate::data::filter::FilterState;
use crate::data::loader::{LoadError, load_table};
use crate::data::model::IndicatorTable;

// ---------------------------------------------------------------------------
// Filter events emitted by the widgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    SetMonths(Vec<String>),
    SetSpecialties(Vec<String>),
    ToggleMonth(String),
    ToggleSpecialty(String),
    ClearMonths,
    ClearSpecialties,
}

// ---------------------------------------------------------------------------
// Session: one loaded table plus the user's selections
// ---------------------------------------------------------------------------

/// Everything a single user session owns. The table never changes; only the
/// filters do, and only through [`Session::apply`].
#[derive(Debug, Clone)]
pub struct Session {
    table: IndicatorTable,
    filters: FilterState,
    specialty_offset: usize,
}

impl Session {
    /// Load the table and check it has every column the page plots.
    pub fn open(path: &Path, specialty_offset: usize) -> Result<Self, LoadError> {
        let table = load_table(path)?;
        let missing = table.missing_columns(&required_columns());
        if !missing.is_empty() {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                detail: format!("missing columns {missing:?}"),
            });
        }
        Ok(Self::new(table, specialty_offset))
    }

    pub fn new(table: IndicatorTable, specialty_offset: usize) -> Self {
        Session {
            table,
            filters: FilterState::default(),
            specialty_offset,
        }
    }

    pub fn table(&self) -> &IndicatorTable {
        &self.table
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Months offered by the month selector.
    pub fn month_options(&self) -> Vec<String> {
        self.table.unique_months()
    }

    /// Columns offered by the specialty selector.
    pub fn specialty_options(&self) -> Vec<String> {
        self.table.specialty_columns(self.specialty_offset)
    }

    /// Apply one user action to the filter state.
    ///
    /// Specialties that are not offered by the selector are ignored, so the
    /// surgery chart only ever references columns in the table.
    pub fn apply(&mut self, event: FilterEvent) {
        log::debug!("filter event: {event:?}");
        let options = self.specialty_options();
        match event {
            FilterEvent::SetMonths(months) => self.filters.set_selected_months(months),
            FilterEvent::SetSpecialties(specialties) => self
                .filters
                .set_selected_specialties(specialties.into_iter().filter(|s| options.contains(s))),
            FilterEvent::ToggleMonth(month) => self.filters.toggle_month(&month),
            FilterEvent::ToggleSpecialty(specialty) => {
                if options.contains(&specialty) {
                    self.filters.toggle_specialty(&specialty);
                }
            }
            FilterEvent::ClearMonths => self.filters.clear_months(),
            FilterEvent::ClearSpecialties => self.filters.clear_specialties(),
        }
    }

    /// Rebuild every chart from the table and the current selections.
    pub fn dashboard(&self) -> Dashboard {
        build_dashboard(&self.table, &self.filters)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// The open session, or the error that ended it before it started.
    pub session: Result<Session, LoadError>,

    /// Status / error message shown in the menu bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let session = Session::open(&config.data, config.specialty_offset);
        if let Err(e) = &session {
            log_load_error(e);
        }
        AppState {
            config,
            session,
            status_message: None,
        }
    }

    /// Replace the session with a table loaded from `path`.
    ///
    /// On failure the current session is kept and the message is shown in
    /// the menu bar.
    pub fn open_table(&mut self, path: &Path) {
        match Session::open(path, self.config.specialty_offset) {
            Ok(session) => {
                self.session = Ok(session);
                self.status_message = None;
            }
            Err(e) => {
                log_load_error(&e);
                self.status_message = Some(format!("{}: {e}", path.display()));
            }
        }
    }

    /// Forward widget events to the session.
    pub fn handle_events(&mut self, events: Vec<FilterEvent>) {
        if let Ok(session) = &mut self.session {
            for event in events {
                session.apply(event);
            }
        }
    }
}

pub fn log_load_error(e: &LoadError) {
    match e.detail() {
        Some(detail) => log::error!("{} ({}): {detail}", e, e.path().display()),
        None => log::error!("{} ({})", e, e.path().display()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::tests::sample_table;

    fn session() -> Session {
        // Specialties start after Mês and the occupancy rate.
        Session::new(sample_table(), 2)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const HEADER: &str = "Mês,Taxa de Ocupação (%),Taxa de Infecção (%),Taxa de Mortalidade (%),\
Taxa de Satisfação (%),Partos Vaginais SUS,Partos Cesáreos SUS,Partos Vaginais Particular,\
Partos Cesáreos Particular,Cardiologia";

    #[test]
    fn options_come_from_the_table() {
        let s = session();
        assert_eq!(s.month_options(), strings(&["Jan", "Feb", "Mar"]));
        assert_eq!(s.specialty_options(), strings(&["Cardiologia", "Ortopedia"]));
    }

    #[test]
    fn events_update_filters_only() {
        let mut s = session();
        let before = s.table().clone();

        s.apply(FilterEvent::SetMonths(strings(&["Feb"])));
        s.apply(FilterEvent::ToggleSpecialty("Ortopedia".into()));
        s.apply(FilterEvent::ToggleSpecialty("Cardiologia".into()));

        assert_eq!(s.filters().selected_months().len(), 1);
        assert_eq!(
            s.filters().selected_specialties(),
            &strings(&["Ortopedia", "Cardiologia"])[..]
        );
        assert_eq!(s.table(), &before);

        s.apply(FilterEvent::ClearMonths);
        s.apply(FilterEvent::ClearSpecialties);
        assert_eq!(s.filters(), &FilterState::default());
    }

    #[test]
    fn specialties_outside_the_options_are_ignored() {
        let mut s = session();
        s.apply(FilterEvent::ToggleSpecialty("Mês".into()));
        s.apply(FilterEvent::SetSpecialties(strings(&["Neurologia", "Cardiologia"])));
        assert_eq!(s.filters().selected_specialties(), &strings(&["Cardiologia"])[..]);
    }

    #[test]
    fn open_checks_required_columns() {
        let file = write_csv("Mês,Taxa de Ocupação (%)\nJan,80\n");
        let err = Session::open(file.path(), 5).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
        assert!(err.detail().unwrap().contains("Taxa de Infecção (%)"));
    }

    #[test]
    fn open_offers_columns_after_offset() {
        let file = write_csv(&format!("{HEADER}\nJan,80,2,1,90,10,12,3,4,7\n"));
        let s = Session::open(file.path(), 5).unwrap();
        assert_eq!(
            s.specialty_options(),
            strings(&[
                "Partos Vaginais SUS",
                "Partos Cesáreos SUS",
                "Partos Vaginais Particular",
                "Partos Cesáreos Particular",
                "Cardiologia",
            ])
        );
        assert_eq!(s.dashboard().rates.len(), 4);
    }

    #[test]
    fn failed_reopen_keeps_current_session() {
        let file = write_csv(&format!("{HEADER}\nJan,80,2,1,90,10,12,3,4,7\n"));
        let config = Config {
            data: file.path().to_path_buf(),
            ..Config::default()
        };
        let mut state = AppState::new(config);
        assert!(state.session.is_ok());

        let dir = tempfile::tempdir().unwrap();
        state.open_table(&dir.path().join("missing.csv"));
        assert!(state.session.is_ok());
        assert!(state
            .status_message
            .as_deref()
            .unwrap()
            .ends_with("Arquivo não encontrado."));

        state.handle_events(vec![FilterEvent::ToggleMonth("Jan".into())]);
        let session = state.session.as_ref().unwrap();
        assert!(session.filters().months_active());
    }

    #[test]
    fn startup_failure_is_kept_as_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data: dir.path().join("dados.csv"),
            ..Config::default()
        };
        let state = AppState::new(config);
        assert!(matches!(state.session, Err(LoadError::NotFound { .. })));
    }
}
