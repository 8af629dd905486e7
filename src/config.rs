use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments; each one can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "indicator-dashboard")]
#[command(about = "Hospital indicator dashboard: rates, deliveries and surgeries by month")]
#[command(version)]
pub struct Config {
    /// Indicator table (.csv, .tsv, .json or .parquet)
    #[arg(short, long, default_value = "dados.csv", env = "DASHBOARD_DATA")]
    pub data: PathBuf,

    /// Hospital logo shown in the page header
    #[arg(long, default_value = "logo_hospital.png", env = "DASHBOARD_HOSPITAL_LOGO")]
    pub hospital_logo: PathBuf,

    /// Quality-office logo shown in the page header
    #[arg(long, default_value = "logo_nqsp.jpg", env = "DASHBOARD_NQSP_LOGO")]
    pub nqsp_logo: PathBuf,

    /// Logo width in points
    #[arg(long, default_value_t = 100.0)]
    pub logo_width: f32,

    /// Position of the first column offered as a specialty
    #[arg(long, default_value_t = 5)]
    pub specialty_offset: usize,

    /// Write the dashboard as JSON to this path and exit instead of opening a window
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Month to select (headless export only; repeatable)
    #[arg(long = "month", requires = "export")]
    pub months: Vec<String>,

    /// Specialty to select (headless export only; repeatable)
    #[arg(long = "specialty", requires = "export")]
    pub specialties: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: PathBuf::from("dados.csv"),
            hospital_logo: PathBuf::from("logo_hospital.png"),
            nqsp_logo: PathBuf::from("logo_nqsp.jpg"),
            logo_width: 100.0,
            specialty_offset: 5,
            export: None,
            months: Vec::new(),
            specialties: Vec::new(),
        }
    }
}
