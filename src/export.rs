use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::Dashboard;
use crate::state::{FilterEvent, Session};

/// Write every chart description of the page as pretty JSON.
pub fn write_dashboard(page: &Dashboard, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, page).context("serializing charts")?;
    writer.flush().context("writing charts")?;
    Ok(())
}

/// Headless run: select the given months and specialties, then export.
pub fn export_selection(
    mut session: Session,
    months: Vec<String>,
    specialties: Vec<String>,
    path: &Path,
) -> Result<()> {
    session.apply(FilterEvent::SetMonths(months));
    session.apply(FilterEvent::SetSpecialties(specialties));
    let page = session.dashboard();
    write_dashboard(&page, path)?;
    log::info!(
        "Exported {} charts to {}",
        page.rates.len() + page.deliveries.len() + usize::from(page.surgeries.is_some()),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "Mês,Taxa de Ocupação (%),Taxa de Infecção (%),Taxa de Mortalidade (%),\
Taxa de Satisfação (%),Partos Vaginais SUS,Partos Cesáreos SUS,Partos Vaginais Particular,\
Partos Cesáreos Particular,Cardiologia,Ortopedia
Jan,80,2,1,90,10,12,3,4,7,5
Fev,82,3,1,91,11,13,2,5,8,6
Mar,79,2,2,88,9,14,4,3,6,4
";

    #[test]
    fn headless_export_applies_selection() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("dados.csv");
        std::fs::write(&data, TABLE).unwrap();
        let out = dir.path().join("graficos.json");

        let session = Session::open(&data, 5).unwrap();
        export_selection(
            session,
            vec!["Fev".into()],
            vec!["Ortopedia".into(), "Desconhecida".into()],
            &out,
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["rates"].as_array().unwrap().len(), 4);
        assert_eq!(json["deliveries"].as_array().unwrap().len(), 4);

        let occupancy = &json["rates"][0]["series"][0];
        assert_eq!(occupancy["x"], serde_json::json!(["Fev"]));
        assert_eq!(occupancy["y"], serde_json::json!([80.0, 82.0, 79.0]));

        let surgeries = &json["surgeries"]["series"];
        assert_eq!(surgeries.as_array().unwrap().len(), 1);
        assert_eq!(surgeries[0]["name"], "Ortopedia");
        assert_eq!(surgeries[0]["style"], "bar");
    }

    #[test]
    fn write_into_missing_directory_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("graficos.json");
        let page = Dashboard {
            rates: Vec::new(),
            deliveries: Vec::new(),
            surgeries: None,
        };
        let err = write_dashboard(&page, &path).unwrap_err();
        assert!(format!("{err:#}").contains("creating"));
    }
}
