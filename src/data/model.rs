use std::collections::HashSet;
use std::fmt;

/// Name of the categorical period column.
pub const MONTH_COLUMN: &str = "Mês";

// ---------------------------------------------------------------------------
// CellValue – a single cell of the indicator table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a spreadsheet export produces.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl CellValue {
    /// Guess the type of a raw text cell (CSV, TSV).
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        CellValue::Text(raw.to_string())
    }

    /// Numeric view used for plotting. Text and nulls have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one named column in file order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

// ---------------------------------------------------------------------------
// IndicatorTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded indicator dataset, one row per month.
///
/// Immutable once built: there is no API that changes rows or columns.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTable {
    columns: Vec<Column>,
    /// The `Mês` column rendered as labels, in table order.
    months: Vec<String>,
}

impl IndicatorTable {
    /// Build a table from columns in file order.
    ///
    /// Returns `None` when there is no `Mês` column or when the columns have
    /// different lengths.
    pub fn from_columns(columns: Vec<Column>) -> Option<Self> {
        let month_col = columns.iter().find(|c| c.name == MONTH_COLUMN)?;
        let n_rows = month_col.values.len();
        if columns.iter().any(|c| c.values.len() != n_rows) {
            return None;
        }
        let months = month_col.values.iter().map(|v| v.to_string()).collect();
        Some(IndicatorTable { columns, months })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// The `Mês` values, one per row, in table order.
    pub fn months(&self) -> &[String] {
        &self.months
    }

    /// Column names in file order (the `Mês` column included).
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Per-row numeric values of a column; non-numeric cells become NaN.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name).map(|c| {
            c.values
                .iter()
                .map(|v| v.as_f64().unwrap_or(f64::NAN))
                .collect()
        })
    }

    /// Distinct months in order of first appearance.
    pub fn unique_months(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.months
            .iter()
            .filter(|m| seen.insert(m.as_str()))
            .cloned()
            .collect()
    }

    /// Column names at positions `offset..`: the specialties a user may pick.
    pub fn specialty_columns(&self, offset: usize) -> Vec<String> {
        self.columns
            .iter()
            .skip(offset)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Names from `required` that are absent from the table.
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| self.column(name).is_none())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Months `Jan, Feb, Mar, Feb` with one metric and two specialties.
    pub(crate) fn sample_table() -> IndicatorTable {
        let text = |s: &str| CellValue::Text(s.to_string());
        IndicatorTable::from_columns(vec![
            Column {
                name: MONTH_COLUMN.to_string(),
                values: vec![text("Jan"), text("Feb"), text("Mar"), text("Feb")],
            },
            Column {
                name: "Taxa de Ocupação (%)".to_string(),
                values: [10, 20, 30, 40].into_iter().map(CellValue::Integer).collect(),
            },
            Column {
                name: "Cardiologia".to_string(),
                values: [1, 2, 3, 4].into_iter().map(CellValue::Integer).collect(),
            },
            Column {
                name: "Ortopedia".to_string(),
                values: vec![
                    CellValue::Float(5.5),
                    CellValue::Null,
                    CellValue::Integer(7),
                    CellValue::Integer(8),
                ],
            },
        ])
        .expect("valid sample table")
    }

    #[test]
    fn parse_guesses_cell_types() {
        assert_eq!(CellValue::parse("42"), CellValue::Integer(42));
        assert_eq!(CellValue::parse("12.5"), CellValue::Float(12.5));
        assert_eq!(CellValue::parse("  "), CellValue::Null);
        assert_eq!(CellValue::parse("Jan"), CellValue::Text("Jan".into()));
    }

    #[test]
    fn numeric_values_turn_gaps_into_nan() {
        let table = sample_table();
        let values = table.numeric_values("Ortopedia").unwrap();
        assert_eq!(values[0], 5.5);
        assert!(values[1].is_nan());
        assert_eq!(&values[2..], &[7.0, 8.0]);
        assert!(table.numeric_values("Neurologia").is_none());
    }

    #[test]
    fn unique_months_keep_first_appearance_order() {
        let table = sample_table();
        assert_eq!(table.months(), &["Jan", "Feb", "Mar", "Feb"]);
        assert_eq!(table.unique_months(), vec!["Jan", "Feb", "Mar"]);
    }

    #[test]
    fn specialty_columns_start_at_offset() {
        let table = sample_table();
        assert_eq!(table.specialty_columns(2), vec!["Cardiologia", "Ortopedia"]);
        assert!(table.specialty_columns(10).is_empty());
    }

    #[test]
    fn from_columns_rejects_missing_month_and_ragged_columns() {
        let no_month = vec![Column {
            name: "x".into(),
            values: vec![CellValue::Integer(1)],
        }];
        assert!(IndicatorTable::from_columns(no_month).is_none());

        let ragged = vec![
            Column {
                name: MONTH_COLUMN.into(),
                values: vec![CellValue::Text("Jan".into())],
            },
            Column {
                name: "x".into(),
                values: vec![],
            },
        ];
        assert!(IndicatorTable::from_columns(ragged).is_none());
    }

    #[test]
    fn missing_columns_lists_absent_names() {
        let table = sample_table();
        assert_eq!(
            table.missing_columns(&["Cardiologia", "Urologia"]),
            vec!["Urologia"]
        );
    }
}
