use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Column, IndicatorTable, MONTH_COLUMN};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Why a table could not be loaded. Every kind is terminal for the session.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Arquivo não encontrado.")]
    NotFound { path: PathBuf },

    #[error("O arquivo está vazio.")]
    Empty { path: PathBuf },

    #[error("Erro ao analisar o arquivo CSV.")]
    Malformed { path: PathBuf, detail: String },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Empty { path }
            | LoadError::Malformed { path, .. } => path,
        }
    }

    /// Extra diagnostic for the log; only malformed files carry one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            LoadError::Malformed { detail, .. } => Some(detail),
            _ => None,
        }
    }

    fn malformed(path: &Path, err: anyhow::Error) -> Self {
        LoadError::Malformed {
            path: path.to_path_buf(),
            detail: format!("{err:#}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an indicator table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – one column per indicator
/// * `.json`    – `[{ "Mês": "Jan", "Taxa de Ocupação (%)": 81.2, ... }, ...]`
/// * `.tsv`     – tab separated
/// * anything else is read as comma separated CSV
pub fn load_table(path: &Path) -> Result<IndicatorTable, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::malformed(path, anyhow::Error::new(e).context("reading file")),
    })?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let columns = match ext.as_str() {
        "parquet" | "pq" => parse_parquet(path),
        "json" => parse_json(&bytes),
        "tsv" => parse_delimited(&bytes, b'\t'),
        _ => parse_delimited(&bytes, b','),
    }
    .map_err(|e| LoadError::malformed(path, e))?;

    if columns.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let table = build_table(columns).map_err(|e| LoadError::malformed(path, e))?;
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.len(),
        table.column_names(),
        path.display()
    );
    Ok(table)
}

fn build_table(columns: Vec<Column>) -> Result<IndicatorTable> {
    if !columns.iter().any(|c| c.name == MONTH_COLUMN) {
        bail!("missing '{MONTH_COLUMN}' column");
    }
    IndicatorTable::from_columns(columns).context("columns have different lengths")
}

/// Make header names unique the way dataframe readers do: `x`, `x.1`, `x.2`.
fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .map(|name| {
            let n = counts.entry(name.clone()).or_insert(0);
            let unique = if *n == 0 {
                name
            } else {
                format!("{name}.{n}")
            };
            *n += 1;
            unique
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV / TSV loader
// ---------------------------------------------------------------------------

/// Header row with column names, then one record per month.
/// Short records are padded with nulls; long records are an error.
fn parse_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Column>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    // A header with no usable names has no columns to parse, even when data
    // rows follow it.
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Ok(Vec::new());
    }

    let mut columns: Vec<Column> = dedupe_names(headers)
        .into_iter()
        .map(|name| Column {
            name,
            values: Vec::new(),
        })
        .collect();

    for (row_no, result) in reader.records().enumerate() {
        // 1-based file line; the header is line 1.
        let line = row_no + 2;
        let record = result.with_context(|| format!("CSV line {line}"))?;
        if record.len() > columns.len() {
            bail!(
                "CSV line {line}: expected {} fields, saw {}",
                columns.len(),
                record.len()
            );
        }
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let value = record.get(col_idx).map_or(CellValue::Null, CellValue::parse);
            column.values.push(value);
        }
    }

    Ok(columns)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).
/// Column order follows the keys of the first record; keys that show up later
/// are appended, and records lacking a key get a null there.
fn parse_json(bytes: &[u8]) -> Result<Vec<Column>> {
    let root: JsonValue = serde_json::from_slice(bytes).context("parsing JSON")?;
    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<Column> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        for (key, val) in obj {
            let col_idx = *index.entry(key.clone()).or_insert_with(|| {
                columns.push(Column {
                    name: key.clone(),
                    values: vec![CellValue::Null; i],
                });
                columns.len() - 1
            });
            columns[col_idx].values.push(json_to_cell(val));
        }
        for column in &mut columns {
            if column.values.len() < i + 1 {
                column.values.push(CellValue::Null);
            }
        }
    }

    Ok(columns)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per indicator.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn parse_parquet(path: &Path) -> Result<Vec<Column>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let mut columns: Vec<Column> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| Column {
            name: f.name().clone(),
            values: Vec::new(),
        })
        .collect();

    let reader = builder.build().context("building parquet reader")?;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (column, array) in columns.iter_mut().zip(batch.columns()) {
            let cells = array_to_cells(array)
                .with_context(|| format!("column '{}'", column.name))?;
            column.values.extend(cells);
        }
    }

    Ok(columns)
}

/// Convert a whole Arrow column to cells.
fn array_to_cells(array: &ArrayRef) -> Result<Vec<CellValue>> {
    let dt = array.data_type();
    let cells = if dt.is_integer() {
        let ints = cast(array, &DataType::Int64)?;
        ints.as_primitive::<Int64Type>()
            .iter()
            .map(|v| v.map_or(CellValue::Null, CellValue::Integer))
            .collect()
    } else if dt.is_floating() || matches!(dt, DataType::Decimal128(..) | DataType::Decimal256(..)) {
        let floats = cast(array, &DataType::Float64)?;
        floats
            .as_primitive::<Float64Type>()
            .iter()
            .map(|v| v.map_or(CellValue::Null, CellValue::Float))
            .collect()
    } else if matches!(
        dt,
        DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Utf8View
            | DataType::Dictionary(..)
            | DataType::Boolean
            | DataType::Date32
            | DataType::Date64
    ) {
        let strings = cast(array, &DataType::Utf8)?;
        strings
            .as_string::<i32>()
            .iter()
            .map(|v| v.map_or(CellValue::Null, |s| CellValue::Text(s.to_string())))
            .collect()
    } else {
        bail!("unsupported column type {dt:?}");
    };

    Ok(cells)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
