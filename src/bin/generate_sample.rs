use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const MONTHS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// (column, baseline, spread) – rates in percent.
const RATES: [(&str, f64, f64); 4] = [
    ("Taxa de Ocupação (%)", 82.0, 6.0),
    ("Taxa de Infecção (%)", 3.5, 1.0),
    ("Taxa de Mortalidade (%)", 2.0, 0.6),
    ("Taxa de Satisfação (%)", 91.0, 3.0),
];

/// (column, mean monthly count)
const COUNTS: [(&str, f64); 4] = [
    ("Partos Vaginais SUS", 120.0),
    ("Partos Cesáreos SUS", 95.0),
    ("Partos Vaginais Particular", 30.0),
    ("Partos Cesáreos Particular", 55.0),
];

const SPECIALTIES: [(&str, f64); 6] = [
    ("Cardiologia", 40.0),
    ("Ortopedia", 65.0),
    ("Neurologia", 18.0),
    ("Cirurgia Geral", 110.0),
    ("Ginecologia", 48.0),
    ("Urologia", 27.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Non-negative count around `mean` with ~15% spread.
    fn count(&mut self, mean: f64) -> i64 {
        self.gauss(mean, mean * 0.15).round().max(0.0) as i64
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut fields = vec![Field::new("Mês", DataType::Utf8, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(StringArray::from(MONTHS.to_vec()))];

    for (name, base, spread) in RATES {
        let values: Vec<f64> = MONTHS
            .iter()
            .map(|_| round1(rng.gauss(base, spread).clamp(0.0, 100.0)))
            .collect();
        fields.push(Field::new(name, DataType::Float64, false));
        arrays.push(Arc::new(Float64Array::from(values)));
    }

    for (name, mean) in COUNTS.into_iter().chain(SPECIALTIES) {
        let values: Vec<i64> = MONTHS.iter().map(|_| rng.count(mean)).collect();
        fields.push(Field::new(name, DataType::Int64, false));
        arrays.push(Arc::new(Int64Array::from(values)));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)
        .context("building record batch")?;

    // Parquet
    let parquet_path = "dados.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    // CSV
    let csv_path = "dados.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    let header: Vec<&str> = batch
        .schema_ref()
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    csv_writer.write_record(&header)?;
    for row in 0..batch.num_rows() {
        let record: Vec<String> = batch
            .columns()
            .iter()
            .map(|col| cell_text(col, row))
            .collect();
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush().context("writing CSV output")?;

    println!(
        "Wrote {} months × {} columns to {csv_path} and {parquet_path}",
        batch.num_rows(),
        batch.num_columns()
    );
    Ok(())
}

fn cell_text(col: &ArrayRef, row: usize) -> String {
    if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
        s.value(row).to_string()
    } else if let Some(f) = col.as_any().downcast_ref::<Float64Array>() {
        f.value(row).to_string()
    } else if let Some(i) = col.as_any().downcast_ref::<Int64Array>() {
        i.value(row).to_string()
    } else {
        String::new()
    }
}
