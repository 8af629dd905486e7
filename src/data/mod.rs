/// Data layer: table model, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → IndicatorTable (or LoadError)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ IndicatorTable │  columns in file order, Mês labels
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month / specialty selections → filtered x-values
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
