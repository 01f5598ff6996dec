/// Data layer: core types, loading, filtering, projection and CSV encoding.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  AND/OR criteria → deduplicated Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  project  │  keep selected columns
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ csv_codec │  Vec<Record> → CSV text
///   └───────────┘
/// ```

pub mod csv_codec;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod project;

pub use csv_codec::to_csv;
pub use error::{DataError, Result};
pub use filter::{apply_filters, Criterion, LogicalOperand};
pub use loader::{load_file, parse_csv_records, parse_json_records};
pub use model::{CellValue, Dataset, Record};
pub use project::project;
