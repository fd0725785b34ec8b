use crate::units::UnitError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to read CSV archive {path:?}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to scan parquet archive {0:?}")]
    ParquetScan(PathBuf, #[source] PolarsError),

    #[error("Unsupported archive file type for {0:?}, expected .csv or .parquet")]
    UnsupportedFileType(PathBuf),

    #[error("Missing required column '{column}' in archive")]
    MissingColumn { column: String },

    #[error("Archive mixes unit systems {first:#04x} and {second:#04x}")]
    MixedUnitSystems { first: i64, second: i64 },

    #[error("Invalid unit system in archive")]
    UnitSystem(#[from] UnitError),

    #[error("Polars query failed: {0}")]
    Query(#[from] PolarsError),
}
