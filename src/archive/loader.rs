use crate::archive::error::ArchiveError;
use log::{info, warn};
use polars::prelude::*;
use std::path::Path;

/// Opens an archive table from disk. CSV files must carry a header row.
pub(crate) fn load_frame(path: &Path) -> Result<LazyFrame, ArchiveError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => {
            info!("Reading CSV archive {:?}", path);
            let df = CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(path.to_path_buf()))
                .map_err(|e| ArchiveError::CsvRead {
                    path: path.to_path_buf(),
                    source: e,
                })?
                .finish()
                .map_err(|e| ArchiveError::CsvRead {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            info!("Loaded {} archive records from {:?}", df.height(), path);
            Ok(df.lazy())
        }
        Some("parquet") => {
            info!("Scanning parquet archive {:?}", path);
            LazyFrame::scan_parquet(path, Default::default())
                .map_err(|e| ArchiveError::ParquetScan(path.to_path_buf(), e))
        }
        _ => {
            warn!("Refusing to load archive with unknown file type: {:?}", path);
            Err(ArchiveError::UnsupportedFileType(path.to_path_buf()))
        }
    }
}
