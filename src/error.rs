use crate::archive::error::ArchiveError;
use crate::config::ConfigError;
use crate::units::UnitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AveragesError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Units(#[from] UnitError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to serialize monthly averages to JSON")]
    Json(#[from] serde_json::Error),

    #[error("Archive record at {timestamp} has no sampling interval")]
    MissingInterval { timestamp: i64 },
}
