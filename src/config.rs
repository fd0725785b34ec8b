//! Report unit configuration: the display unit for each unit group and the
//! string format, and hence rounding precision, used for each unit.
//!
//! The JSON shape mirrors a report's `[Units]` section:
//!
//! ```
//! use monthly_averages::{Unit, UnitsConfig};
//!
//! let config: UnitsConfig = serde_json::from_str(r#"{
//!     "Groups": { "group_rain": "inch", "group_temperature": "degree_F" },
//!     "StringFormats": { "inch": "%.2f", "degree_F": "%.0f" }
//! }"#).unwrap();
//! assert_eq!(config.groups.group_rain, Unit::Inch);
//! ```

use crate::units::{Converter, Unit, UnitGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_STRING_FORMAT: &str = "%.1f";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0:?}")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file {0:?}")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Cannot extract decimal places from string format '{format}' for '{key}'")]
    InvalidStringFormat { key: String, format: String },
}

/// Display unit per unit group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Groups {
    pub group_rain: Unit,
    pub group_temperature: Unit,
}

impl Default for Groups {
    fn default() -> Self {
        Self {
            group_rain: Unit::Mm,
            group_temperature: Unit::DegreeC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UnitsConfig {
    pub groups: Groups,
    /// printf-style formats keyed by unit name (or unit group name).
    pub string_formats: BTreeMap<String, String>,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        let string_formats = [
            ("degree_C", "%.1f"),
            ("degree_F", "%.1f"),
            ("cm", "%.2f"),
            ("inch", "%.2f"),
            ("mm", "%.1f"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            groups: Groups::default(),
            string_formats,
        }
    }
}

impl UnitsConfig {
    /// Reads a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn converter(&self) -> Converter {
        Converter::new(self.groups.group_temperature, self.groups.group_rain)
    }

    /// Number of decimal places to round values displayed in `unit` to.
    ///
    /// Looks up the string format for `unit`, then for `group`, then falls
    /// back to `%.1f`. The digit just before the conversion character is the
    /// number of places.
    pub fn decimal_places(&self, unit: Unit, group: UnitGroup) -> Result<u32, ConfigError> {
        let (key, format) = self
            .string_formats
            .get_key_value(unit.name())
            .or_else(|| self.string_formats.get_key_value(group.name()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .unwrap_or((unit.name(), DEFAULT_STRING_FORMAT));

        let mut chars = format.trim().chars().rev();
        chars
            .nth(1)
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| ConfigError::InvalidStringFormat {
                key: key.to_string(),
                format: format.to_string(),
            })
    }
}
