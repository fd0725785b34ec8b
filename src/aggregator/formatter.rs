//! Rounding and JSON serialization of the final twelve-month vectors.

use crate::types::monthly_values::MonthlyValues;
use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::collections::BTreeMap;
use std::io;

pub const MONTH_RAIN_AVG_KEY: &str = "monthRainAvgjson";
pub const MONTH_TEMP_MEAN_KEY: &str = "monthTempMeanjson";
pub const MONTH_TEMP_MAX_KEY: &str = "monthTempMaxjson";
pub const MONTH_TEMP_MEAN_MIN_MAX_KEY: &str = "monthTempMeanMinMaxjson";
pub const MONTH_TEMP_MIN_KEY: &str = "monthTempMinjson";

/// Rounds `value` to `places` decimal places, ties to even.
///
/// Absent values stay absent, and so do values that cannot be rounded
/// (NaN or infinite).
///
/// ```
/// use monthly_averages::round_none;
///
/// assert_eq!(round_none(Some(12.345), 1), Some(12.3));
/// assert_eq!(round_none(Some(2.25), 1), Some(2.2));
/// assert_eq!(round_none(None, 2), None);
/// assert_eq!(round_none(Some(f64::NAN), 1), None);
/// ```
pub fn round_none(value: Option<f64>, places: u32) -> Option<f64> {
    let value = value?;
    if !value.is_finite() {
        return None;
    }
    let factor = 10f64.powi(i32::try_from(places).ok()?);
    let rounded = (value * factor).round_ties_even() / factor;
    rounded.is_finite().then_some(rounded)
}

/// Rounds every month of `values`.
pub fn round_values(values: &MonthlyValues, places: u32) -> MonthlyValues {
    values.map_present(|v| round_none(Some(v), places))
}

/// Compact JSON with `", "` between array elements.
struct SpacedArrayFormatter;

impl Formatter for SpacedArrayFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }
}

fn to_json_text<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, SpacedArrayFormatter);
    value.serialize(&mut serializer)?;
    // serde_json only writes valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// The JSON texts handed to the report template, one per output key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthAveragesJson {
    #[serde(rename = "monthRainAvgjson")]
    pub rain_avg: String,
    #[serde(rename = "monthTempMeanjson")]
    pub temp_mean: String,
    #[serde(rename = "monthTempMaxjson")]
    pub temp_max: String,
    /// Twelve `[mean min, mean max]` pairs.
    #[serde(rename = "monthTempMeanMinMaxjson")]
    pub temp_mean_min_max: String,
    #[serde(rename = "monthTempMinjson")]
    pub temp_min: String,
}

impl MonthAveragesJson {
    /// Serializes already converted and rounded vectors.
    pub fn from_vectors(
        rain_avg: &MonthlyValues,
        temp_mean: &MonthlyValues,
        temp_max: &MonthlyValues,
        temp_mean_max: &MonthlyValues,
        temp_min: &MonthlyValues,
        temp_mean_min: &MonthlyValues,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            rain_avg: to_json_text(rain_avg)?,
            temp_mean: to_json_text(temp_mean)?,
            temp_max: to_json_text(temp_max)?,
            temp_mean_min_max: to_json_text(&temp_mean_min.zip(temp_mean_max))?,
            temp_min: to_json_text(temp_min)?,
        })
    }

    /// The mapping of output keys to JSON text expected by the report template.
    pub fn into_search_list(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (MONTH_RAIN_AVG_KEY.to_string(), self.rain_avg),
            (MONTH_TEMP_MEAN_KEY.to_string(), self.temp_mean),
            (MONTH_TEMP_MAX_KEY.to_string(), self.temp_max),
            (MONTH_TEMP_MEAN_MIN_MAX_KEY.to_string(), self.temp_mean_min_max),
            (MONTH_TEMP_MIN_KEY.to_string(), self.temp_min),
        ])
    }
}
