use crate::units::UnitSystem;

/// A single archive record, as returned by [`crate::Archive::get_record`].
///
/// Observation fields are optional; an absent reading is `None`, never a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Epoch timestamp (seconds) of the record.
    pub date_time: i64,
    /// The unit system the record's values are stored in (`usUnits`).
    pub us_units: UnitSystem,
    /// Sampling interval of the archive, in minutes.
    pub interval: Option<u32>,
    pub out_temp: Option<f64>,
    pub rain: Option<f64>,
}
