//! Observation and aggregate identifiers used to query an archive, and the
//! unit-tagged value an archive answers with.

use crate::units::{Converter, Unit, UnitError, UnitGroup};
use std::fmt;

/// An observation type stored in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObsType {
    /// Outside temperature (`outTemp`).
    OutTemp,
    /// Rainfall during the record's interval (`rain`).
    Rain,
}

impl ObsType {
    /// The archive column/field name of this observation.
    pub fn field_name(&self) -> &'static str {
        match self {
            ObsType::OutTemp => "outTemp",
            ObsType::Rain => "rain",
        }
    }
}

impl fmt::Display for ObsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// Aggregate functions an archive can compute over a time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateType {
    Sum,
    Max,
    Min,
    /// Average of the daily maxima within the span.
    MeanMax,
    /// Average of the daily minima within the span.
    MeanMin,
}

impl AggregateType {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateType::Sum => "sum",
            AggregateType::Max => "max",
            AggregateType::Min => "min",
            AggregateType::MeanMax => "meanmax",
            AggregateType::MeanMin => "meanmin",
        }
    }
}

impl fmt::Display for AggregateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A possibly absent value tagged with its unit and unit group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueTuple {
    pub value: Option<f64>,
    pub unit: Unit,
    pub group: UnitGroup,
}

impl ValueTuple {
    pub fn new(value: Option<f64>, unit: Unit, group: UnitGroup) -> Self {
        Self { value, unit, group }
    }

    /// The value expressed in `unit`, converting if needed.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::NoConversion`] if `unit` measures a different quantity.
    pub fn value_in(&self, unit: Unit) -> Result<Option<f64>, UnitError> {
        if unit == self.unit {
            return Ok(self.value);
        }
        self.value
            .map(|v| Converter::convert_value(v, self.unit, unit))
            .transpose()
    }
}
