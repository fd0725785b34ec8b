use crate::types::monthly_values::MonthlyValues;
use crate::units::error::UnitError;
use crate::units::unit::{Unit, UnitGroup};
use std::collections::HashMap;

/// Converts values into the display unit configured for their unit group.
#[derive(Debug, Clone, PartialEq)]
pub struct Converter {
    targets: HashMap<UnitGroup, Unit>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Unit::DegreeC, Unit::Mm)
    }
}

impl Converter {
    pub fn new(temperature: Unit, rain: Unit) -> Self {
        Self {
            targets: HashMap::from([
                (UnitGroup::Temperature, temperature),
                (UnitGroup::Rain, rain),
            ]),
        }
    }

    /// The display unit for `group`.
    pub fn target_unit(&self, group: UnitGroup) -> Unit {
        self.targets.get(&group).copied().unwrap_or(match group {
            UnitGroup::Temperature => Unit::DegreeC,
            UnitGroup::Rain => Unit::Mm,
        })
    }

    /// Converts a twelve-month vector held in `unit` into the display unit of `group`.
    ///
    /// Absent months stay absent.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::GroupMismatch`] if `unit` is not a member of `group`.
    pub fn convert(
        &self,
        values: &MonthlyValues,
        unit: Unit,
        group: UnitGroup,
    ) -> Result<MonthlyValues, UnitError> {
        if unit.group() != group {
            return Err(UnitError::GroupMismatch { unit, group });
        }
        let target = self.target_unit(group);
        if target == unit {
            return Ok(*values);
        }
        values.try_map_present(|v| Self::convert_value(v, unit, target))
    }

    /// Converts a single value between two units of the same group.
    pub fn convert_value(value: f64, from: Unit, to: Unit) -> Result<f64, UnitError> {
        if from == to {
            return Ok(value);
        }
        match (from, to) {
            (Unit::DegreeF, Unit::DegreeC) => Ok((value - 32.0) * 5.0 / 9.0),
            (Unit::DegreeC, Unit::DegreeF) => Ok(value * 9.0 / 5.0 + 32.0),
            _ if from.group() == UnitGroup::Rain && to.group() == UnitGroup::Rain => {
                Ok(value * mm_per(from) / mm_per(to))
            }
            _ => Err(UnitError::NoConversion { from, to }),
        }
    }
}

// Only called for rain units.
fn mm_per(unit: Unit) -> f64 {
    match unit {
        Unit::Inch => 25.4,
        Unit::Cm => 10.0,
        _ => 1.0,
    }
}
