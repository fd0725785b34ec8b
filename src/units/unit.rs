//! Unit systems, units and unit groups for the observations this crate aggregates.

use crate::types::value_tuple::ObsType;
use crate::units::error::UnitError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The unit system an archive stores its values in, identified by its `usUnits` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    /// US customary units (degree_F, inch). Code `0x01`.
    #[default]
    Us,
    /// Metric units with rain in centimetres. Code `0x10`.
    Metric,
    /// Metric units with rain in millimetres. Code `0x11`.
    MetricWx,
}

impl UnitSystem {
    pub fn from_code(code: i64) -> Result<Self, UnitError> {
        match code {
            0x01 => Ok(UnitSystem::Us),
            0x10 => Ok(UnitSystem::Metric),
            0x11 => Ok(UnitSystem::MetricWx),
            other => Err(UnitError::UnknownUnitSystem(other)),
        }
    }
}

impl TryFrom<i64> for UnitSystem {
    type Error = UnitError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

/// A physical quantity family; values may only be converted within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitGroup {
    #[serde(rename = "group_temperature")]
    Temperature,
    #[serde(rename = "group_rain")]
    Rain,
}

impl UnitGroup {
    pub fn name(&self) -> &'static str {
        match self {
            UnitGroup::Temperature => "group_temperature",
            UnitGroup::Rain => "group_rain",
        }
    }
}

impl fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "degree_F")]
    DegreeF,
    #[serde(rename = "degree_C")]
    DegreeC,
    #[serde(rename = "inch")]
    Inch,
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "mm")]
    Mm,
}

impl Unit {
    pub fn name(&self) -> &'static str {
        match self {
            Unit::DegreeF => "degree_F",
            Unit::DegreeC => "degree_C",
            Unit::Inch => "inch",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
        }
    }

    pub fn group(&self) -> UnitGroup {
        match self {
            Unit::DegreeF | Unit::DegreeC => UnitGroup::Temperature,
            Unit::Inch | Unit::Cm | Unit::Mm => UnitGroup::Rain,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The unit and unit group an observation is stored in under `system`.
pub fn resolve_unit(system: UnitSystem, obs_type: ObsType) -> (Unit, UnitGroup) {
    match (obs_type, system) {
        (ObsType::OutTemp, UnitSystem::Us) => (Unit::DegreeF, UnitGroup::Temperature),
        (ObsType::OutTemp, UnitSystem::Metric | UnitSystem::MetricWx) => {
            (Unit::DegreeC, UnitGroup::Temperature)
        }
        (ObsType::Rain, UnitSystem::Us) => (Unit::Inch, UnitGroup::Rain),
        (ObsType::Rain, UnitSystem::Metric) => (Unit::Cm, UnitGroup::Rain),
        (ObsType::Rain, UnitSystem::MetricWx) => (Unit::Mm, UnitGroup::Rain),
    }
}
