use crate::units::{Unit, UnitGroup};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnitError {
    #[error("Unknown unit system code {0:#04x}")]
    UnknownUnitSystem(i64),

    #[error("Unit '{unit}' does not belong to group '{group}'")]
    GroupMismatch { unit: Unit, group: UnitGroup },

    #[error("No conversion from '{from}' to '{to}'")]
    NoConversion { from: Unit, to: Unit },
}
