pub mod converter;
pub mod error;
pub mod unit;

pub use converter::Converter;
pub use error::UnitError;
pub use unit::{resolve_unit, Unit, UnitGroup, UnitSystem};
