pub mod month;
pub mod monthly_values;
pub mod record;
pub mod time_span;
pub mod time_zone;
pub mod value_tuple;
