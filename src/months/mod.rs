pub mod boundary;
pub mod month_spans;
