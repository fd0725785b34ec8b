pub mod accumulator;
pub mod formatter;
pub mod month_averages;
