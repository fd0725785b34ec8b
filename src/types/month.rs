use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Number of calendar month bins (January through December).
pub const MONTHS_PER_YEAR: usize = 12;

/// A specific calendar month of a specific year, e.g. March 2019.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);
impl Month {
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> u32 {
        self.1
    }
    pub fn new(month: u32, year: i32) -> Self {
        Self(year, month)
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.year(), date.month())
    }

    /// 0-based calendar month bin, January = 0 ... December = 11.
    pub fn bin(self) -> usize {
        (self.1 as usize).saturating_sub(1) % MONTHS_PER_YEAR
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}
