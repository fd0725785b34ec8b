//! Enumerates calendar-month windows covering a range of epoch timestamps.
//!
//! Calendar arithmetic follows the station's [`StationZone`].

use crate::types::month::Month;
use crate::types::time_span::TimeSpan;
use crate::types::time_zone::StationZone;
use chrono::{Datelike, NaiveDate};

/// Returns the 1st of the month containing `date`, after moving `date` by
/// `d_years` years and `d_months` months (negative offsets step back in time).
///
/// Returns `None` if the resulting date is out of range.
pub fn first_day_of_month(date: NaiveDate, d_years: i32, d_months: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(d_years)?;
    let month0 = (date.month0() as i32).checked_add(d_months)?;
    let year = year.checked_add(month0.div_euclid(12))?;
    let month = month0.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// One calendar month window: `[first instant of month, first instant of next month)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MonthSpan {
    pub month: Month,
    pub span: TimeSpan,
}

impl MonthSpan {
    /// 0-based calendar month bin of this window.
    pub fn bin(&self) -> usize {
        self.month.bin()
    }

    pub fn start(&self) -> i64 {
        self.span.start()
    }

    pub fn stop(&self) -> i64 {
        self.span.stop()
    }
}

/// The calendar months of `zone` intersecting `[start_ts, end_ts]`.
///
/// Iterating borrows nothing and can be repeated; each call to
/// [`MonthSpanRange::iter`] starts again from the first month.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MonthSpanRange {
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
    zone: StationZone,
}

impl MonthSpanRange {
    pub fn new(start_ts: i64, end_ts: i64, zone: StationZone) -> Self {
        if start_ts > end_ts {
            return Self::empty(zone);
        }
        let first = zone.local_date(start_ts).and_then(|d| first_day_of_month(d, 0, 0));
        let last = zone.local_date(end_ts).and_then(|d| first_day_of_month(d, 0, 0));
        match (first, last) {
            (Some(first), Some(last)) => Self {
                first: Some(first),
                last: Some(last),
                zone,
            },
            _ => Self::empty(zone),
        }
    }

    fn empty(zone: StationZone) -> Self {
        Self {
            first: None,
            last: None,
            zone,
        }
    }

    pub fn iter(&self) -> MonthSpans {
        MonthSpans {
            next: self.first,
            last: self.last,
            zone: self.zone,
        }
    }
}

impl IntoIterator for &MonthSpanRange {
    type Item = MonthSpan;
    type IntoIter = MonthSpans;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over contiguous, chronologically ordered [`MonthSpan`]s.
#[derive(Debug, Clone)]
pub struct MonthSpans {
    next: Option<NaiveDate>,
    last: Option<NaiveDate>,
    zone: StationZone,
}

impl Iterator for MonthSpans {
    type Item = MonthSpan;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        if current > self.last? {
            self.next = None;
            return None;
        }
        let following = first_day_of_month(current, 0, 1);
        let window = following.and_then(|following| {
            Some(MonthSpan {
                month: Month::of(current),
                span: TimeSpan::new(
                    self.zone.start_of_day(current)?,
                    self.zone.start_of_day(following)?,
                ),
            })
        });
        self.next = if window.is_some() { following } else { None };
        window
    }
}

/// Shorthand for `MonthSpanRange::new(start_ts, end_ts, zone).iter()`.
pub fn month_spans(start_ts: i64, end_ts: i64, zone: StationZone) -> MonthSpans {
    MonthSpanRange::new(start_ts, end_ts, zone).iter()
}
