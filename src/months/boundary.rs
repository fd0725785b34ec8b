use crate::months::month_spans::MonthSpan;

/// Decides which month windows count as complete months of record.
///
/// Only the first and last calendar months touching the archive can be
/// rejected. A window is rejected if it started more than one sampling
/// interval before the archive's first record, or if it ends after the
/// query end. Partial months in between are always accepted.
///
/// The interval is the one in effect when the query runs; a historical
/// change of sampling interval is not accounted for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoundaryFilter {
    archive_start: i64,
    archive_end: i64,
    interval_secs: i64,
}

impl BoundaryFilter {
    /// `interval_minutes` is the archive's sampling interval.
    pub fn new(archive_start: i64, archive_end: i64, interval_minutes: u32) -> Self {
        Self {
            archive_start,
            archive_end,
            interval_secs: i64::from(interval_minutes) * 60,
        }
    }

    pub fn is_complete(&self, window: &MonthSpan) -> bool {
        let starts_with_archive = window.start() + self.interval_secs >= self.archive_start;
        let ends_within_archive = window.stop() <= self.archive_end;
        starts_with_archive && ends_within_archive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::months::month_spans::month_spans;
    use crate::types::time_zone::StationZone;
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap().timestamp()
    }

    fn included(start: i64, end: i64, interval: u32) -> Vec<(i32, u32)> {
        let filter = BoundaryFilter::new(start, end, interval);
        month_spans(start, end, StationZone::Utc)
            .filter(|w| filter.is_complete(w))
            .map(|w| (w.month.year(), w.month.month()))
            .collect()
    }

    #[test]
    fn test_partial_first_and_last_months_are_excluded() {
        let months = included(ts(2019, 3, 15, 10, 0), ts(2021, 8, 14, 18, 0), 5);
        assert_eq!(months.first(), Some(&(2019, 4)));
        assert_eq!(months.last(), Some(&(2021, 7)));
        // Apr 2019 ..= Jul 2021
        assert_eq!(months.len(), 28);
    }

    #[test]
    fn test_first_record_within_one_interval_counts_as_complete() {
        // First record five minutes after midnight on the 1st, interval 5 minutes.
        let months = included(ts(2018, 1, 1, 0, 5), ts(2021, 1, 1, 0, 0), 5);
        assert_eq!(months.first(), Some(&(2018, 1)));
        assert_eq!(months.last(), Some(&(2020, 12)));
        assert_eq!(months.len(), 36);
    }

    #[test]
    fn test_first_record_just_beyond_one_interval_is_partial() {
        let months = included(ts(2018, 1, 1, 0, 6), ts(2018, 4, 1, 0, 0), 5);
        assert_eq!(months, vec![(2018, 2), (2018, 3)]);
    }

    #[test]
    fn test_window_ending_exactly_at_query_end_is_complete() {
        let filter = BoundaryFilter::new(ts(2020, 1, 1, 0, 0), ts(2020, 3, 1, 0, 0), 5);
        let windows: Vec<MonthSpan> =
            month_spans(ts(2020, 1, 1, 0, 0), ts(2020, 3, 1, 0, 0), StationZone::Utc).collect();
        // Jan, Feb and the month holding the end instant (Mar).
        assert_eq!(windows.len(), 3);
        assert!(filter.is_complete(&windows[0]));
        assert!(filter.is_complete(&windows[1]));
        assert!(!filter.is_complete(&windows[2]));
    }

    #[test]
    fn test_archive_within_a_single_month_has_no_complete_months() {
        assert!(included(ts(2020, 5, 3, 0, 0), ts(2020, 5, 20, 0, 0), 5).is_empty());
    }
}
