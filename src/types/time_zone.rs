//! The time zone a station keeps its calendar in.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// Time zone used for calendar months and for the days behind
/// `meanmax`/`meanmin`.
///
/// Parses from `"local"`, `"utc"` or a fixed offset such as `"+02:00"`.
///
/// ```
/// use monthly_averages::StationZone;
///
/// let zone: StationZone = "+02:00".parse().unwrap();
/// // 2019-12-31T23:00:00Z is already New Year's Day two hours east of UTC.
/// let day = zone.local_date(1_577_833_200).unwrap();
/// assert_eq!(day.to_string(), "2020-01-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StationZone {
    /// The time zone of the machine running the report.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl StationZone {
    /// The calendar date of `timestamp` in this zone.
    pub fn local_date(&self, timestamp: i64) -> Option<NaiveDate> {
        let utc = DateTime::<Utc>::from_timestamp(timestamp, 0)?;
        Some(match self {
            StationZone::Local => utc.with_timezone(&Local).date_naive(),
            StationZone::Utc => utc.date_naive(),
            StationZone::Fixed(offset) => utc.with_timezone(offset).date_naive(),
        })
    }

    /// Epoch timestamp of the first instant of `date` in this zone.
    pub fn start_of_day(&self, date: NaiveDate) -> Option<i64> {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        match self {
            StationZone::Local => first_instant(&Local, midnight),
            StationZone::Utc => Some(midnight.and_utc().timestamp()),
            StationZone::Fixed(offset) => first_instant(offset, midnight),
        }
    }
}

// Midnight may not exist when a DST change happens at 00:00; the day then
// starts at the first valid local time after it.
fn first_instant<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<i64> {
    (0..=2)
        .filter_map(|h| local.checked_add_signed(TimeDelta::hours(h)))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|dt| dt.timestamp())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStationZoneError(String);

impl fmt::Display for ParseStationZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid time zone '{}', expected 'local', 'utc' or an offset like '+02:00'",
            self.0
        )
    }
}

impl std::error::Error for ParseStationZoneError {}

impl FromStr for StationZone {
    type Err = ParseStationZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(StationZone::Local),
            "utc" | "z" => Ok(StationZone::Utc),
            other => other
                .parse::<FixedOffset>()
                .map(StationZone::Fixed)
                .map_err(|_| ParseStationZoneError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east(hours: i32) -> StationZone {
        StationZone::Fixed(FixedOffset::east_opt(hours * 3_600).unwrap())
    }

    #[test]
    fn test_parse() {
        assert_eq!("local".parse(), Ok(StationZone::Local));
        assert_eq!("UTC".parse(), Ok(StationZone::Utc));
        assert_eq!("+02:00".parse(), Ok(east(2)));
        assert_eq!("-05:00".parse(), Ok(east(-5)));
        assert!("Mars/Olympus".parse::<StationZone>().is_err());
    }

    #[test]
    fn test_local_date_follows_offset() {
        // 2020-01-31T23:30:00Z
        let ts = 1_580_513_400;
        assert_eq!(StationZone::Utc.local_date(ts), NaiveDate::from_ymd_opt(2020, 1, 31));
        assert_eq!(east(1).local_date(ts), NaiveDate::from_ymd_opt(2020, 2, 1));
        assert_eq!(east(-3).local_date(ts), NaiveDate::from_ymd_opt(2020, 1, 31));
    }

    #[test]
    fn test_start_of_day_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        // 2020-02-01T00:00:00Z
        let utc_midnight = 1_580_515_200;
        assert_eq!(StationZone::Utc.start_of_day(date), Some(utc_midnight));
        assert_eq!(east(2).start_of_day(date), Some(utc_midnight - 7_200));
        assert_eq!(east(-5).start_of_day(date), Some(utc_midnight + 18_000));
    }
}
