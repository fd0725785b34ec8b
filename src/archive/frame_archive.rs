//! An [`Archive`] backed by a polars `LazyFrame` of archive records.
//!
//! The frame must have the columns `dateTime` (epoch seconds), `usUnits`,
//! `interval` (minutes), `outTemp` and `rain`. Observation columns may hold
//! nulls for missing readings.
//!
//! Days for `meanmax`/`meanmin` are calendar days in the archive's
//! [`StationZone`].

use crate::archive::error::ArchiveError;
use crate::archive::loader::load_frame;
use crate::archive::Archive;
use crate::types::record::Record;
use crate::types::time_span::TimeSpan;
use crate::types::time_zone::StationZone;
use crate::types::value_tuple::{AggregateType, ObsType, ValueTuple};
use crate::units::{resolve_unit, UnitSystem};
use log::{debug, warn};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

pub const DATE_TIME: &str = "dateTime";
pub const US_UNITS: &str = "usUnits";
pub const INTERVAL: &str = "interval";

const REQUIRED_COLUMNS: [&str; 5] = [DATE_TIME, US_UNITS, INTERVAL, "outTemp", "rain"];

const VALUE: &str = "value";
const COUNT: &str = "count";

/// Archive records held in a polars `LazyFrame`.
///
/// # Examples
///
/// ```
/// use monthly_averages::{AggregateType, Archive, FrameArchive, ObsType, StationZone, TimeSpan};
/// use polars::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let df = df!(
///     "dateTime" => &[0i64, 3_600, 7_200],
///     "usUnits" => &[17i64, 17, 17],
///     "interval" => &[60i64, 60, 60],
///     "outTemp" => &[Some(3.5), None, Some(7.0)],
///     "rain" => &[Some(0.2), Some(0.0), None],
/// )?;
/// let archive = FrameArchive::from_frame(df)?.with_zone(StationZone::Utc);
///
/// let max = archive.get_aggregate(TimeSpan::new(0, 86_400), ObsType::OutTemp, AggregateType::Max)?;
/// assert_eq!(max.value, Some(7.0));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FrameArchive {
    frame: LazyFrame,
    unit_system: UnitSystem,
    zone: StationZone,
}

impl FrameArchive {
    /// Wraps `frame`, checking its schema and detecting its unit system.
    /// Days are taken in [`StationZone::Local`] until [`FrameArchive::with_zone`] says otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::MissingColumn`] if a required column is absent,
    /// [`ArchiveError::MixedUnitSystems`] if records disagree on `usUnits`, and
    /// [`ArchiveError::UnitSystem`] for an unknown `usUnits` code.
    pub fn new(frame: LazyFrame) -> Result<Self, ArchiveError> {
        let mut probe = frame.clone();
        let schema = probe.collect_schema()?;
        for column in REQUIRED_COLUMNS {
            if schema.get(column).is_none() {
                warn!("Archive is missing required column '{}'", column);
                return Err(ArchiveError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let frame = frame.with_columns([
            col(DATE_TIME).cast(DataType::Int64),
            col(US_UNITS).cast(DataType::Int64),
            col(INTERVAL).cast(DataType::Int64),
            col(ObsType::OutTemp.field_name()).cast(DataType::Float64),
            col(ObsType::Rain.field_name()).cast(DataType::Float64),
        ]);

        let unit_system = Self::detect_unit_system(&frame)?;
        debug!("Archive unit system is {:?}", unit_system);
        Ok(Self {
            frame,
            unit_system,
            zone: StationZone::default(),
        })
    }

    /// Sets the time zone whose calendar days `meanmax`/`meanmin` use.
    pub fn with_zone(mut self, zone: StationZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn from_frame(df: DataFrame) -> Result<Self, ArchiveError> {
        Self::new(df.lazy())
    }

    /// Loads an archive from a `.csv` (with header) or `.parquet` file.
    pub fn from_path(path: &Path) -> Result<Self, ArchiveError> {
        Self::new(load_frame(path)?)
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn zone(&self) -> StationZone {
        self.zone
    }

    /// An empty archive is taken to be in US units.
    fn detect_unit_system(frame: &LazyFrame) -> Result<UnitSystem, ArchiveError> {
        let df = frame
            .clone()
            .select([col(US_UNITS).drop_nulls().unique_stable()])
            .collect()?;
        let codes: Vec<i64> = df.column(US_UNITS)?.i64()?.into_iter().flatten().collect();
        match codes.as_slice() {
            [] => Ok(UnitSystem::default()),
            [code] => Ok(UnitSystem::from_code(*code)?),
            [first, second, ..] => Err(ArchiveError::MixedUnitSystems {
                first: *first,
                second: *second,
            }),
        }
    }

    fn window(&self, span: TimeSpan) -> LazyFrame {
        self.frame.clone().filter(
            col(DATE_TIME)
                .gt_eq(lit(span.start()))
                .and(col(DATE_TIME).lt(lit(span.stop()))),
        )
    }

    fn aggregate_value(
        &self,
        span: TimeSpan,
        field: &str,
        aggregate: AggregateType,
    ) -> Result<Option<f64>, ArchiveError> {
        let window = self.window(span);
        match aggregate {
            AggregateType::Sum => {
                let df = window
                    .select([
                        col(field).sum().alias(VALUE),
                        col(field).count().cast(DataType::Int64).alias(COUNT),
                    ])
                    .collect()?;
                // A sum over no readings is absent, not zero.
                if first_i64(&df, COUNT)?.unwrap_or(0) == 0 {
                    return Ok(None);
                }
                first_f64(&df, VALUE)
            }
            AggregateType::Max => {
                let df = window.select([col(field).max().alias(VALUE)]).collect()?;
                first_f64(&df, VALUE)
            }
            AggregateType::Min => {
                let df = window.select([col(field).min().alias(VALUE)]).collect()?;
                first_f64(&df, VALUE)
            }
            AggregateType::MeanMax | AggregateType::MeanMin => {
                let df = window.select([col(DATE_TIME), col(field)]).collect()?;
                let daily = self.daily_extremes(&df, field, aggregate == AggregateType::MeanMax)?;
                if daily.is_empty() {
                    return Ok(None);
                }
                Ok(Some(daily.values().sum::<f64>() / daily.len() as f64))
            }
        }
    }

    /// Highest (or lowest) non-null reading per local calendar day.
    fn daily_extremes(
        &self,
        df: &DataFrame,
        field: &str,
        highest: bool,
    ) -> Result<BTreeMap<NaiveDate, f64>, ArchiveError> {
        let stamps = df.column(DATE_TIME)?.i64()?;
        let values = df.column(field)?.f64()?;
        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (stamp, value) in stamps.into_iter().zip(values.into_iter()) {
            let (Some(stamp), Some(value)) = (stamp, value) else {
                continue;
            };
            let Some(day) = self.zone.local_date(stamp) else {
                continue;
            };
            daily
                .entry(day)
                .and_modify(|e| *e = if highest { e.max(value) } else { e.min(value) })
                .or_insert(value);
        }
        Ok(daily)
    }
}

fn first_i64(df: &DataFrame, name: &str) -> Result<Option<i64>, ArchiveError> {
    Ok(df.column(name)?.i64()?.get(0))
}

fn first_f64(df: &DataFrame, name: &str) -> Result<Option<f64>, ArchiveError> {
    Ok(df.column(name)?.f64()?.get(0))
}

impl Archive for FrameArchive {
    fn get_record(&self, timestamp: i64) -> Result<Option<Record>, ArchiveError> {
        let latest = self
            .frame
            .clone()
            .filter(col(DATE_TIME).lt_eq(lit(timestamp)))
            .select([col(DATE_TIME).max()])
            .collect()?;
        let Some(date_time) = first_i64(&latest, DATE_TIME)? else {
            return Ok(None);
        };

        let row = self
            .frame
            .clone()
            .filter(col(DATE_TIME).eq(lit(date_time)))
            .limit(1)
            .collect()?;
        let us_units = match first_i64(&row, US_UNITS)? {
            Some(code) => UnitSystem::from_code(code)?,
            None => self.unit_system,
        };
        Ok(Some(Record {
            date_time,
            us_units,
            interval: first_i64(&row, INTERVAL)?.and_then(|v| u32::try_from(v).ok()),
            out_temp: first_f64(&row, ObsType::OutTemp.field_name())?,
            rain: first_f64(&row, ObsType::Rain.field_name())?,
        }))
    }

    fn first_good_stamp(&self) -> Result<Option<i64>, ArchiveError> {
        let df = self
            .frame
            .clone()
            .select([col(DATE_TIME).min()])
            .collect()?;
        first_i64(&df, DATE_TIME)
    }

    fn get_aggregate(
        &self,
        span: TimeSpan,
        obs_type: ObsType,
        aggregate: AggregateType,
    ) -> Result<ValueTuple, ArchiveError> {
        let value = self.aggregate_value(span, obs_type.field_name(), aggregate)?;
        let (unit, group) = resolve_unit(self.unit_system, obs_type);
        Ok(ValueTuple::new(value, unit, group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Unit, UnitGroup};
    use chrono::{TimeZone, Utc};
    use std::io::Write;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap().timestamp()
    }

    // Two January days sampled every six hours, plus one reading on Feb 1st.
    fn sample_archive() -> Result<FrameArchive, Box<dyn std::error::Error>> {
        let times = vec![
            ts(2020, 1, 1, 0),
            ts(2020, 1, 1, 6),
            ts(2020, 1, 1, 12),
            ts(2020, 1, 1, 18),
            ts(2020, 1, 2, 0),
            ts(2020, 1, 2, 6),
            ts(2020, 1, 2, 12),
            ts(2020, 1, 2, 18),
            ts(2020, 2, 1, 0),
        ];
        let n = times.len();
        let df = df!(
            DATE_TIME => times,
            US_UNITS => vec![0x11i64; n],
            INTERVAL => vec![360i64; n],
            "outTemp" => &[Some(1.0), Some(5.0), Some(9.0), Some(3.0), None, Some(4.0), Some(12.0), Some(2.0), Some(20.0)],
            "rain" => &[Some(0.0), Some(1.0), None, Some(2.0), Some(0.5), None, None, None, Some(10.0)],
        )?;
        Ok(FrameArchive::from_frame(df)?.with_zone(StationZone::Utc))
    }

    fn january() -> TimeSpan {
        TimeSpan::new(ts(2020, 1, 1, 0), ts(2020, 2, 1, 0))
    }

    #[test]
    fn test_detects_unit_system_and_tags_values() -> Result<(), Box<dyn std::error::Error>> {
        let archive = sample_archive()?;
        assert_eq!(archive.unit_system(), UnitSystem::MetricWx);

        let rain = archive.get_aggregate(january(), ObsType::Rain, AggregateType::Sum)?;
        assert_eq!(rain.unit, Unit::Mm);
        assert_eq!(rain.group, UnitGroup::Rain);
        Ok(())
    }

    #[test]
    fn test_window_aggregates() -> Result<(), Box<dyn std::error::Error>> {
        let archive = sample_archive()?;
        let get = |agg| archive.get_aggregate(january(), ObsType::OutTemp, agg);

        assert_eq!(
            archive.get_aggregate(january(), ObsType::Rain, AggregateType::Sum)?.value,
            Some(3.5)
        );
        assert_eq!(get(AggregateType::Max)?.value, Some(12.0));
        assert_eq!(get(AggregateType::Min)?.value, Some(1.0));
        // Daily maxima 9 and 12, daily minima 1 and 2.
        assert_eq!(get(AggregateType::MeanMax)?.value, Some(10.5));
        assert_eq!(get(AggregateType::MeanMin)?.value, Some(1.5));
        Ok(())
    }

    #[test]
    fn test_daily_means_follow_station_days() -> Result<(), Box<dyn std::error::Error>> {
        let zone = StationZone::Fixed(chrono::FixedOffset::east_opt(6 * 3_600).unwrap());
        let archive = sample_archive()?.with_zone(zone);
        let get = |agg| archive.get_aggregate(january(), ObsType::OutTemp, agg);

        // At UTC+6 the 18:00Z readings belong to the next day:
        // Jan 1st {1, 5, 9}, Jan 2nd {3, 4, 12}, Jan 3rd {2}.
        let mean_max = get(AggregateType::MeanMax)?.value.unwrap();
        assert!((mean_max - 23.0 / 3.0).abs() < 1e-12);
        assert_eq!(get(AggregateType::MeanMin)?.value, Some(2.0));
        // Plain extremes do not depend on day boundaries.
        assert_eq!(get(AggregateType::Max)?.value, Some(12.0));
        Ok(())
    }

    #[test]
    fn test_window_is_half_open() -> Result<(), Box<dyn std::error::Error>> {
        let archive = sample_archive()?;
        let february = TimeSpan::new(ts(2020, 2, 1, 0), ts(2020, 3, 1, 0));
        let max = archive.get_aggregate(february, ObsType::OutTemp, AggregateType::Max)?;
        assert_eq!(max.value, Some(20.0));
        let rain = archive.get_aggregate(february, ObsType::Rain, AggregateType::Sum)?;
        assert_eq!(rain.value, Some(10.0));
        Ok(())
    }

    #[test]
    fn test_empty_window_is_absent() -> Result<(), Box<dyn std::error::Error>> {
        let archive = sample_archive()?;
        let march = TimeSpan::new(ts(2020, 3, 1, 0), ts(2020, 4, 1, 0));
        for agg in [
            AggregateType::Sum,
            AggregateType::Max,
            AggregateType::Min,
            AggregateType::MeanMax,
            AggregateType::MeanMin,
        ] {
            assert_eq!(
                archive.get_aggregate(march, ObsType::Rain, agg)?.value,
                None,
                "{} over an empty window should be absent",
                agg
            );
        }
        Ok(())
    }

    #[test]
    fn test_get_record_and_first_stamp() -> Result<(), Box<dyn std::error::Error>> {
        let archive = sample_archive()?;
        assert_eq!(archive.first_good_stamp()?, Some(ts(2020, 1, 1, 0)));

        let record = archive.get_record(ts(2020, 1, 1, 7))?.expect("record expected");
        assert_eq!(record.date_time, ts(2020, 1, 1, 6));
        assert_eq!(record.interval, Some(360));
        assert_eq!(record.out_temp, Some(5.0));
        assert_eq!(record.rain, Some(1.0));
        assert_eq!(record.us_units, UnitSystem::MetricWx);

        assert_eq!(archive.get_record(ts(2019, 12, 31, 0))?, None);
        Ok(())
    }

    #[test]
    fn test_rejects_missing_columns() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            DATE_TIME => &[0i64],
            US_UNITS => &[1i64],
            INTERVAL => &[5i64],
            "outTemp" => &[Some(50.0)],
        )?;
        match FrameArchive::from_frame(df) {
            Err(ArchiveError::MissingColumn { column }) => assert_eq!(column, "rain"),
            other => panic!("expected missing column error, got {:?}", other.err()),
        }
        Ok(())
    }

    #[test]
    fn test_rejects_mixed_unit_systems() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!(
            DATE_TIME => &[0i64, 300],
            US_UNITS => &[1i64, 16],
            INTERVAL => &[5i64, 5],
            "outTemp" => &[Some(50.0), Some(10.0)],
            "rain" => &[Some(0.0), Some(0.0)],
        )?;
        assert!(matches!(
            FrameArchive::from_frame(df),
            Err(ArchiveError::MixedUnitSystems { first: 1, second: 16 })
        ));
        Ok(())
    }

    #[test]
    fn test_loads_csv_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
        writeln!(file, "dateTime,usUnits,interval,outTemp,rain")?;
        writeln!(file, "{},1,30,41.0,0.01", ts(2021, 5, 1, 0))?;
        writeln!(file, "{},1,30,,0.02", ts(2021, 5, 1, 12))?;
        writeln!(file, "{},1,30,68.0,", ts(2021, 5, 2, 12))?;
        file.flush()?;

        let archive = FrameArchive::from_path(file.path())?;
        assert_eq!(archive.unit_system(), UnitSystem::Us);

        let may = TimeSpan::new(ts(2021, 5, 1, 0), ts(2021, 6, 1, 0));
        let max = archive.get_aggregate(may, ObsType::OutTemp, AggregateType::Max)?;
        assert_eq!(max.value, Some(68.0));
        assert_eq!(max.unit, Unit::DegreeF);
        let rain = archive.get_aggregate(may, ObsType::Rain, AggregateType::Sum)?;
        assert!((rain.value.unwrap() - 0.03).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_file_type() {
        assert!(matches!(
            FrameArchive::from_path(Path::new("archive.sdb")),
            Err(ArchiveError::UnsupportedFileType(_))
        ));
    }
}
