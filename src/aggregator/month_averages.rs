//! Provides [`MonthAverages`], which turns an archive into twelve-month
//! climatological averages and extremes for a report.
//!
//! For every calendar month (January ... December) it produces, over all
//! complete months of record:
//!
//! * average rainfall: mean of the monthly rain totals,
//! * mean temperature: mean of `(mean daily max + mean daily min) / 2`,
//! * maximum and minimum temperature: highest and lowest reading seen,
//! * mean maximum and mean minimum temperature: mean of the monthly
//!   averages of daily maxima and minima.
//!
//! Partial months at the very start and end of the archive are ignored;
//! partial months in between are used as they are. Months without data
//! come out as `null`. Months are calendar months of the station's
//! [`StationZone`].

use crate::aggregator::accumulator::{AccumulatorBank, MonthSamples, MonthlyStats};
use crate::aggregator::formatter::{round_values, MonthAveragesJson};
use crate::archive::Archive;
use crate::config::UnitsConfig;
use crate::error::AveragesError;
use crate::months::boundary::BoundaryFilter;
use crate::months::month_spans::{month_spans, MonthSpan};
use crate::types::monthly_values::MonthlyValues;
use crate::types::time_span::TimeSpan;
use crate::types::time_zone::StationZone;
use crate::types::value_tuple::{AggregateType, ObsType};
use crate::units::{resolve_unit, Converter, Unit, UnitGroup};
use bon::bon;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::time::Instant;

/// Units the archive stores rain and temperature in.
#[derive(Debug, Clone, Copy)]
struct SourceUnits {
    rain: Unit,
    temp: Unit,
}

/// Computes monthly averages from an [`Archive`] once per report cycle.
///
/// Holds no state between invocations besides its unit configuration and station zone.
///
/// # Examples
///
/// ```
/// use monthly_averages::{FrameArchive, MonthAverages, TimeSpan, UnitsConfig};
/// use polars::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let df = df!(
///     "dateTime" => &[1_577_836_800i64],
///     "usUnits" => &[17i64],
///     "interval" => &[5i64],
///     "outTemp" => &[Some(4.2)],
///     "rain" => &[Some(0.0)],
/// )?;
/// let archive = FrameArchive::from_frame(df)?;
///
/// let averages = MonthAverages::builder()
///     .config(UnitsConfig::default())
///     .build();
/// let results = averages.get_extension_list(TimeSpan::new(0, 1_577_836_800), || &archive)?;
/// assert_eq!(results.len(), 1);
/// assert!(results[0].contains_key("monthTempMeanMinMaxjson"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MonthAverages {
    config: UnitsConfig,
    converter: Converter,
    zone: StationZone,
}

impl Default for MonthAverages {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[bon]
impl MonthAverages {
    /// Creates a `MonthAverages`; `config` defaults to [`UnitsConfig::default`]
    /// and `zone` to [`StationZone::Local`].
    #[builder]
    pub fn new(config: Option<UnitsConfig>, zone: Option<StationZone>) -> Self {
        let config = config.unwrap_or_default();
        let converter = config.converter();
        Self {
            config,
            converter,
            zone: zone.unwrap_or_default(),
        }
    }

    /// Runs the aggregation for `timespan` against the archive produced by
    /// `db_lookup` and returns the one mapping of template keys to JSON text.
    ///
    /// # Errors
    ///
    /// Archive failures, unit problems and invalid string formats propagate
    /// as [`AveragesError`]. Missing data is not an error.
    pub fn get_extension_list<A, F>(
        &self,
        timespan: TimeSpan,
        db_lookup: F,
    ) -> Result<Vec<BTreeMap<String, String>>, AveragesError>
    where
        A: Archive,
        F: FnOnce() -> A,
    {
        let archive = db_lookup();
        Ok(vec![self.compute(timespan, &archive)?.into_search_list()])
    }

    /// Same as [`MonthAverages::get_extension_list`], returning the typed result.
    pub fn compute<A: Archive + ?Sized>(
        &self,
        timespan: TimeSpan,
        archive: &A,
    ) -> Result<MonthAveragesJson, AveragesError> {
        let started = Instant::now();
        let stats = self.accumulate(timespan, archive)?;
        let json = match stats {
            Some((stats, units)) => self.format(&stats, units)?,
            None => {
                debug!("Archive has no records up to {}, all months are absent", timespan.stop());
                self.format(&MonthlyStats::absent(), self.display_units())?
            }
        };
        debug!(
            "MonthAverages executed in {:.3} seconds",
            started.elapsed().as_secs_f64()
        );
        Ok(json)
    }

    /// Reduced statistics for every complete month, or `None` for an empty archive.
    fn accumulate<A: Archive + ?Sized>(
        &self,
        timespan: TimeSpan,
        archive: &A,
    ) -> Result<Option<(MonthlyStats, SourceUnits)>, AveragesError> {
        let Some(current) = archive.get_record(timespan.stop())? else {
            return Ok(None);
        };
        let interval = current.interval.ok_or(AveragesError::MissingInterval {
            timestamp: current.date_time,
        })?;
        let (rain, _) = resolve_unit(current.us_units, ObsType::Rain);
        let (temp, _) = resolve_unit(current.us_units, ObsType::OutTemp);
        let units = SourceUnits { rain, temp };

        let Some(start_ts) = archive.first_good_stamp()? else {
            return Ok(None);
        };
        let end_ts = timespan.stop();
        let filter = BoundaryFilter::new(start_ts, end_ts, interval);

        let mut bank = AccumulatorBank::new();
        let mut included = 0usize;
        for window in month_spans(start_ts, end_ts, self.zone) {
            if !filter.is_complete(&window) {
                trace!("Skipping partial month {}", window.month);
                continue;
            }
            let samples = Self::fetch_samples(archive, &window, units)?;
            bank.update(window.bin(), &samples);
            included += 1;
        }
        let stats = bank.reduce();
        debug!(
            "Accumulated {} complete months between {} and {}, {} calendar months have temperatures",
            included,
            start_ts,
            end_ts,
            stats.temp_mean.count_present()
        );
        Ok(Some((stats, units)))
    }

    fn fetch_samples<A: Archive + ?Sized>(
        archive: &A,
        window: &MonthSpan,
        units: SourceUnits,
    ) -> Result<MonthSamples, AveragesError> {
        let query = |obs_type: ObsType, aggregate: AggregateType, unit: Unit| {
            archive
                .get_aggregate(window.span, obs_type, aggregate)
                .map_err(AveragesError::from)
                .and_then(|vt| vt.value_in(unit).map_err(AveragesError::from))
        };
        Ok(MonthSamples {
            rain_sum: query(ObsType::Rain, AggregateType::Sum, units.rain)?,
            temp_max: query(ObsType::OutTemp, AggregateType::Max, units.temp)?,
            temp_mean_max: query(ObsType::OutTemp, AggregateType::MeanMax, units.temp)?,
            temp_min: query(ObsType::OutTemp, AggregateType::Min, units.temp)?,
            temp_mean_min: query(ObsType::OutTemp, AggregateType::MeanMin, units.temp)?,
        })
    }

    fn display_units(&self) -> SourceUnits {
        SourceUnits {
            rain: self.converter.target_unit(UnitGroup::Rain),
            temp: self.converter.target_unit(UnitGroup::Temperature),
        }
    }

    /// Converts to display units, rounds and serializes.
    fn format(
        &self,
        stats: &MonthlyStats,
        units: SourceUnits,
    ) -> Result<MonthAveragesJson, AveragesError> {
        let display = self.display_units();
        let rain_places = self.config.decimal_places(display.rain, UnitGroup::Rain)?;
        let temp_places = self
            .config
            .decimal_places(display.temp, UnitGroup::Temperature)?;

        let rain = |values: &MonthlyValues| -> Result<MonthlyValues, AveragesError> {
            let converted = self.converter.convert(values, units.rain, UnitGroup::Rain)?;
            Ok(round_values(&converted, rain_places))
        };
        let temp = |values: &MonthlyValues| -> Result<MonthlyValues, AveragesError> {
            let converted = self
                .converter
                .convert(values, units.temp, UnitGroup::Temperature)?;
            Ok(round_values(&converted, temp_places))
        };

        Ok(MonthAveragesJson::from_vectors(
            &rain(&stats.rain_avg)?,
            &temp(&stats.temp_mean)?,
            &temp(&stats.temp_max)?,
            &temp(&stats.temp_mean_max)?,
            &temp(&stats.temp_min)?,
            &temp(&stats.temp_mean_min)?,
        )?)
    }
}
