//! Per-calendar-month accumulators and their reduction to final values.

use crate::types::month::MONTHS_PER_YEAR;
use crate::types::monthly_values::MonthlyValues;

/// Running total and number of contributing years for one calendar month.
///
/// `total` is `None` exactly when `count == 0`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AccumulatorCell {
    total: Option<f64>,
    count: u32,
}

impl AccumulatorCell {
    pub fn add(&mut self, value: f64) {
        self.total = Some(self.total.unwrap_or(0.0) + value);
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn total(&self) -> Option<f64> {
        self.total
    }

    /// `total / count`, or `None` if nothing was added.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        self.total.map(|total| total / f64::from(self.count))
    }
}

/// Twelve [`AccumulatorCell`]s, one per calendar month.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeanBank {
    cells: [AccumulatorCell; MONTHS_PER_YEAR],
}

impl MeanBank {
    /// Adds `value` to `bin` if present; absent samples leave the bin untouched.
    pub fn accumulate(&mut self, bin: usize, value: Option<f64>) {
        if let Some(value) = value {
            self.cells[bin].add(value);
        }
    }

    pub fn cell(&self, bin: usize) -> &AccumulatorCell {
        &self.cells[bin]
    }

    pub fn reduce(&self) -> MonthlyValues {
        let mut out = MonthlyValues::absent();
        for (value, cell) in out.0.iter_mut().zip(self.cells.iter()) {
            *value = cell.mean();
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Max,
    Min,
}

/// Running maximum or minimum per calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeBank {
    kind: Extreme,
    values: MonthlyValues,
}

impl ExtremeBank {
    pub fn new(kind: Extreme) -> Self {
        Self {
            kind,
            values: MonthlyValues::absent(),
        }
    }

    /// Replaces the stored extreme of `bin` when `value` beats it.
    /// An absent `value` never clears a stored one.
    pub fn update(&mut self, bin: usize, value: Option<f64>) {
        let Some(value) = value else {
            return;
        };
        let stored = &mut self.values.0[bin];
        let replace = match (*stored, self.kind) {
            (None, _) => true,
            (Some(current), Extreme::Max) => value > current,
            (Some(current), Extreme::Min) => value < current,
        };
        if replace {
            *stored = Some(value);
        }
    }

    pub fn reduce(&self) -> MonthlyValues {
        self.values
    }
}

/// Samples fetched from the archive for one month window.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MonthSamples {
    pub rain_sum: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_mean_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_mean_min: Option<f64>,
}

impl MonthSamples {
    /// The month's mean temperature, `(mean max + mean min) / 2`, if both are known.
    pub fn temp_mean(&self) -> Option<f64> {
        match (self.temp_mean_max, self.temp_mean_min) {
            (Some(high), Some(low)) => Some((high + low) / 2.0),
            _ => None,
        }
    }
}

/// The reduced twelve-month statistics, before unit conversion and rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStats {
    pub rain_avg: MonthlyValues,
    pub temp_mean: MonthlyValues,
    pub temp_max: MonthlyValues,
    pub temp_mean_max: MonthlyValues,
    pub temp_min: MonthlyValues,
    pub temp_mean_min: MonthlyValues,
}

impl MonthlyStats {
    pub fn absent() -> Self {
        AccumulatorBank::new().reduce()
    }
}

/// All six metric families accumulated across every included month window.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatorBank {
    rain: MeanBank,
    temp_mean: MeanBank,
    temp_max: ExtremeBank,
    temp_mean_max: MeanBank,
    temp_min: ExtremeBank,
    temp_mean_min: MeanBank,
}

impl Default for AccumulatorBank {
    fn default() -> Self {
        Self::new()
    }
}

impl AccumulatorBank {
    pub fn new() -> Self {
        Self {
            rain: MeanBank::default(),
            temp_mean: MeanBank::default(),
            temp_max: ExtremeBank::new(Extreme::Max),
            temp_mean_max: MeanBank::default(),
            temp_min: ExtremeBank::new(Extreme::Min),
            temp_mean_min: MeanBank::default(),
        }
    }

    /// Folds one complete month's samples into calendar month `bin` (0 = January).
    pub fn update(&mut self, bin: usize, samples: &MonthSamples) {
        self.rain.accumulate(bin, samples.rain_sum);
        self.temp_mean.accumulate(bin, samples.temp_mean());
        self.temp_max.update(bin, samples.temp_max);
        self.temp_mean_max.accumulate(bin, samples.temp_mean_max);
        self.temp_min.update(bin, samples.temp_min);
        self.temp_mean_min.accumulate(bin, samples.temp_mean_min);
    }

    pub fn reduce(&self) -> MonthlyStats {
        MonthlyStats {
            rain_avg: self.rain.reduce(),
            temp_mean: self.temp_mean.reduce(),
            temp_max: self.temp_max.reduce(),
            temp_mean_max: self.temp_mean_max.reduce(),
            temp_min: self.temp_min.reduce(),
            temp_mean_min: self.temp_mean_min.reduce(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_samples(rain: f64, max: f64, mean_max: f64, min: f64, mean_min: f64) -> MonthSamples {
        MonthSamples {
            rain_sum: Some(rain),
            temp_max: Some(max),
            temp_mean_max: Some(mean_max),
            temp_min: Some(min),
            temp_mean_min: Some(mean_min),
        }
    }

    #[test]
    fn test_cell_distinguishes_zero_total_from_empty() {
        let mut cell = AccumulatorCell::default();
        assert_eq!(cell.mean(), None);
        assert_eq!(cell.total(), None);

        cell.add(0.0);
        assert_eq!(cell.total(), Some(0.0));
        assert_eq!(cell.count(), 1);
        assert_eq!(cell.mean(), Some(0.0));
    }

    #[test]
    fn test_mean_bank_averages_over_contributing_years() {
        let mut bank = MeanBank::default();
        bank.accumulate(3, Some(10.0));
        bank.accumulate(3, None);
        bank.accumulate(3, Some(20.0));
        bank.accumulate(3, Some(45.0));
        assert_eq!(bank.cell(3).count(), 3);

        let reduced = bank.reduce();
        assert_eq!(reduced[3], Some(25.0));
        assert_eq!(reduced[2], None);
    }

    #[test]
    fn test_zero_rain_months_still_count() {
        let mut bank = MeanBank::default();
        bank.accumulate(0, Some(0.0));
        bank.accumulate(0, Some(30.0));
        assert_eq!(bank.reduce()[0], Some(15.0));
    }

    #[test]
    fn test_extreme_bank_tracks_true_extremes() {
        let mut max = ExtremeBank::new(Extreme::Max);
        let mut min = ExtremeBank::new(Extreme::Min);
        for v in [3.0, -2.0, 11.5, 7.0] {
            max.update(6, Some(v));
            min.update(6, Some(v));
        }
        assert_eq!(max.reduce()[6], Some(11.5));
        assert_eq!(min.reduce()[6], Some(-2.0));
        assert_eq!(max.reduce()[7], None);
    }

    #[test]
    fn test_absent_sample_never_clears_an_extreme() {
        let mut max = ExtremeBank::new(Extreme::Max);
        max.update(0, None);
        assert_eq!(max.reduce()[0], None);
        max.update(0, Some(-5.0));
        max.update(0, None);
        assert_eq!(max.reduce()[0], Some(-5.0));
    }

    #[test]
    fn test_mean_temp_needs_both_means() {
        let mut bank = AccumulatorBank::new();
        bank.update(
            4,
            &MonthSamples {
                temp_mean_max: Some(20.0),
                ..Default::default()
            },
        );
        let stats = bank.reduce();
        assert_eq!(stats.temp_mean[4], None);
        assert_eq!(stats.temp_mean_max[4], Some(20.0));
        assert_eq!(stats.temp_mean_min[4], None);
    }

    #[test]
    fn test_missing_max_still_feeds_other_families() {
        let mut bank = AccumulatorBank::new();
        bank.update(8, &full_samples(40.0, 25.0, 20.0, 5.0, 10.0));
        bank.update(
            8,
            &MonthSamples {
                temp_max: None,
                ..full_samples(60.0, 99.0, 22.0, 3.0, 12.0)
            },
        );
        let stats = bank.reduce();
        assert_eq!(stats.temp_max[8], Some(25.0));
        assert_eq!(stats.temp_min[8], Some(3.0));
        assert_eq!(stats.temp_mean_max[8], Some(21.0));
        assert_eq!(stats.temp_mean_min[8], Some(11.0));
        assert_eq!(stats.temp_mean[8], Some(16.0));
        assert_eq!(stats.rain_avg[8], Some(50.0));
    }

    #[test]
    fn test_empty_bank_reduces_to_absent() {
        let stats = MonthlyStats::absent();
        for values in [
            stats.rain_avg,
            stats.temp_mean,
            stats.temp_max,
            stats.temp_mean_max,
            stats.temp_min,
            stats.temp_mean_min,
        ] {
            assert_eq!(values.count_present(), 0);
        }
    }
}
