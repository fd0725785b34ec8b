use crate::types::month::MONTHS_PER_YEAR;
use serde::Serialize;
use std::ops::Index;

/// Twelve per-calendar-month values, index 0 = January ... 11 = December.
///
/// Each element is either a number or absent. Serializes as a JSON array
/// with `null` for absent months.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct MonthlyValues(pub [Option<f64>; MONTHS_PER_YEAR]);

impl MonthlyValues {
    /// A vector with every month absent.
    pub fn absent() -> Self {
        Self([None; MONTHS_PER_YEAR])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Option<f64>> {
        self.0.iter()
    }

    /// Applies `f` to every present value, preserving absent months.
    pub fn map_present<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64) -> Option<f64>,
    {
        let mut out = self.0;
        for value in out.iter_mut() {
            *value = value.and_then(&mut f);
        }
        Self(out)
    }

    /// Same as [`MonthlyValues::map_present`], for fallible transforms.
    pub fn try_map_present<F, E>(&self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        let mut out = self.0;
        for value in out.iter_mut() {
            *value = value.map(&mut f).transpose()?;
        }
        Ok(Self(out))
    }

    /// Pairs this vector with `other` index for index.
    pub fn zip(&self, other: &MonthlyValues) -> [[Option<f64>; 2]; MONTHS_PER_YEAR] {
        let mut pairs = [[None; 2]; MONTHS_PER_YEAR];
        for (i, pair) in pairs.iter_mut().enumerate() {
            *pair = [self.0[i], other.0[i]];
        }
        pairs
    }

    pub fn count_present(&self) -> usize {
        self.iter().filter(|v| v.is_some()).count()
    }
}

impl Index<usize> for MonthlyValues {
    type Output = Option<f64>;

    fn index(&self, bin: usize) -> &Self::Output {
        &self.0[bin]
    }
}
