//! The query contract the aggregator consumes, and a polars-backed implementation.

pub mod error;
pub mod frame_archive;
mod loader;

use crate::types::record::Record;
use crate::types::time_span::TimeSpan;
use crate::types::value_tuple::{AggregateType, ObsType, ValueTuple};
use error::ArchiveError;

#[cfg(test)]
use mockall::automock;

/// Read access to a time-ordered store of weather records.
///
/// Implementations answer with `None` / absent values when there is no data;
/// errors are reserved for failures of the store itself.
#[cfg_attr(test, automock)]
pub trait Archive {
    /// The record at, or the latest one before, `timestamp`.
    fn get_record(&self, timestamp: i64) -> Result<Option<Record>, ArchiveError>;

    /// Timestamp of the earliest record in the archive.
    fn first_good_stamp(&self) -> Result<Option<i64>, ArchiveError>;

    /// Computes `aggregate` of `obs_type` over the records inside `span`.
    fn get_aggregate(
        &self,
        span: TimeSpan,
        obs_type: ObsType,
        aggregate: AggregateType,
    ) -> Result<ValueTuple, ArchiveError>;
}

impl<T: Archive + ?Sized> Archive for &T {
    fn get_record(&self, timestamp: i64) -> Result<Option<Record>, ArchiveError> {
        (**self).get_record(timestamp)
    }

    fn first_good_stamp(&self) -> Result<Option<i64>, ArchiveError> {
        (**self).first_good_stamp()
    }

    fn get_aggregate(
        &self,
        span: TimeSpan,
        obs_type: ObsType,
        aggregate: AggregateType,
    ) -> Result<ValueTuple, ArchiveError> {
        (**self).get_aggregate(span, obs_type, aggregate)
    }
}
