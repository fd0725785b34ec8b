mod aggregator;
mod archive;
mod config;
mod error;
mod months;
mod types;
mod units;

pub use error::AveragesError;

pub use aggregator::accumulator::{
    AccumulatorBank, AccumulatorCell, Extreme, ExtremeBank, MeanBank, MonthSamples, MonthlyStats,
};
pub use aggregator::formatter::*;
pub use aggregator::month_averages::*;

pub use archive::error::ArchiveError;
pub use archive::frame_archive::FrameArchive;
pub use archive::Archive;

pub use config::{ConfigError, Groups, UnitsConfig};

pub use months::boundary::BoundaryFilter;
pub use months::month_spans::*;

pub use types::month::{Month, MONTHS_PER_YEAR};
pub use types::monthly_values::MonthlyValues;
pub use types::record::Record;
pub use types::time_span::TimeSpan;
pub use types::time_zone::{ParseStationZoneError, StationZone};
pub use types::value_tuple::{AggregateType, ObsType, ValueTuple};

pub use units::{resolve_unit, Converter, Unit, UnitError, UnitGroup, UnitSystem};
