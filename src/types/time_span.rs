use chrono::{DateTime, Utc};
use std::fmt;
use std::fmt::{Display, Formatter};

/// An interval `[start, stop)` of epoch timestamps, in seconds.
///
/// Construction keeps `start <= stop`; a reversed pair is swapped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimeSpan {
    start: i64,
    stop: i64,
}

impl TimeSpan {
    pub fn new(start: i64, stop: i64) -> Self {
        if start <= stop {
            Self { start, stop }
        } else {
            Self {
                start: stop,
                stop: start,
            }
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }
}

impl Display for TimeSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let fmt_ts = |ts: i64| {
            DateTime::<Utc>::from_timestamp(ts, 0)
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| ts.to_string())
        };
        write!(f, "[{} -> {})", fmt_ts(self.start), fmt_ts(self.stop))
    }
}
