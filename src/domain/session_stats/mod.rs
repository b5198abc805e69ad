//! Usage: Session analytics queries and aggregation helpers backed by sqlite.

mod bounds;
mod daily;
mod input;
mod summary;
mod types;

pub use daily::daily_series;
pub use summary::summary;
pub use types::{StatsDayRow, StatsSummary};

use bounds::{compute_start_ts, compute_start_ts_last_n_days};
use input::{parse_range, StatsRange};

#[cfg(test)]
use daily::daily_series_query;
#[cfg(test)]
use summary::summary_query;
