// Writing progress metrics derived from a daily cumulative word count log.
//
// The pipeline runs raw table -> `deltas` -> `aggregate` / `metrics`, with
// `loader` and `output` at either end.

pub mod aggregate;
pub mod calendar;
pub mod columns;
pub mod config;
pub mod deltas;
pub mod error;
pub mod loader;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod types;
pub mod util;

pub use aggregate::{cumulative_words_written, net_cumulative_words_written, weekday_words_written};
pub use calendar::{get_weekday, select_weekday, weekday_to_int, weekday_to_string, WeekdayRef};
pub use columns::{progress_columns, project_goal_pairs};
pub use config::{Config, TOTAL};
pub use deltas::{net_words_written, words_written};
pub use error::{MetricsError, Result};
pub use metrics::{
    all_non_cumulative_metrics, non_cumulative_metrics, range_metrics, AllMetrics, MetricsOptions,
    WeekdayReports,
};
pub use types::{DerivedSeries, MetricsReport, Table, WordCountTable};
