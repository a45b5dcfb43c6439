// Summary statistics over words written and net words written.
//
// Every report is computed column by column from a fresh derived series. A
// weekday filter is applied after the daily values are derived, so a Monday's
// words are still measured against the row before it, whatever day that is.

use crate::calendar::{select_weekday, WeekdayRef, WEEKDAYS};
use crate::columns::project_goal_pairs;
use crate::config::{Config, TOTAL};
use crate::deltas::{net_words_written, truncate, words_written};
use crate::error::{MetricsError, Result};
use crate::types::{DerivedSeries, MetricsReport, WordCountTable};
use crate::util::{max, mean, median, min, std_dev};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

pub const MEAN: &str = "Mean Words/Day";
pub const MEDIAN: &str = "Median Words/Day";
pub const STD_DEV: &str = "Standard Deviation Words/Day";
pub const HIGHEST: &str = "Highest Word Count";
pub const LOWEST: &str = "Lowest Word Count";
pub const LOWEST_WITH_WRITING: &str = "Lowest Word Count (With Some Writing)";
pub const SKIPPED_DAYS: &str = "Skipped Days";
pub const NEGATIVE_DAYS: &str = "Negative Days";
pub const POSITIVE_DAYS: &str = "Positive Days";

#[derive(Debug, Clone, Default)]
pub struct MetricsOptions {
    /// Measure against goals instead of raw words written.
    pub net: bool,
    /// Columns to report on; defaults depend on `net`.
    pub columns: Option<Vec<String>>,
    /// Only pair `Total` with the essential goal.
    pub total_only: bool,
    pub weekday: Option<WeekdayRef>,
}

impl MetricsOptions {
    pub fn net() -> Self {
        Self {
            net: true,
            ..Self::default()
        }
    }

    pub fn on(&self, weekday: impl Into<WeekdayRef>) -> Self {
        Self {
            weekday: Some(weekday.into()),
            ..self.clone()
        }
    }
}

fn resolve_columns(
    table: &WordCountTable,
    config: &Config,
    options: &MetricsOptions,
) -> Result<Vec<String>> {
    if let Some(columns) = &options.columns {
        return Ok(columns.clone());
    }
    let mut columns: Vec<String> = if options.net {
        let (projects, _) = project_goal_pairs(config, options.total_only)?;
        projects
            .into_iter()
            .filter(|p| p != TOTAL && table.has_column(p))
            .collect()
    } else {
        config.project_columns.clone()
    };
    columns.push(TOTAL.to_string());
    Ok(columns)
}

fn derived_values(
    table: &WordCountTable,
    config: &Config,
    options: &MetricsOptions,
) -> Result<DerivedSeries> {
    if options.net {
        net_words_written(table, config, options.total_only)
    } else {
        words_written(table, config)
    }
}

/// Metrics over every row of `table`, ignoring `options.weekday`.
pub fn range_metrics(
    table: &WordCountTable,
    config: &Config,
    options: &MetricsOptions,
) -> Result<MetricsReport> {
    let columns = resolve_columns(table, config, options)?;
    let values = derived_values(table, config, options)?;
    summarize(&values.select(columns.as_slice())?, table, config, options)
}

/// Metrics for the requested slice of `table`.
///
/// Returns `Ok(None)` when a weekday is requested and no row falls on it.
pub fn non_cumulative_metrics(
    table: &WordCountTable,
    config: &Config,
    options: &MetricsOptions,
) -> Result<Option<MetricsReport>> {
    let Some(weekday) = options.weekday.clone() else {
        return range_metrics(table, config, options).map(Some);
    };

    let columns = resolve_columns(table, config, options)?;
    let values = derived_values(table, config, options)?;
    let values = select_weekday(&values, weekday.clone(), &config.date_format)?;
    if values.is_empty() {
        debug!(?weekday, net = options.net, "no rows for weekday");
        return Ok(None);
    }
    let source = select_weekday(table, weekday, &config.date_format)?;
    summarize(&values.select(columns.as_slice())?, &source, config, options).map(Some)
}

/// Raw goal values for each column of a net series, looked up in `source`.
///
/// These are the untruncated source values; callers that compare against the
/// net series itself must truncate them the way `words_written` does.
fn goals_for<'a>(
    values: &DerivedSeries,
    source: &'a WordCountTable,
    config: &Config,
    total_only: bool,
) -> Result<Vec<&'a [f64]>> {
    let (projects, goals) = project_goal_pairs(config, total_only)?;
    values
        .column_names()
        .map(|name| {
            let goal = projects
                .iter()
                .position(|p| p == name)
                .map(|i| &goals[i])
                .ok_or_else(|| {
                    MetricsError::Configuration(format!("no goal column configured for '{}'", name))
                })?;
            source.require(goal)
        })
        .collect()
}

fn count(values: &[f64], pred: impl Fn(usize, f64) -> bool) -> f64 {
    values
        .iter()
        .enumerate()
        .filter(|(i, v)| pred(*i, **v))
        .count() as f64
}

fn summarize(
    values: &DerivedSeries,
    source: &WordCountTable,
    config: &Config,
    options: &MetricsOptions,
) -> Result<MetricsReport> {
    let columns: Vec<Vec<f64>> = values
        .columns()
        .iter()
        .map(|c| c.values.iter().map(|v| *v as f64).collect())
        .collect();
    let per_column = |f: &dyn Fn(usize, &[f64]) -> f64| -> Vec<f64> {
        columns.iter().enumerate().map(|(i, c)| f(i, c.as_slice())).collect()
    };

    let mut report = MetricsReport::new(values.column_names().map(str::to_string).collect());
    report.insert(MEAN, per_column(&|_, c| mean(c)));
    report.insert(MEDIAN, per_column(&|_, c| median(c.to_vec())));
    report.insert(STD_DEV, per_column(&|_, c| std_dev(c)));
    report.insert(HIGHEST, per_column(&|_, c| max(c.iter().copied())));
    report.insert(LOWEST, per_column(&|_, c| min(c.iter().copied())));

    if options.net {
        let goals = goals_for(values, source, config, options.total_only)?;
        // A day at exactly -goal is a day with no words at all. The net series
        // was built from truncated goals, so the mask is too.
        report.insert(
            LOWEST_WITH_WRITING,
            per_column(&|i, c| {
                let goal = goals[i];
                min(c
                    .iter()
                    .enumerate()
                    .filter(|(r, v)| **v != -(truncate(goal[*r]) as f64))
                    .map(|(_, v)| *v))
            }),
        );
        // Compares against the goal itself, not its negation.
        report.insert(
            SKIPPED_DAYS,
            per_column(&|i, c| count(c, |r, v| v > goals[i][r])),
        );
        report.insert(NEGATIVE_DAYS, per_column(&|_, c| count(c, |_, v| v < 0.0)));
        report.insert(POSITIVE_DAYS, per_column(&|_, c| count(c, |_, v| v > 0.0)));
    } else {
        report.insert(
            LOWEST_WITH_WRITING,
            per_column(&|_, c| min(c.iter().copied().filter(|v| *v != 0.0))),
        );
        report.insert(SKIPPED_DAYS, per_column(&|_, c| count(c, |_, v| v == 0.0)));
    }

    debug!(
        rows = values.len(),
        columns = report.columns().len(),
        net = options.net,
        "computed metrics"
    );
    Ok(report)
}

/// Per-weekday reports, always holding all seven days Monday first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekdayReports {
    entries: Vec<(String, Option<MetricsReport>)>,
}

impl WeekdayReports {
    pub fn get(&self, weekday: &str) -> Option<&MetricsReport> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(weekday))
            .and_then(|(_, report)| report.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&MetricsReport>)> {
        self.entries
            .iter()
            .map(|(name, report)| (name.as_str(), report.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for WeekdayReports {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, report) in &self.entries {
            map.serialize_entry(name, report)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AllMetrics {
    pub standard: MetricsReport,
    pub net: MetricsReport,
    pub standard_by_weekday: WeekdayReports,
    pub net_by_weekday: WeekdayReports,
}

/// Standard and net metrics over the whole table and for each weekday.
pub fn all_non_cumulative_metrics(
    table: &WordCountTable,
    config: &Config,
    columns: Option<&[String]>,
) -> Result<AllMetrics> {
    let standard_options = MetricsOptions {
        columns: columns.map(<[String]>::to_vec),
        ..MetricsOptions::default()
    };
    let net_options = MetricsOptions {
        net: true,
        ..standard_options.clone()
    };

    let standard = range_metrics(table, config, &standard_options)?;
    let net = range_metrics(table, config, &net_options)?;

    let mut standard_by_weekday = WeekdayReports::default();
    let mut net_by_weekday = WeekdayReports::default();
    for (ordinal, name) in (0u32..).zip(WEEKDAYS) {
        standard_by_weekday.entries.push((
            name.to_string(),
            non_cumulative_metrics(table, config, &standard_options.on(ordinal))?,
        ));
        net_by_weekday.entries.push((
            name.to_string(),
            non_cumulative_metrics(table, config, &net_options.on(ordinal))?,
        ));
    }

    Ok(AllMetrics {
        standard,
        net,
        standard_by_weekday,
        net_by_weekday,
    })
}
