// Per-day words written, derived from cumulative counts.
use crate::columns::project_goal_pairs;
use crate::config::{Config, TOTAL};
use crate::error::Result;
use crate::types::{DerivedSeries, Table, WordCountTable};
use tracing::debug;

/// Whole words, truncated toward zero.
pub(crate) fn truncate(v: f64) -> i64 {
    v.trunc() as i64
}

/// Difference against the previous row; the first row has no baseline and is 0.
fn row_deltas(counts: &[f64]) -> Vec<f64> {
    counts
        .iter()
        .enumerate()
        .map(|(i, v)| if i == 0 { 0.0 } else { v - counts[i - 1] })
        .collect()
}

/// Words written per day for every project, the goal columns as given and a
/// `Total` column summing the projects.
///
/// Rows are differenced against whatever row precedes them, so a gap in the
/// dates is not spread out and a drop in the cumulative count shows up as a
/// negative day.
pub fn words_written(table: &WordCountTable, config: &Config) -> Result<DerivedSeries> {
    let (_, goals) = project_goal_pairs(config, false)?;
    let mut out = Table::new(table.index().to_vec());
    let mut total = vec![0.0_f64; table.len()];

    for project in &config.project_columns {
        let deltas = row_deltas(table.require(project)?);
        for (t, d) in total.iter_mut().zip(&deltas) {
            *t += d;
        }
        out.set_column(project, deltas.into_iter().map(truncate).collect())?;
    }
    for goal in &goals {
        let values = table.require(goal)?;
        out.set_column(goal, values.iter().copied().map(truncate).collect())?;
    }
    out.set_column(TOTAL, total.into_iter().map(truncate).collect())?;

    debug!(
        rows = out.len(),
        projects = config.project_columns.len(),
        goals = goals.len(),
        "computed words written"
    );
    Ok(out)
}

/// `series[project] - series[goal]` for each resolved pair, named after the project.
pub(crate) fn against_goals(
    series: &DerivedSeries,
    projects: &[String],
    goals: &[String],
) -> Result<DerivedSeries> {
    let mut out = Table::new(series.index().to_vec());
    for (project, goal) in projects.iter().zip(goals) {
        let values = series.require(project)?;
        let targets = series.require(goal)?;
        let net = values.iter().zip(targets).map(|(v, g)| v.saturating_sub(*g)).collect();
        out.set_column(project, net)?;
    }
    Ok(out)
}

/// Words written minus the goal each project (and `Total`) is held to.
pub fn net_words_written(
    table: &WordCountTable,
    config: &Config,
    total_only: bool,
) -> Result<DerivedSeries> {
    let written = words_written(table, config)?;
    let (projects, goals) = project_goal_pairs(config, total_only)?;
    against_goals(&written, &projects, &goals)
}
