// Running totals and weekday groupings of words written.
use crate::calendar::{get_weekday, WEEKDAYS};
use crate::columns::project_goal_pairs;
use crate::config::{Config, TOTAL};
use crate::deltas::{against_goals, words_written};
use crate::error::Result;
use crate::types::{DerivedSeries, Table, WordCountTable};
use tracing::debug;

/// Running sum of words written per column, goals included.
pub fn cumulative_words_written(table: &WordCountTable, config: &Config) -> Result<DerivedSeries> {
    let written = words_written(table, config)?;
    let mut out = Table::new(written.index().to_vec());
    for column in written.columns() {
        let running = column
            .values
            .iter()
            .scan(0_i64, |acc, v| {
                *acc = acc.saturating_add(*v);
                Some(*acc)
            })
            .collect();
        out.set_column(&column.name, running)?;
    }
    Ok(out)
}

/// Cumulative words written minus the cumulative goal, paired like
/// [`crate::deltas::net_words_written`].
pub fn net_cumulative_words_written(
    table: &WordCountTable,
    config: &Config,
    total_only: bool,
) -> Result<DerivedSeries> {
    let cumulative = cumulative_words_written(table, config)?;
    let (projects, goals) = project_goal_pairs(config, total_only)?;
    against_goals(&cumulative, &projects, &goals)
}

/// Sum of each project column (and `Total` when present) per weekday.
///
/// The result is indexed by weekday name and only holds the weekdays that
/// occur in `series`, listed Monday first.
pub fn weekday_words_written(
    series: &DerivedSeries,
    project_columns: &[String],
    date_format: &str,
) -> Result<DerivedSeries> {
    let mut names: Vec<&str> = project_columns
        .iter()
        .map(String::as_str)
        .filter(|p| series.has_column(p))
        .collect();
    if series.has_column(TOTAL) && !names.contains(&TOTAL) {
        names.push(TOTAL);
    }

    let weekdays = get_weekday(series.index(), date_format)?;
    let present: Vec<u32> = (0..7).filter(|d| weekdays.contains(d)).collect();
    let index = present
        .iter()
        .map(|d| WEEKDAYS[*d as usize].to_string())
        .collect();

    let mut out = Table::new(index);
    for name in names {
        let values = series.require(name)?;
        let mut sums = [0_i64; 7];
        for (day, v) in weekdays.iter().zip(values) {
            let sum = &mut sums[*day as usize];
            *sum = sum.saturating_add(*v);
        }
        out.set_column(name, present.iter().map(|d| sums[*d as usize]).collect())?;
    }

    debug!(weekdays = out.len(), columns = out.columns().len(), "grouped by weekday");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (WordCountTable, Config) {
        let mut cfg = Config::default();
        cfg.add_project("A");
        cfg.add_project("B");
        cfg.set_subgoal("A", "A Goal");
        // Monday 1st through Monday 8th of January 2024, with a gap.
        let dates = ["01/01/24", "01/02/24", "01/03/24", "01/08/24"];
        let mut t = Table::new(dates.iter().map(|d| d.to_string()).collect());
        t.set_column("A", vec![0.0, 100.0, 300.0, 350.0]).unwrap();
        t.set_column("B", vec![10.0, 10.0, 40.0, 100.0]).unwrap();
        t.set_column("A Goal", vec![100.0; 4]).unwrap();
        t.set_column("Goal", vec![200.0; 4]).unwrap();
        (t, cfg)
    }

    #[test]
    fn cumulative_sums_every_column() {
        let (t, cfg) = fixture();
        let cum = cumulative_words_written(&t, &cfg).unwrap();
        assert_eq!(cum.column("A").unwrap(), &[0, 100, 300, 350]);
        assert_eq!(cum.column("B").unwrap(), &[0, 0, 30, 90]);
        assert_eq!(cum.column("Total").unwrap(), &[0, 100, 330, 440]);
        assert_eq!(cum.column("Goal").unwrap(), &[200, 400, 600, 800]);
    }

    #[test]
    fn net_cumulative_against_cumulative_goal() {
        let (t, cfg) = fixture();
        let net = net_cumulative_words_written(&t, &cfg, false).unwrap();
        assert_eq!(net.column_names().collect::<Vec<_>>(), vec!["A", "Total"]);
        assert_eq!(net.column("A").unwrap(), &[-100, -100, 0, -50]);
        assert_eq!(net.column("Total").unwrap(), &[-200, -300, -270, -360]);
    }

    #[test]
    fn weekday_sums_only_present_days() {
        let (t, cfg) = fixture();
        let ww = words_written(&t, &cfg).unwrap();
        let by_day = weekday_words_written(&ww, &cfg.project_columns, &cfg.date_format).unwrap();
        assert_eq!(
            by_day.index(),
            &["Monday".to_string(), "Tuesday".to_string(), "Wednesday".to_string()]
        );
        assert_eq!(by_day.column_names().collect::<Vec<_>>(), vec!["A", "B", "Total"]);
        assert_eq!(by_day.column("A").unwrap(), &[50, 100, 200]);
        assert_eq!(by_day.column("Total").unwrap(), &[110, 100, 230]);
        assert!(!by_day.has_column("Goal"));
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let mut cfg = Config::default();
        cfg.add_project("A");
        // Three Mondays.
        let dates = ["01/01/24", "01/08/24", "01/15/24"];
        let mut t = Table::new(dates.iter().map(|d| d.to_string()).collect());
        t.set_column("A", vec![0.0, 1e300, 2e300]).unwrap();
        t.set_column("Goal", vec![0.0; 3]).unwrap();

        let cum = cumulative_words_written(&t, &cfg).unwrap();
        assert_eq!(cum.column("A").unwrap(), &[0, i64::MAX, i64::MAX]);

        let ww = words_written(&t, &cfg).unwrap();
        let by_day = weekday_words_written(&ww, &cfg.project_columns, &cfg.date_format).unwrap();
        assert_eq!(by_day.column("Total").unwrap(), &[i64::MAX]);
    }

    #[test]
    fn weekday_grouping_skips_unknown_projects() {
        let (t, cfg) = fixture();
        let net = crate::deltas::net_words_written(&t, &cfg, false).unwrap();
        let by_day = weekday_words_written(&net, &cfg.project_columns, &cfg.date_format).unwrap();
        assert_eq!(by_day.column_names().collect::<Vec<_>>(), vec!["A", "Total"]);
    }
}
