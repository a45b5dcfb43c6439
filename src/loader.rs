use crate::config::Config;
use crate::error::{MetricsError, Result};
use crate::types::WordCountTable;
use crate::util::parse_f64_safe;
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_columns: usize,
    pub ignored_columns: usize,
    pub duplicate_dates: usize,
}

/// Load a word count CSV. The first column is the date index; only the
/// columns the configuration refers to are parsed as numbers.
pub fn load_word_counts<P: AsRef<Path>>(
    path: P,
    config: &Config,
) -> Result<(WordCountTable, LoadReport)> {
    let path = path.as_ref();
    let rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let (table, report) = read_table(rdr, config)?;
    info!(
        path = %path.display(),
        rows = report.total_rows,
        columns = report.loaded_columns,
        "loaded word counts"
    );
    Ok((table, report))
}

/// Same as [`load_word_counts`] for CSV text already in memory.
pub fn parse_word_counts(text: &str, config: &Config) -> Result<(WordCountTable, LoadReport)> {
    let rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    read_table(rdr, config)
}

fn read_table<R: Read>(
    mut rdr: csv::Reader<R>,
    config: &Config,
) -> Result<(WordCountTable, LoadReport)> {
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut wanted: Vec<String> = config.project_columns.clone();
    for goal in config.goal_labels() {
        if !wanted.contains(&goal) {
            wanted.push(goal);
        }
    }
    // Position 0 is the index, so data columns start at 1.
    let positions: Vec<usize> = wanted
        .iter()
        .map(|name| {
            headers
                .iter()
                .skip(1)
                .position(|h| h == name)
                .map(|p| p + 1)
                .ok_or_else(|| MetricsError::MissingColumn(name.clone()))
        })
        .collect::<Result<_>>()?;

    let mut dates: Vec<String> = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); wanted.len()];
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        dates.push(record.get(0).unwrap_or_default().trim().to_string());
        for (col, pos) in positions.iter().enumerate() {
            let cell = record.get(*pos);
            let v = parse_f64_safe(cell).ok_or_else(|| MetricsError::InvalidNumber {
                column: wanted[col].clone(),
                row: row + 1,
                value: cell.unwrap_or_default().to_string(),
            })?;
            values[col].push(v);
        }
    }

    let mut seen = HashSet::new();
    let duplicate_dates = dates.iter().filter(|d| !seen.insert(d.as_str())).count();
    if duplicate_dates > 0 {
        warn!(duplicate_dates, "word count file repeats dates; rows are kept as given");
    }

    let mut table = WordCountTable::new(dates);
    for (name, column) in wanted.iter().zip(values) {
        table.set_column(name, column)?;
    }

    let report = LoadReport {
        total_rows: table.len(),
        loaded_columns: wanted.len(),
        ignored_columns: headers.len().saturating_sub(1 + wanted.len()),
        duplicate_dates,
    };
    Ok((table, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config() -> Config {
        let mut cfg = Config::default();
        cfg.add_project("Book 1");
        cfg.add_project("Book 2");
        cfg.set_subgoal("Book 1", "Book 1 Goal");
        cfg
    }

    const CSV: &str = "\
Date,Book 1,Book 2,Goal,Book 1 Goal,Notes
01/01/24,\"1,000\",0,500,250,started
01/02/24,1250,300,500,250,
01/02/24,1500,300,500,250,oops
";

    #[test]
    fn loads_referenced_columns_only() {
        let (t, report) = parse_word_counts(CSV, &config()).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(
            t.column_names().collect::<Vec<_>>(),
            vec!["Book 1", "Book 2", "Book 1 Goal", "Goal"]
        );
        assert_eq!(t.column("Book 1").unwrap(), &[1000.0, 1250.0, 1500.0]);
        assert!(!t.has_column("Notes"));
        assert_eq!(report.ignored_columns, 1);
        assert_eq!(report.duplicate_dates, 1);
    }

    #[test]
    fn missing_header_is_reported() {
        let mut cfg = config();
        cfg.add_project("Book 3");
        let err = parse_word_counts(CSV, &cfg).unwrap_err();
        assert!(matches!(err, MetricsError::MissingColumn(c) if c == "Book 3"));
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let csv = "Date,Book 1,Book 2,Goal,Book 1 Goal\n01/01/24,abc,0,500,250\n";
        let err = parse_word_counts(csv, &config()).unwrap_err();
        assert!(matches!(
            err,
            MetricsError::InvalidNumber { column, row: 1, .. } if column == "Book 1"
        ));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let (t, _) = load_word_counts(file.path(), &config()).unwrap();
        assert_eq!(t.index()[0], "01/01/24");
    }
}
