use crate::error::Result;
use crate::types::{MetricsReport, Table};
use crate::util::format_number;
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

/// Write a derived series with the date index as the first column.
pub fn write_series_csv<T, P>(path: P, table: &Table<T>, index_label: &str) -> Result<()>
where
    T: Copy + Display,
    P: AsRef<Path>,
{
    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec![index_label.to_string()];
    header.extend(table.column_names().map(str::to_string));
    wtr.write_record(&header)?;
    for (row, date) in table.index().iter().enumerate() {
        let mut record = vec![date.clone()];
        record.extend(table.columns().iter().map(|c| c.values[row].to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Markdown table with one row per metric and one column per project.
pub fn metrics_table(report: &MetricsReport) -> String {
    let mut builder = Builder::default();
    let mut header = vec!["Metric".to_string()];
    header.extend(report.columns().iter().cloned());
    builder.push_record(header);
    for row in report.rows() {
        let mut record = vec![row.name.clone()];
        record.extend(row.values.iter().map(|v| format_number(*v, 2)));
        builder.push_record(record);
    }
    builder.build().with(Style::markdown()).to_string()
}

/// Markdown preview of the first `max_rows` rows of a series.
pub fn series_table<T>(table: &Table<T>, index_label: &str, max_rows: usize) -> String
where
    T: Copy + Display,
{
    if table.is_empty() {
        return "(no rows)".to_string();
    }
    let mut builder = Builder::default();
    let mut header = vec![index_label.to_string()];
    header.extend(table.column_names().map(str::to_string));
    builder.push_record(header);
    for (row, date) in table.index().iter().enumerate().take(max_rows) {
        let mut record = vec![date.clone()];
        record.extend(table.columns().iter().map(|c| c.values[row].to_string()));
        builder.push_record(record);
    }
    builder.build().with(Style::markdown()).to_string()
}
