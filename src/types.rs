use crate::error::{MetricsError, Result};
use serde::Serialize;

/// A named numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column<T> {
    pub name: String,
    pub values: Vec<T>,
}

/// Date-indexed table with an ordered, open-ended set of columns.
///
/// The index holds the raw date strings as they appear in the input; rows keep
/// their input order and are never re-sorted or de-duplicated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table<T> {
    index: Vec<String>,
    columns: Vec<Column<T>>,
}

/// Raw cumulative counts and goals as loaded from disk.
pub type WordCountTable = Table<f64>;

/// Words written, net words written and their cumulative forms.
pub type DerivedSeries = Table<i64>;

impl<T: Copy> Table<T> {
    pub fn new(index: Vec<String>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&[T]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Like [`Table::column`] but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<&[T]> {
        self.column(name)
            .ok_or_else(|| MetricsError::MissingColumn(name.to_string()))
    }

    /// Insert a column, replacing any existing column with the same name in
    /// place so the column order is stable.
    pub fn set_column(&mut self, name: &str, values: Vec<T>) -> Result<()> {
        if values.len() != self.index.len() {
            return Err(MetricsError::Configuration(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.index.len()
            )));
        }
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.values = values,
            None => self.columns.push(Column {
                name: name.to_string(),
                values,
            }),
        }
        Ok(())
    }

    /// New table holding only `names`, in that order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table<T>> {
        let mut out = Table::new(self.index.clone());
        for name in names {
            let name = name.as_ref();
            out.columns.push(Column {
                name: name.to_string(),
                values: self.require(name)?.to_vec(),
            });
        }
        Ok(out)
    }

    /// Keep the rows whose mask entry is `true`.
    pub fn filter_rows(&self, mask: &[bool]) -> Table<T> {
        let keep = |i: usize| mask.get(i).copied().unwrap_or(false);
        let index = self
            .index
            .iter()
            .enumerate()
            .filter(|(i, _)| keep(*i))
            .map(|(_, d)| d.clone())
            .collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: c
                    .values
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| keep(*i))
                    .map(|(_, v)| *v)
                    .collect(),
            })
            .collect();
        Table { index, columns }
    }

    /// Apply `f` to every value of every column.
    pub fn map_values<U: Copy>(&self, f: impl Fn(T) -> U) -> Table<U> {
        Table {
            index: self.index.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values.iter().map(|v| f(*v)).collect(),
                })
                .collect(),
        }
    }
}

/// Ordered metric name -> one value per column.
///
/// Counts are stored as `f64` alongside the statistics; a metric with no
/// qualifying observations for a column is `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    columns: Vec<String>,
    metrics: Vec<MetricRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub name: String,
    pub values: Vec<f64>,
}

impl MetricsReport {
    pub(crate) fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            metrics: Vec::new(),
        }
    }

    /// Set a metric, keeping the position of an existing entry.
    pub(crate) fn insert(&mut self, name: &str, values: Vec<f64>) {
        match self.metrics.iter_mut().find(|m| m.name == name) {
            Some(row) => row.values = values,
            None => self.metrics.push(MetricRow {
                name: name.to_string(),
                values,
            }),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Metric names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.name.as_str())
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.metrics
    }

    pub fn get(&self, metric: &str) -> Option<&[f64]> {
        self.metrics
            .iter()
            .find(|m| m.name == metric)
            .map(|m| m.values.as_slice())
    }

    pub fn value(&self, metric: &str, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.get(metric).and_then(|v| v.get(idx).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table<i64> {
        let mut t = Table::new(vec!["a".into(), "b".into(), "c".into()]);
        t.set_column("x", vec![1, 2, 3]).unwrap();
        t.set_column("y", vec![4, 5, 6]).unwrap();
        t
    }

    #[test]
    fn set_column_replaces_in_place() {
        let mut t = sample();
        t.set_column("x", vec![7, 8, 9]).unwrap();
        assert_eq!(t.column_names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(t.column("x").unwrap(), &[7, 8, 9]);
    }

    #[test]
    fn set_column_rejects_wrong_length() {
        let mut t = sample();
        assert!(t.set_column("z", vec![1]).is_err());
    }

    #[test]
    fn select_reorders_and_reports_missing() {
        let t = sample();
        let s = t.select(&["y", "x"]).unwrap();
        assert_eq!(s.column_names().collect::<Vec<_>>(), vec!["y", "x"]);
        let err = t.select(&["nope"]).unwrap_err();
        assert!(matches!(err, MetricsError::MissingColumn(c) if c == "nope"));
    }

    #[test]
    fn filter_rows_keeps_index_aligned() {
        let t = sample().filter_rows(&[true, false, true]);
        assert_eq!(t.index(), &["a".to_string(), "c".to_string()]);
        assert_eq!(t.column("y").unwrap(), &[4, 6]);
    }

    #[test]
    fn report_insert_keeps_order() {
        let mut r = MetricsReport::new(vec!["A".into()]);
        r.insert("first", vec![1.0]);
        r.insert("second", vec![2.0]);
        r.insert("first", vec![3.0]);
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(r.value("first", "A"), Some(3.0));
        assert_eq!(r.value("first", "B"), None);
    }
}
