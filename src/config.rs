// Column naming configuration supplied by the caller.
//
// Every engine function takes a `&Config` instead of reading shared state, so
// two tables with different layouts can be processed side by side.
use crate::error::{MetricsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DATE_KEY: &str = "Date";
pub const GOAL_KEY: &str = "Goal";
pub const TOTAL: &str = "Total";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logical name (`Date`, `Goal`) to the label used in the table.
    pub essential_columns: HashMap<String, String>,
    /// Cumulative word count columns, one per tracked project.
    pub project_columns: Vec<String>,
    /// Project column to the column holding that project's own goal.
    pub subgoal_columns: HashMap<String, String>,
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        let essential_columns = HashMap::from([
            (DATE_KEY.to_string(), DATE_KEY.to_string()),
            (GOAL_KEY.to_string(), GOAL_KEY.to_string()),
        ]);
        Self {
            essential_columns,
            project_columns: Vec::new(),
            subgoal_columns: HashMap::new(),
            date_format: "%m/%d/%y".to_string(),
        }
    }
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    pub fn date_column(&self) -> Result<&str> {
        self.essential(DATE_KEY)
    }

    pub fn goal_column(&self) -> Result<&str> {
        self.essential(GOAL_KEY)
    }

    fn essential(&self, key: &str) -> Result<&str> {
        self.essential_columns
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| {
                MetricsError::Configuration(format!("no column mapped for essential name '{}'", key))
            })
    }

    /// Track a new project column. Adding a name twice is a no-op.
    pub fn add_project(&mut self, name: &str) {
        if !self.project_columns.iter().any(|p| p == name) {
            self.project_columns.push(name.to_string());
        }
    }

    pub fn set_subgoal(&mut self, project: &str, goal_column: &str) {
        self.subgoal_columns
            .insert(project.to_string(), goal_column.to_string());
    }

    /// Every goal label the configuration knows about: subgoals first, in
    /// project order, then the essential goal when it is mapped.
    pub fn goal_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .project_columns
            .iter()
            .filter_map(|p| self.subgoal_columns.get(p).cloned())
            .collect();
        if let Ok(goal) = self.goal_column() {
            labels.push(goal.to_string());
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_plain_layout() {
        let cfg = Config::default();
        assert_eq!(cfg.date_column().unwrap(), "Date");
        assert_eq!(cfg.goal_column().unwrap(), "Goal");
        assert_eq!(cfg.date_format, "%m/%d/%y");
        assert!(cfg.project_columns.is_empty());
    }

    #[test]
    fn missing_essential_is_configuration_error() {
        let mut cfg = Config::default();
        cfg.essential_columns.remove("Goal");
        let err = cfg.goal_column().unwrap_err();
        assert!(matches!(err, MetricsError::Configuration(_)));
    }

    #[test]
    fn json_fills_defaults() {
        let cfg = Config::from_json_str(
            r#"{"project_columns": ["Book 1", "Book 2"], "subgoal_columns": {"Book 1": "Book 1 Goal"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.project_columns, vec!["Book 1", "Book 2"]);
        assert_eq!(cfg.date_format, "%m/%d/%y");
        assert_eq!(cfg.goal_labels(), vec!["Book 1 Goal", "Goal"]);
    }

    #[test]
    fn add_project_ignores_duplicates() {
        let mut cfg = Config::default();
        cfg.add_project("Book");
        cfg.add_project("Book");
        assert_eq!(cfg.project_columns, vec!["Book"]);
    }
}
