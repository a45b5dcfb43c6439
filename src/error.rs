// Error types shared by the loader and the metrics engine.

pub type Result<T> = std::result::Result<T, MetricsError>;

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// A date string did not match the configured `date_format`.
    #[error("could not parse date '{value}' with format '{format}'")]
    Parse { value: String, format: String },

    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Essential alias not mapped, unknown weekday, or a column without a goal.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid number '{value}' in column '{column}' at row {row}")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
