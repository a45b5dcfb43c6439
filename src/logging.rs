use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Log to stderr so report output on stdout stays clean.
///
/// `RUST_LOG` wins when set; otherwise this crate logs at `info`.
pub fn enable_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info",
            env!("CARGO_PKG_NAME").replace('-', "_")
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("could not initialize logging: {}", e))?;
    Ok(())
}
