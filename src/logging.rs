//! Logging setup.
//!
//! The terminal belongs to the viewer, so log records go to a file in the
//! temp directory instead of stderr. Logging stays off unless `-v` is given
//! or `PAIRVIEW_LOG` holds a filter (same syntax as `RUST_LOG`).

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;

/// Environment variable holding an `env_logger` filter.
pub const LOG_ENV: &str = "PAIRVIEW_LOG";

/// Maps the `-v` count to a level.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Builds a fresh log file path, e.g. `/tmp/pairview-3f9a12c4.log`.
pub fn log_file_path() -> PathBuf {
    let suffix: u32 = rand::random();
    std::env::temp_dir().join(format!("pairview-{:08x}.log", suffix))
}

/// Installs the global logger. Returns the log file path when logging is on.
pub fn init(verbose: u8) -> Result<Option<PathBuf>> {
    let env_filter = std::env::var(LOG_ENV).ok();
    if verbose == 0 && env_filter.is_none() {
        return Ok(None);
    }

    let path = log_file_path();
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbose))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)));
    if let Some(filter) = env_filter {
        builder.parse_filters(&filter);
    }
    builder
        .try_init()
        .context("Failed to install logger")?;

    log::info!("pairview {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Off);
        assert_eq!(level_for_verbosity(1), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(5), LevelFilter::Trace);
    }

    #[test]
    fn test_log_file_path() {
        let path = log_file_path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("pairview-"));
        assert!(name.ends_with(".log"));
        assert_eq!(path.parent().unwrap(), std::env::temp_dir());
    }
}
