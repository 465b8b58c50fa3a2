use std::path::Path;

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::persistence::log_dir;

/// Log file prefix for the dashboard
pub const TUI_PREFIX: &str = "tui";
/// Log file prefix for one-shot subcommands
pub const CLI_PREFIX: &str = "cli";

/// Install the global subscriber.
///
/// Logs always go to daily-rotated files under `<data_dir>/logs`. `show_stderr`
/// mirrors them to stderr, which is only safe when the TUI is not drawing.
/// Level comes from `log_level`, then `RUST_LOG`, then `info`.
pub fn enable_logging(
    prefix: &str,
    data_dir: &Path,
    log_level: Option<LevelFilter>,
    show_stderr: bool,
) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(log_dir(data_dir))?;

    let stderr = std::io::stderr.with_filter(move |_| show_stderr);

    let filter = build_filter(log_level, std::env::var("RUST_LOG").ok().as_deref());

    // A second init (tests, repeated calls) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(stderr.and(appender))
        .try_init();

    Ok(())
}

/// Filter for this crate. A bare level is scoped to the crate; a `RUST_LOG`
/// value with its own directives is used as given. Anything unparsable falls
/// back to `info`.
fn build_filter(log_level: Option<LevelFilter>, rust_log: Option<&str>) -> EnvFilter {
    let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
    let directives = match (log_level, rust_log.map(str::trim)) {
        (Some(level), _) => format!("{}={}", crate_target, level),
        (None, Some(value)) if value.contains('=') || value.contains(',') => value.to_string(),
        (None, Some(value)) if !value.is_empty() => format!("{}={}", crate_target, value),
        _ => format!("{}=info", crate_target),
    };

    EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("Ignoring invalid log filter '{}': {}", directives, err);
        EnvFilter::new(format!("{}=info", crate_target))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_log_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        enable_logging(CLI_PREFIX, temp_dir.path(), Some(LevelFilter::DEBUG), false).unwrap();
        assert!(log_dir(temp_dir.path()).is_dir());
    }

    #[test]
    fn test_filter_from_bare_level() {
        let filter = build_filter(None, Some("debug"));
        assert_eq!(filter.to_string(), "focusflow=debug");
    }

    #[test]
    fn test_filter_keeps_targeted_rust_log() {
        let filter = build_filter(None, Some("focusflow=trace"));
        assert_eq!(filter.to_string(), "focusflow=trace");
    }

    #[test]
    fn test_filter_flag_wins_over_rust_log() {
        let filter = build_filter(Some(LevelFilter::WARN), Some("focusflow=trace"));
        assert_eq!(filter.to_string(), "focusflow=warn");
    }

    #[test]
    fn test_invalid_filter_falls_back_to_info() {
        let filter = build_filter(None, Some("focusflow=loud"));
        assert_eq!(filter.to_string(), "focusflow=info");
    }
}
