use std::io::Write;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

struct QuickCmdLogger {
    file: Option<Mutex<std::fs::File>>,
    filter: LevelFilter,
    start: Instant,
}

impl QuickCmdLogger {
    fn format(&self, record: &Record) -> String {
        let elapsed = self.start.elapsed().as_secs_f64();
        format!(
            "[{elapsed:.3}s] [{}] {} — {}",
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for QuickCmdLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // stdout belongs to the launcher and the commands it runs
        let line = self.format(record);
        let _ = writeln!(std::io::stderr().lock(), "{line}");

        if let Some(ref file) = self.file {
            let _ = writeln!(file.lock(), "{line}");
        }
    }

    fn flush(&self) {
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Level filter from a `RUST_LOG`-style value, `warn` when unset or unparsable.
#[must_use]
pub fn parse_filter(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Initialize the global logger. Must be called once before any logging.
///
/// # Errors
///
/// Returns `SetLoggerError` if a logger is already installed.
pub fn init(log_file: Option<std::fs::File>) -> Result<(), SetLoggerError> {
    let filter = parse_filter(std::env::var("RUST_LOG").ok().as_deref());

    let logger = QuickCmdLogger {
        file: log_file.map(Mutex::new),
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter(None), LevelFilter::Warn);
        assert_eq!(parse_filter(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_filter(Some("INFO")), LevelFilter::Info);
        assert_eq!(parse_filter(Some("nonsense")), LevelFilter::Warn);
    }

    #[test]
    fn test_format_includes_level_and_target() {
        let logger = QuickCmdLogger {
            file: None,
            filter: LevelFilter::Info,
            start: Instant::now(),
        };
        let line = logger.format(
            &Record::builder()
                .args(format_args!("Skipping x.sh"))
                .level(log::Level::Warn)
                .target("quick_cmd::commands::registry")
                .build(),
        );
        assert!(line.contains("[WARN] quick_cmd::commands::registry — Skipping x.sh"));
    }
}
