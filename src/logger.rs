//! Custom logging module.
//!
//! This module provides a `log` implementation that formats records and
//! forwards them to a registered sink. In the browser the sink writes to the
//! developer console; tests register a sink that captures lines in memory.

use crate::error::{AppError, AppResult};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

/// Receives each formatted log line along with its level.
pub type LogSink = Box<dyn Fn(Level, String) + Send + Sync>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!(
        "{} {} [{}] {}",
        timestamp,
        level_str,
        record.target(),
        record.args()
    )
}

/// Logger that forwards formatted records to a sink.
///
pub struct SiteLogger {
    level: LevelFilter,
    sink: Arc<Mutex<Option<LogSink>>>,
}

impl SiteLogger {
    pub fn new(level: LevelFilter) -> Self {
        SiteLogger {
            level,
            sink: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_sink(&self, sink: LogSink) {
        if let Ok(mut guard) = self.sink.lock() {
            *guard = Some(sink);
        }
        // A poisoned lock leaves the logger without a sink; records are dropped
    }
}

impl Log for SiteLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(sink) = self.sink.lock() {
                if let Some(ref sink) = *sink {
                    sink(record.level(), format_log(record));
                }
            }
        }
    }

    fn flush(&self) {
        // No-op
    }
}

/// Install a `SiteLogger` as the global logger. Fails if a logger has
/// already been installed for this process.
///
pub fn init(level: LevelFilter, sink: LogSink) -> AppResult<()> {
    let logger = SiteLogger::new(level);
    logger.set_sink(sink);
    log::set_boxed_logger(Box::new(logger)).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
