use std::fmt;
use std::sync::OnceLock;

use derive_more::Display;
use serde::Deserialize;
use strum::EnumString;

/// Severity, ordered so a sink can filter with `<`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, Deserialize)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace = 0,
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = " INFO")]
    Info = 2,
    #[display(fmt = " WARN")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Layer tag plus the name of the type that logged
#[derive(Debug, Clone, Copy, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Milliseconds from the installed [`TimeProvider`]
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

/// Wall clock for log prefixes and the "last updated" label
pub trait TimeProvider: Send + Sync {
    /// Milliseconds since the UNIX epoch
    fn current_timestamp(&self) -> u64;
    /// Local `HH:MM:SS`
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Log sink. Entries below [`min_level`](Logger::min_level) are never built.
pub trait Logger: Send + Sync {
    fn min_level(&self) -> LogLevel {
        LogLevel::Trace
    }

    fn write(&self, entry: &LogEntry);
}

static LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static CLOCK: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Install the process-wide sink. First call wins.
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = LOGGER.set(logger);
}

/// Install the process-wide clock. First call wins.
pub fn init_time_provider(clock: Box<dyn TimeProvider>) {
    let _ = CLOCK.set(clock);
}

pub fn get_logger() -> &'static dyn Logger {
    LOGGER.get().map_or(&NoOpLogger as &dyn Logger, |logger| logger.as_ref())
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    CLOCK.get().map_or(&Ticks as &dyn TimeProvider, |clock| clock.as_ref())
}

/// Backing call of the `log_*!` macros
pub fn emit(level: LogLevel, component: LogComponent, args: fmt::Arguments<'_>) {
    let logger = get_logger();
    if level < logger.min_level() {
        return;
    }
    logger.write(&LogEntry {
        timestamp: get_time_provider().current_timestamp(),
        level,
        component,
        message: args.to_string(),
    });
}

/// Used until a sink is installed, and in native tests
struct NoOpLogger;

impl Logger for NoOpLogger {
    fn min_level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn write(&self, _entry: &LogEntry) {}
}

/// Counter standing in for a clock outside the browser
struct Ticks;

impl TimeProvider for Ticks {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TICKS: AtomicU64 = AtomicU64::new(0);
        TICKS.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("{:06}", timestamp)
    }
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::emit(
                $crate::domain::logging::LogLevel::Debug,
                $component,
                format_args!($($arg)*),
            );
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit(
            $crate::domain::logging::LogLevel::Info,
            $component,
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit(
            $crate::domain::logging::LogLevel::Warn,
            $component,
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit(
            $crate::domain::logging::LogLevel::Error,
            $component,
            format_args!($($arg)*),
        )
    };
}
