//! Session logger for the weather station
//!
//! Records go to stdout and to the session's log file. The sensor driver logs under its own target
//! (`bme280`) and gets a separate level so register traffic at `trace` can be enabled without
//! flooding the executable's own output.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info, Level};
use colored::{ColoredString, Colorize};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Log target of the sensor driver crate, submodule targets inherit its level.
pub const DRIVER_TARGET: &str = "bme280";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Log levels for the application and for the sensor driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLevels {
    /// Level for every target except the driver's
    pub app: LevelFilter,

    /// Level for records emitted by the driver crate
    pub driver: LevelFilter,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected an application log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(LevelFilter),

    #[error("Unknown log level `{0}`")]
    UnknownLevel(String),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl LogLevels {
    /// Build the levels from their names (`"off"`, `"info"`, `"trace"`, ...), case insensitive.
    pub fn from_names(app: &str, driver: &str) -> Result<Self, LoggerInitError> {
        Ok(Self {
            app: parse_level(app)?,
            driver: parse_level(driver)?,
        })
    }

    /// The application level may not hide `INFO` records, the driver may be silenced entirely.
    pub fn validate(&self) -> Result<(), LoggerInitError> {
        if self.app < Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(self.app))
        }

        Ok(())
    }
}

impl Default for LogLevels {
    fn default() -> Self {
        Self {
            app: LevelFilter::Debug,
            driver: LevelFilter::Info,
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution. Can only succeed once per process.
pub fn logger_init(
    levels: LogLevels,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    levels.validate()?;

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {}",
                prefix(session::get_elapsed_seconds(), record.level(), record.target()),
                message
            ))
        })
        .level(levels.app)
        .level_for(DRIVER_TARGET, levels.driver)
        .chain(std::io::stdout())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    if let Ok(epoch) = session::get_epoch() {
        info!("    Session epoch: {}", epoch);
    }
    info!("    Log level: {:?} ({}: {:?})", levels.app, DRIVER_TARGET, levels.driver);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn parse_level(name: &str) -> Result<LevelFilter, LoggerInitError> {
    name.trim()
        .parse()
        .map_err(|_| LoggerInitError::UnknownLevel(name.to_string()))
}

/// Record prefix, debug and trace records also carry their target (`bme280::driver` etc).
fn prefix(elapsed_s: f64, level: Level, target: &str) -> String {
    if level > Level::Info {
        format!("[{:10.6} {}] {}:", elapsed_s, level_tag(level), target)
    }
    else {
        format!("[{:10.6} {}]", elapsed_s, level_tag(level))
    }
}

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Trace => "TRC".dimmed().italic(),
        Level::Debug => "DBG".dimmed(),
        Level::Info  => "INF".normal(),
        Level::Warn  => "WRN".yellow(),
        Level::Error => "ERR".red().bold()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
