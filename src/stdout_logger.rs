use std::fs::File;
use std::path::Path;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use simplelog::{CombinedLogger, Config, SharedLogger, WriteLogger};

use crate::error::ControlError;

/**
 * Prints log records as "<time> <file>:<line> <level> <message>". Goes to
 * stderr instead when stdout is carrying drive commands.
 */
pub struct StdoutLogger {
    level: LevelFilter,
    config: Config,
    stderr: bool,
}


impl StdoutLogger {
    pub fn new(level: LevelFilter) -> StdoutLogger {
        StdoutLogger {
            level,
            config: Config::default(),
            stderr: false,
        }
    }

    pub fn to_stderr(mut self) -> StdoutLogger {
        self.stderr = true;
        self
    }

    fn format(record: &Record) -> String {
        let time_str = Local::now().format("%Y/%m/%d %H:%M:%S%.3f");
        let file_name = record.file()
            .and_then(|file| file.split('/').last())
            .and_then(|slashes| slashes.split('.').next())
            .unwrap_or("UNKNOWN");
        format!(
            "{time} {file}:{line} {level:<5} {message}",
            time=time_str,
            file=file_name,
            line=record.line().unwrap_or(0),
            level=record.level(),
            message=record.args())
    }
}


impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if self.stderr {
            eprintln!("{}", StdoutLogger::format(record));
        } else {
            println!("{}", StdoutLogger::format(record));
        }
    }

    fn flush(&self) {}
}


impl SharedLogger for StdoutLogger {
    fn level(&self) -> LevelFilter {
        self.level
    }

    fn config(&self) -> Option<&Config> {
        Some(&self.config)
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}


/**
 * The console logger always, plus a plain file log if log_file is given.
 */
pub fn build_loggers(
    level: LevelFilter,
    stderr: bool,
    log_file: Option<&Path>,
) -> Result<Vec<Box<dyn SharedLogger>>, ControlError> {
    let console = if stderr {
        StdoutLogger::new(level).to_stderr()
    } else {
        StdoutLogger::new(level)
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![Box::new(console)];
    if let Some(path) = log_file {
        let file = File::create(path)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }
    Ok(loggers)
}


/// Installs the global logger.
pub fn init(
    level: LevelFilter,
    stderr: bool,
    log_file: Option<&Path>,
) -> Result<(), ControlError> {
    CombinedLogger::init(build_loggers(level, stderr, log_file)?)?;
    Ok(())
}
