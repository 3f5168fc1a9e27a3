use std::io;

use thiserror::Error;

use crate::control_input::Axis;


#[derive(Debug, Error)]
pub enum ControlError {
    #[error("{axis} range must be finite and positive, got {value}")]
    InvalidMaxOffset { axis: Axis, value: f32 },

    #[error("unable to parse options: {0}")]
    Options(#[from] getopts::Fail),

    #[error("invalid value '{value}' for option --{name}")]
    InvalidOption { name: String, value: String },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unable to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
