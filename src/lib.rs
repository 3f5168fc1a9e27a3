#[macro_use]
extern crate log;

pub mod config;
pub mod control;
pub mod control_input;
pub mod control_message;
pub mod driver;
pub mod error;
pub mod input_provider;
pub mod log_driver;
pub mod stdout_logger;
pub mod stream_driver;
