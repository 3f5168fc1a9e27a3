use std::path::PathBuf;
use std::str::FromStr;

use getopts::{Matches, Options};
use log::LevelFilter;

use crate::control_input::{
    Axis, AxisState, Offset, DEFAULT_STEERING_MAX_OFFSET, DEFAULT_THROTTLE_MAX_OFFSET,
};
use crate::error::ControlError;


/// When samples are handed to the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendPolicy {
    /// Every drag event produces a command.
    Continuous,
    /// Only commands whose rounded percentage changed. Releases always go out.
    OnChange,
}


impl FromStr for SendPolicy {
    type Err = ();

    fn from_str(value: &str) -> Result<SendPolicy, ()> {
        match value {
            "continuous" => Ok(SendPolicy::Continuous),
            "on-change" => Ok(SendPolicy::OnChange),
            _ => Err(()),
        }
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    Log,
    Stream,
}


impl FromStr for OutputMode {
    type Err = ();

    fn from_str(value: &str) -> Result<OutputMode, ()> {
        match value {
            "log" => Ok(OutputMode::Log),
            "stream" => Ok(OutputMode::Stream),
            _ => Err(()),
        }
    }
}


#[derive(Clone, Debug, PartialEq)]
pub struct ControlConfig {
    pub throttle_max_offset: Offset,
    pub steering_max_offset: Offset,
    pub send_policy: SendPolicy,
    pub output: OutputMode,
    pub input: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}


impl Default for ControlConfig {
    fn default() -> ControlConfig {
        ControlConfig {
            throttle_max_offset: DEFAULT_THROTTLE_MAX_OFFSET,
            steering_max_offset: DEFAULT_STEERING_MAX_OFFSET,
            send_policy: SendPolicy::Continuous,
            output: OutputMode::Log,
            input: None,
            log_file: None,
            verbose: false,
        }
    }
}


impl ControlConfig {
    pub fn options() -> Options {
        let mut opts = Options::new();
        opts.optflag("v", "verbose", "Prints extra logging.");
        opts.optflag("h", "help", "Print this help menu.");
        opts.optopt("", "throttle-range", "Travel of the throttle knob (default 300).", "OFFSET");
        opts.optopt("", "steering-range", "Travel of the steering knob (default 200).", "OFFSET");
        opts.optopt("", "send-policy", "When to send commands: continuous or on-change.", "POLICY");
        opts.optopt("", "output", "Where commands go: log or stream.", "OUTPUT");
        opts.optopt("", "input", "Read events from this file instead of stdin.", "FILE");
        opts.optopt("", "log-file", "Also write the log to this file.", "FILE");
        opts
    }

    /**
     * Builds a configuration from the command line arguments, not including
     * the program name. Returns None if the user only asked for help.
     */
    pub fn from_args<I>(args: I) -> Result<Option<ControlConfig>, ControlError>
        where I: IntoIterator<Item = String>
    {
        let matches = ControlConfig::options().parse(args)?;
        if matches.opt_present("h") {
            return Ok(None);
        }

        let defaults = ControlConfig::default();
        let config = ControlConfig {
            throttle_max_offset: parse_opt(&matches, "throttle-range")?
                .unwrap_or(defaults.throttle_max_offset),
            steering_max_offset: parse_opt(&matches, "steering-range")?
                .unwrap_or(defaults.steering_max_offset),
            send_policy: parse_opt(&matches, "send-policy")?.unwrap_or(defaults.send_policy),
            output: parse_opt(&matches, "output")?.unwrap_or(defaults.output),
            input: matches.opt_str("input").map(PathBuf::from),
            log_file: matches.opt_str("log-file").map(PathBuf::from),
            verbose: matches.opt_present("v"),
        };
        config.validate()?;
        Ok(Some(config))
    }

    pub fn validate(&self) -> Result<(), ControlError> {
        AxisState::new(Axis::Throttle, self.throttle_max_offset)?;
        AxisState::new(Axis::Steering, self.steering_max_offset)?;
        Ok(())
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}


fn parse_opt<T: FromStr>(matches: &Matches, name: &str) -> Result<Option<T>, ControlError> {
    match matches.opt_str(name) {
        Some(value) => match value.parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ControlError::InvalidOption { name: name.to_string(), value }),
        },
        None => Ok(None),
    }
}


pub fn usage() -> String {
    let brief = "Usage: robot-client [options]";
    ControlConfig::options().usage(brief)
}
