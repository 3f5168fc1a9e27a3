#[macro_use]
extern crate log;
extern crate robot_client;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{JoinHandle, spawn};

use robot_client::config::{self, ControlConfig, OutputMode};
use robot_client::control::Control;
use robot_client::control_message::ControlMessage;
use robot_client::driver::Driver;
use robot_client::error::ControlError;
use robot_client::input_provider::InputProvider;
use robot_client::log_driver::LogDriver;
use robot_client::stdout_logger;
use robot_client::stream_driver::StreamDriver;


fn main() {
    let config = match handle_opts() {
        Ok(Some(config)) => config,
        Ok(None) => return,
        Err(e) => {
            eprintln!("{}", e);
            eprint!("{}", config::usage());
            process::exit(2);
        }
    };
    info!("Starting up");

    if let Err(e) = run(&config) {
        error!("{}", e);
        process::exit(1);
    }

    info!("Main thread shutting down");
}


fn run(config: &ControlConfig) -> Result<(), ControlError> {
    let driver: Box<dyn Driver + Send> = match config.output {
        OutputMode::Log => Box::new(LogDriver::new()),
        OutputMode::Stream => Box::new(StreamDriver::new(io::stdout())),
    };
    let control = Control::new(config, driver)?;

    let (event_tx, event_rx) = channel();
    let input_handle = spawn_input_provider(event_tx, config.input.clone())?;
    let join_handles = vec![input_handle, spawn_control(control, event_rx)];

    for handle in join_handles {
        match handle.join() {
            Ok(_) => (),
            Err(_) => error!("Unable to join thread, child thread panicked")
        }
    }
    Ok(())
}


fn spawn_control(mut control: Control, event_rx: Receiver<ControlMessage>) -> JoinHandle<()> {
    spawn(move || {
        control.run(event_rx);
    })
}


fn spawn_input_provider(
    event_tx: Sender<ControlMessage>,
    input: Option<PathBuf>,
) -> Result<JoinHandle<()>, ControlError> {
    // Open the file up front so a bad path is reported before anything runs
    let file = match input {
        Some(path) => {
            info!("Reading events from {}", path.display());
            Some(File::open(&path)?)
        },
        None => None,
    };
    Ok(spawn(move || {
        let mut provider = InputProvider::new(event_tx);
        match file {
            Some(file) => provider.run(BufReader::new(file)),
            None => provider.run(BufReader::new(io::stdin())),
        }
    }))
}


fn handle_opts() -> Result<Option<ControlConfig>, ControlError> {
    let mut args = std::env::args();
    args.next();  // Skip the program name
    let config = match ControlConfig::from_args(args)? {
        Some(config) => config,
        None => {
            print!("{}", config::usage());
            return Ok(None);
        }
    };

    stdout_logger::init(
        config.log_level(),
        config.output == OutputMode::Stream,
        config.log_file.as_deref())?;
    Ok(Some(config))
}
