use std::io::Write;

use crate::control_input::ControlSample;
use crate::driver::{DriveState, Driver, Percentage};

/// Writes one "<axis> <percent>" line per drive command.
pub struct StreamDriver<W: Write> {
    state: DriveState,
    stream: W,
}


impl<W: Write> StreamDriver<W> {
    pub fn new(stream: W) -> StreamDriver<W> {
        StreamDriver {
            state: DriveState::default(),
            stream,
        }
    }

    pub fn into_inner(self) -> W {
        self.stream
    }

    fn format_sample(sample: &ControlSample) -> String {
        format!("{} {}\n", sample.axis, sample.rounded_percent())
    }
}


impl<W: Write> Driver for StreamDriver<W> {
    fn drive(&mut self, sample: &ControlSample) {
        self.state.update(sample);
        let message = StreamDriver::<W>::format_sample(sample);
        // Line buffered so a reader on the other end of a pipe sees every command
        let status = self.stream.write_all(message.as_bytes()).and_then(|_| self.stream.flush());
        match status {
            Ok(_) => (),
            Err(err) => error!("Unable to send drive command {}: {}", sample.axis, err),
        }
    }

    fn get_throttle(&self) -> Percentage {
        self.state.throttle
    }

    fn get_steering(&self) -> Percentage {
        self.state.steering
    }
}
