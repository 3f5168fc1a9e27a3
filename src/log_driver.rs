use crate::control_input::{Axis, ControlSample};
use crate::driver::{DriveState, Driver, Percentage};

/**
 * Writes each drive command to the log instead of sending it anywhere. Handy
 * for bench testing the controls without a robot on the other end.
 */
#[derive(Default)]
pub struct LogDriver {
    state: DriveState,
}


impl LogDriver {
    pub fn new() -> LogDriver {
        LogDriver { state: DriveState::default() }
    }
}


fn label(axis: Axis) -> &'static str {
    match axis {
        Axis::Throttle => "Throttle",
        Axis::Steering => "Steering",
    }
}


impl Driver for LogDriver {
    fn drive(&mut self, sample: &ControlSample) {
        self.state.update(sample);
        info!("{}: {}%", label(sample.axis), sample.rounded_percent());
    }

    fn release(&mut self, sample: &ControlSample) {
        self.state.update(sample);
        info!("{}: {}% (released)", label(sample.axis), sample.rounded_percent());
    }

    fn get_throttle(&self) -> Percentage {
        self.state.throttle
    }

    fn get_steering(&self) -> Percentage {
        self.state.steering
    }
}
