use crate::control_input::{Axis, ControlSample};

pub type Percentage = f32;

/// Receives control samples on their way to the robot.
pub trait Driver {
    fn drive(&mut self, sample: &ControlSample);

    /**
     * Called instead of drive when the sample came from the gesture ending.
     */
    fn release(&mut self, sample: &ControlSample) {
        self.drive(sample);
    }

    fn get_throttle(&self) -> Percentage;
    fn get_steering(&self) -> Percentage;
}


/**
 * Last percentage seen on each axis. Shared by the drivers so they can answer
 * get_throttle and get_steering.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveState {
    pub throttle: Percentage,
    pub steering: Percentage,
}


impl DriveState {
    pub fn update(&mut self, sample: &ControlSample) {
        match sample.axis {
            Axis::Throttle => self.throttle = sample.percent,
            Axis::Steering => self.steering = sample.percent,
        }
    }
}
