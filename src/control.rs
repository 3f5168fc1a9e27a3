use std::sync::mpsc::Receiver;

use crate::config::{ControlConfig, SendPolicy};
use crate::control_input::{
    Axis, AxisState, ControlSample, on_drag_move, on_drag_release, on_steering_button,
};
use crate::control_message::ControlMessage;
use crate::driver::Driver;
use crate::error::ControlError;


pub struct Control {
    throttle: AxisState,
    steering: AxisState,
    send_policy: SendPolicy,
    // Rounded percentages last handed to the driver, throttle then steering
    last_sent: [Option<i32>; 2],
    driver: Box<dyn Driver + Send>,
}


impl Control {
    pub fn new(
        config: &ControlConfig,
        driver: Box<dyn Driver + Send>,
    ) -> Result<Control, ControlError> {
        Ok(Control {
            throttle: AxisState::new(Axis::Throttle, config.throttle_max_offset)?,
            steering: AxisState::new(Axis::Steering, config.steering_max_offset)?,
            send_policy: config.send_policy,
            last_sent: [None, None],
            driver,
        })
    }

    /**
     * Feeds events to the driver until told to quit or the sender hangs up.
     * Should be run in a thread. Both controls are released before returning
     * so the robot is never left holding a command.
     */
    pub fn run(&mut self, event_rx: Receiver<ControlMessage>) {
        loop {
            match event_rx.recv() {
                Ok(message) => {
                    if !self.handle_message(message) {
                        info!("Control shutting down");
                        break;
                    }
                },
                Err(_) => {
                    info!("Event source closed, control shutting down");
                    break;
                }
            }
        }
        self.release(Axis::Throttle);
        self.release(Axis::Steering);
    }

    /**
     * Applies one event. Returns false if the control should stop.
     */
    pub fn handle_message(&mut self, message: ControlMessage) -> bool {
        match message {
            ControlMessage::DragMove { axis, dx, dy } => {
                let delta = axis.component(dx, dy);
                let (next, sample) = on_drag_move(axis, delta, self.state(axis));
                self.set_state(axis, next);
                self.drive(sample);
            },
            ControlMessage::DragRelease(axis) => self.release(axis),
            ControlMessage::Button(button) => {
                debug!("Steering button {:?}", button);
                let (next, sample) = on_steering_button(button, self.steering);
                self.steering = next;
                self.drive(sample);
            },
            ControlMessage::Quit => return false,
        }
        true
    }

    pub fn state(&self, axis: Axis) -> AxisState {
        match axis {
            Axis::Throttle => self.throttle,
            Axis::Steering => self.steering,
        }
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    fn set_state(&mut self, axis: Axis, state: AxisState) {
        match axis {
            Axis::Throttle => self.throttle = state,
            Axis::Steering => self.steering = state,
        }
    }

    fn release(&mut self, axis: Axis) {
        let (next, sample) = on_drag_release(axis, self.state(axis));
        self.set_state(axis, next);
        self.last_sent[slot(axis)] = Some(sample.rounded_percent());
        self.driver.release(&sample);
    }

    fn drive(&mut self, sample: ControlSample) {
        let rounded = sample.rounded_percent();
        let last = &mut self.last_sent[slot(sample.axis)];
        if self.send_policy == SendPolicy::OnChange && *last == Some(rounded) {
            debug!("Skipping unchanged {} {}%", sample.axis, rounded);
            return;
        }
        *last = Some(rounded);
        self.driver.drive(&sample);
    }
}


fn slot(axis: Axis) -> usize {
    match axis {
        Axis::Throttle => 0,
        Axis::Steering => 1,
    }
}
