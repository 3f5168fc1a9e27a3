/**
 * Turns drag displacements from the on-screen controls into signed
 * percentages. Every operation takes the axis state by value and hands back
 * the next state together with the sample to send.
 */
use std::fmt;

use num::clamp;

use crate::driver::Percentage;
use crate::error::ControlError;

pub type Offset = f32;

pub const DEFAULT_THROTTLE_MAX_OFFSET: Offset = 300.0;
pub const DEFAULT_STEERING_MAX_OFFSET: Offset = 200.0;


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Throttle,
    Steering,
}


impl Axis {
    /**
     * Picks the part of a 2-D drag this axis cares about. The throttle slides
     * vertically and the steering horizontally.
     */
    pub fn component(self, dx: Offset, dy: Offset) -> Offset {
        match self {
            Axis::Throttle => dy,
            Axis::Steering => dx,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Throttle => "throttle",
            Axis::Steering => "steering",
        }
    }
}


impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SteeringButton {
    Left,
    Straight,
    Right,
}


/// Position of one control's knob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisState {
    offset: Offset,
    max_offset: Offset,
}


impl AxisState {
    pub fn new(axis: Axis, max_offset: Offset) -> Result<AxisState, ControlError> {
        if !max_offset.is_finite() || max_offset <= 0.0 {
            return Err(ControlError::InvalidMaxOffset { axis, value: max_offset });
        }
        Ok(AxisState { offset: 0.0, max_offset })
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn max_offset(&self) -> Offset {
        self.max_offset
    }

    /// Largest distance the knob may travel from center in either direction.
    pub fn half_range(&self) -> Offset {
        self.max_offset / 2.0
    }

    fn with_offset(self, offset: Offset) -> AxisState {
        let half_range = self.half_range();
        AxisState {
            offset: clamp(offset, -half_range, half_range),
            max_offset: self.max_offset,
        }
    }
}


#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlSample {
    pub axis: Axis,
    pub percent: Percentage,
}


impl ControlSample {
    pub fn new(axis: Axis, percent: Percentage) -> ControlSample {
        // Avoid reporting -0% for a centered throttle
        let percent = if percent == 0.0 { 0.0 } else { percent };
        ControlSample { axis, percent }
    }

    pub fn neutral(axis: Axis) -> ControlSample {
        ControlSample::new(axis, 0.0)
    }

    /// The percentage as a whole number, rounding halves up (-41.5 is -41).
    pub fn rounded_percent(&self) -> i32 {
        (self.percent + 0.5).floor() as i32
    }
}


/**
 * Returns the percentage for a knob position. Dragging the throttle up moves
 * it towards negative Y, so that axis is inverted.
 */
pub fn percent_for(axis: Axis, state: &AxisState) -> Percentage {
    let fraction = state.offset / state.half_range();
    match axis {
        Axis::Throttle => -fraction * 100.0,
        Axis::Steering => fraction * 100.0,
    }
}


pub fn on_drag_move(axis: Axis, delta: Offset, state: AxisState) -> (AxisState, ControlSample) {
    let next = if delta.is_nan() {
        state
    } else {
        state.with_offset(state.offset + delta)
    };
    (next, ControlSample::new(axis, percent_for(axis, &next)))
}


pub fn on_drag_release(axis: Axis, state: AxisState) -> (AxisState, ControlSample) {
    (state.with_offset(0.0), ControlSample::neutral(axis))
}


/**
 * The buttons under the steering slider jump straight to full lock or back to
 * center.
 */
pub fn on_steering_button(button: SteeringButton, state: AxisState) -> (AxisState, ControlSample) {
    let offset = match button {
        SteeringButton::Left => -state.half_range(),
        SteeringButton::Straight => 0.0,
        SteeringButton::Right => state.half_range(),
    };
    let next = state.with_offset(offset);
    (next, ControlSample::new(Axis::Steering, percent_for(Axis::Steering, &next)))
}


#[cfg(test)]
pub mod tests {
    use num::traits::{Float, FromPrimitive};

    use super::{
        Axis, AxisState, ControlSample, SteeringButton, on_drag_move, on_drag_release,
        on_steering_button,
    };

    macro_rules! assert_approx_eq {
        ( $value_1:expr, $value_2:expr) => {
            assert!(
                crate::control_input::tests::approx_eq($value_1, $value_2),
                "{} != {}",
                $value_1,
                $value_2);
        }
    }
    pub(crate) use assert_approx_eq;

    pub fn approx_eq<T: Float + FromPrimitive>(value_1: T, value_2: T) -> bool {
        let diff = (value_1 - value_2).abs();
        // This is the best we can do with f32
        diff < T::from_f32(0.0001f32).unwrap()
    }

    fn throttle() -> AxisState {
        AxisState::new(Axis::Throttle, 300.0).unwrap()
    }

    fn steering() -> AxisState {
        AxisState::new(Axis::Steering, 200.0).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_ranges() {
        assert!(AxisState::new(Axis::Throttle, 0.0).is_err());
        assert!(AxisState::new(Axis::Throttle, -10.0).is_err());
        assert!(AxisState::new(Axis::Steering, f32::NAN).is_err());
        assert!(AxisState::new(Axis::Steering, f32::INFINITY).is_err());
        let state = AxisState::new(Axis::Steering, 1.0).unwrap();
        assert_eq!(state.offset(), 0.0);
        assert_eq!(state.max_offset(), 1.0);
    }

    #[test]
    fn test_throttle_drag_is_clamped_and_inverted() {
        let (state, sample) = on_drag_move(Axis::Throttle, 200.0, throttle());
        assert_approx_eq!(state.offset(), 150.0);
        assert_eq!(sample.axis, Axis::Throttle);
        assert_approx_eq!(sample.percent, -100.0);

        let (state, sample) = on_drag_move(Axis::Throttle, -225.0, state);
        assert_approx_eq!(state.offset(), -75.0);
        assert_approx_eq!(sample.percent, 50.0);
    }

    #[test]
    fn test_steering_drag() {
        let (state, sample) = on_drag_move(Axis::Steering, -50.0, steering());
        assert_approx_eq!(state.offset(), -50.0);
        assert_eq!(sample.axis, Axis::Steering);
        assert_approx_eq!(sample.percent, -50.0);

        let (state, sample) = on_drag_move(Axis::Steering, 1000.0, state);
        assert_approx_eq!(state.offset(), 100.0);
        assert_approx_eq!(sample.percent, 100.0);
    }

    #[test]
    fn test_offset_never_leaves_range() {
        let deltas = [
            0.0, 1.0, -1.0, 149.9, 150.1, -150.1, 1.0e9, -1.0e9,
            f32::INFINITY, f32::NEG_INFINITY, f32::NAN, f32::MAX, f32::MIN,
        ];
        for &axis in &[Axis::Throttle, Axis::Steering] {
            let mut state = AxisState::new(axis, 300.0).unwrap();
            for &delta in deltas.iter().chain(deltas.iter().rev()) {
                let (next, sample) = on_drag_move(axis, delta, state);
                assert!(next.offset().abs() <= next.half_range(), "{} escaped", next.offset());
                assert!(sample.percent.abs() <= 100.0);
                state = next;
            }
        }
    }

    #[test]
    fn test_nan_delta_keeps_offset() {
        let (state, _) = on_drag_move(Axis::Steering, 30.0, steering());
        let (state, sample) = on_drag_move(Axis::Steering, f32::NAN, state);
        assert_approx_eq!(state.offset(), 30.0);
        assert_approx_eq!(sample.percent, 30.0);
    }

    #[test]
    fn test_release_recenters() {
        for &delta in &[-500.0f32, -12.0, 0.0, 3.5, 500.0] {
            let (state, _) = on_drag_move(Axis::Throttle, delta, throttle());
            let (state, sample) = on_drag_release(Axis::Throttle, state);
            assert_eq!(state.offset(), 0.0);
            assert_eq!(state.max_offset(), 300.0);
            assert_eq!(sample, ControlSample::neutral(Axis::Throttle));
        }
    }

    #[test]
    fn test_percent_monotonic_in_offset() {
        let mut last_throttle = f32::INFINITY;
        let mut last_steering = f32::NEG_INFINITY;
        let mut throttle_state = throttle();
        let mut steering_state = AxisState::new(Axis::Steering, 300.0).unwrap();
        // Walk from one end of the range to the other
        throttle_state = on_drag_move(Axis::Throttle, -150.0, throttle_state).0;
        steering_state = on_drag_move(Axis::Steering, -150.0, steering_state).0;
        for _ in 0..30 {
            let (next_throttle, throttle_sample) = on_drag_move(Axis::Throttle, 10.0, throttle_state);
            let (next_steering, steering_sample) = on_drag_move(Axis::Steering, 10.0, steering_state);
            assert!(throttle_sample.percent < last_throttle);
            assert!(steering_sample.percent > last_steering);
            last_throttle = throttle_sample.percent;
            last_steering = steering_sample.percent;
            throttle_state = next_throttle;
            steering_state = next_steering;
        }
        assert_approx_eq!(last_throttle, -100.0);
        assert_approx_eq!(last_steering, 100.0);
    }

    #[test]
    fn test_centered_throttle_is_not_negative_zero() {
        let (_, sample) = on_drag_move(Axis::Throttle, 0.0, throttle());
        assert!(sample.percent.is_sign_positive());
        assert_eq!(sample.rounded_percent(), 0);
    }

    #[test]
    fn test_rounded_percent() {
        assert_eq!(ControlSample::new(Axis::Steering, 41.5).rounded_percent(), 42);
        assert_eq!(ControlSample::new(Axis::Steering, -41.5).rounded_percent(), -41);
        assert_eq!(ControlSample::new(Axis::Steering, -41.6).rounded_percent(), -42);
        assert_eq!(ControlSample::new(Axis::Steering, -0.5).rounded_percent(), 0);
        assert_eq!(ControlSample::new(Axis::Throttle, 99.4).rounded_percent(), 99);

        // A drag landing exactly on a negative half displays like the touch screen did
        let state = AxisState::new(Axis::Steering, 400.0).unwrap();
        let (_, sample) = on_drag_move(Axis::Steering, -83.0, state);
        assert_approx_eq!(sample.percent, -41.5);
        assert_eq!(sample.rounded_percent(), -41);
    }

    #[test]
    fn test_steering_buttons() {
        let (state, sample) = on_steering_button(SteeringButton::Left, steering());
        assert_approx_eq!(state.offset(), -100.0);
        assert_approx_eq!(sample.percent, -100.0);
        let (state, sample) = on_steering_button(SteeringButton::Right, state);
        assert_approx_eq!(state.offset(), 100.0);
        assert_approx_eq!(sample.percent, 100.0);
        let (state, sample) = on_steering_button(SteeringButton::Straight, state);
        assert_eq!(state.offset(), 0.0);
        assert_eq!(sample.percent, 0.0);
    }

    #[test]
    fn test_component() {
        assert_eq!(Axis::Throttle.component(1.0, 2.0), 2.0);
        assert_eq!(Axis::Steering.component(1.0, 2.0), 1.0);
    }
}
