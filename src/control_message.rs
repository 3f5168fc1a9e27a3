/**
 * Events coming from the operator's touch screen, and the text format they are
 * read from.
 */
use std::str::SplitWhitespace;

use crate::control_input::{Axis, Offset, SteeringButton};
use crate::error::ControlError;


#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlMessage {
    DragMove { axis: Axis, dx: Offset, dy: Offset },
    DragRelease(Axis),
    Button(SteeringButton),
    Quit,
}


macro_rules! bail_none {
    ($option:expr, $line:expr, $what:expr) => (
        match $option {
            Some(s) => s,
            None => return Err(parse_error($line, format!("missing {}", $what))),
        }
    );
}


impl ControlMessage {
    /**
     * Parses one line of input. Returns Ok(None) for blank lines and comments.
     *
     * throttle move <dx> <dy>
     * steering release
     * button left
     * quit
     */
    pub fn parse(message: &str, line: usize) -> Result<Option<ControlMessage>, ControlError> {
        let message = message.trim();
        if message.is_empty() || message.starts_with('#') {
            return Ok(None);
        }

        let mut iterator = message.split_whitespace();
        let first = bail_none!(iterator.next(), line, "message type");
        let parsed = match first {
            "throttle" => ControlMessage::parse_axis(Axis::Throttle, &mut iterator, line)?,
            "steering" => ControlMessage::parse_axis(Axis::Steering, &mut iterator, line)?,
            "button" => {
                let name = bail_none!(iterator.next(), line, "button name");
                let button = match name {
                    "left" => SteeringButton::Left,
                    "straight" => SteeringButton::Straight,
                    "right" => SteeringButton::Right,
                    _ => return Err(parse_error(line, format!("unknown button '{}'", name))),
                };
                ControlMessage::Button(button)
            },
            "quit" => ControlMessage::Quit,
            _ => return Err(parse_error(line, format!("unknown message type '{}'", first))),
        };

        if let Some(extra) = iterator.next() {
            return Err(parse_error(line, format!("unexpected trailing '{}'", extra)));
        }
        Ok(Some(parsed))
    }

    fn parse_axis(
        axis: Axis,
        iterator: &mut SplitWhitespace,
        line: usize,
    ) -> Result<ControlMessage, ControlError> {
        let verb = bail_none!(iterator.next(), line, "move or release");
        match verb {
            "move" => {
                let dx = parse_offset(bail_none!(iterator.next(), line, "dx"), line)?;
                let dy = parse_offset(bail_none!(iterator.next(), line, "dy"), line)?;
                Ok(ControlMessage::DragMove { axis, dx, dy })
            },
            "release" => Ok(ControlMessage::DragRelease(axis)),
            _ => Err(parse_error(line, format!("unknown {} action '{}'", axis, verb))),
        }
    }
}


fn parse_offset(value: &str, line: usize) -> Result<Offset, ControlError> {
    match value.parse::<Offset>() {
        Ok(offset) if offset.is_finite() => Ok(offset),
        _ => Err(parse_error(line, format!("'{}' is not a drag distance", value))),
    }
}


fn parse_error(line: usize, reason: String) -> ControlError {
    ControlError::Parse { line, reason }
}
