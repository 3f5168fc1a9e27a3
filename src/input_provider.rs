use std::io::BufRead;
use std::sync::mpsc::Sender;

use crate::control_message::ControlMessage;
use crate::error::ControlError;


/**
 * Reads operator events, one per line, and forwards them to the control loop.
 */
pub struct InputProvider {
    event_tx: Sender<ControlMessage>,
    line_number: usize,
}


impl InputProvider {
    pub fn new(event_tx: Sender<ControlMessage>) -> InputProvider {
        InputProvider {
            event_tx,
            line_number: 0,
        }
    }

    /**
     * Runs until the input ends, a quit message is read, or the control loop
     * goes away. Sends Quit when the input runs out. Should be run in a
     * thread.
     */
    pub fn run<R: BufRead>(&mut self, mut reader: R) {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) => {
                    info!("End of input after {} lines", self.line_number);
                    self.send(ControlMessage::Quit);
                    return;
                },
                Ok(_) => self.line_number += 1,
                Err(e) => {
                    error!("Unable to read event line: {}", e);
                    self.send(ControlMessage::Quit);
                    return;
                }
            }

            let parsed = match std::str::from_utf8(&buffer) {
                Ok(message) => ControlMessage::parse(message, self.line_number),
                Err(e) => Err(ControlError::Parse {
                    line: self.line_number,
                    reason: format!("not valid UTF-8: {}", e),
                }),
            };
            match parsed {
                Ok(Some(parsed)) => {
                    debug!("Event {:?}", parsed);
                    if !self.send(parsed) || parsed == ControlMessage::Quit {
                        return;
                    }
                },
                Ok(None) => (),
                Err(e) => warn!("Ignoring event: {}", e),
            }
        }
    }

    fn send(&self, message: ControlMessage) -> bool {
        match self.event_tx.send(message) {
            Ok(_) => true,
            Err(_) => {
                warn!("Control loop is gone, dropping {:?}", message);
                false
            }
        }
    }
}
