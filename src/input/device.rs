//! Relative pointer device on top of absolute terminal positions
//!
//! Terminal mice report the cell under the cursor. The game expects a stream
//! of relative motion packets instead, so [`PointerDevice`] remembers where it
//! last pointed and emits the difference. The consumer clamps the cursor, so
//! the device resynchronises from [`PointerFeedback`] whenever every byte it
//! sent has been consumed.

use super::packet::encode_motion;
use crate::game::Coordinate;

/// Cursor position published by the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerFeedback {
    pub cursor: Coordinate,
    /// Pointer bytes consumed or discarded so far
    pub consumed: u64,
}

#[derive(Debug, Clone)]
pub struct PointerDevice {
    last: Coordinate,
    sent: u64,
    left_held: bool,
    max_step: i32,
}

impl PointerDevice {
    pub fn new(start: Coordinate, max_step: i32) -> Self {
        Self {
            last: start,
            sent: 0,
            left_held: false,
            max_step,
        }
    }

    pub fn bytes_sent(&self) -> u64 {
        self.sent
    }

    pub fn move_to(&mut self, target: Coordinate, feedback: PointerFeedback) -> Vec<u8> {
        let origin = self.origin(feedback);
        if origin == target {
            return Vec::new();
        }
        self.emit(origin, target)
    }

    /// Move onto `target`, then report the button going down there
    pub fn press(&mut self, target: Coordinate, feedback: PointerFeedback) -> Vec<u8> {
        let mut bytes = self.move_to(target, feedback);
        self.left_held = true;
        bytes.extend(self.emit(target, target));
        bytes
    }

    pub fn release(&mut self, target: Coordinate, feedback: PointerFeedback) -> Vec<u8> {
        let origin = self.origin(feedback);
        self.left_held = false;
        self.emit(origin, target)
    }

    fn origin(&self, feedback: PointerFeedback) -> Coordinate {
        if feedback.consumed >= self.sent {
            feedback.cursor
        } else {
            self.last
        }
    }

    fn emit(&mut self, from: Coordinate, to: Coordinate) -> Vec<u8> {
        // Pixel y grows downwards, packet y grows upwards
        let packets = encode_motion(to.x - from.x, from.y - to.y, self.left_held, self.max_step);
        let bytes: Vec<u8> = packets.into_iter().flatten().collect();

        self.sent += bytes.len() as u64;
        self.last = to;
        bytes
    }
}
