use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::Direction;

/// Default color of snake segments (0xRRGGBB)
pub const SNAKE_COLOR: u32 = 0x005109;

/// A position in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position `step` pixels in a direction
    pub fn stepped(&self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * step, dy * step)
    }
}

/// One block of the snake's body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeSegment {
    pub coord: Coordinate,
    pub facing: Direction,
    pub color: u32,
}

impl SnakeSegment {
    pub fn new(coord: Coordinate, facing: Direction) -> Self {
        Self {
            coord,
            facing,
            color: SNAKE_COLOR,
        }
    }
}

/// A target word placed on both halves of the field.
///
/// `targets[i]` sits at `kbd[i]` on the snake side and at `mouse[i]` on the
/// pointer side. The pointer side additionally holds `decoys[k]` at
/// `mouse[targets.len() + k]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub targets: Vec<char>,
    pub decoys: Vec<char>,
    pub kbd: Vec<Coordinate>,
    pub mouse: Vec<Coordinate>,
}

impl Word {
    /// Number of letters to consume
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of letters shown on the pointer side, decoys included
    pub fn mouse_len(&self) -> usize {
        self.mouse.len()
    }

    /// Pointer-side letters in slot order
    pub fn mouse_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.targets.iter().chain(self.decoys.iter()).copied()
    }

    pub fn text(&self) -> String {
        self.targets.iter().collect()
    }

    /// Last snake-side coordinate, where the snake ends up after finishing the word
    pub fn last_kbd(&self) -> Option<Coordinate> {
        self.kbd.last().copied()
    }
}

/// Pointer-side slots hold the targets first, then the decoys
pub(crate) fn slot_letter(targets: &[char], decoys: &[char], index: usize) -> Option<char> {
    match index.checked_sub(targets.len()) {
        None => targets.get(index).copied(),
        Some(decoy) => decoys.get(decoy).copied(),
    }
}

/// The two sides of a race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Snake,
    Pointer,
}

impl Winner {
    /// Name written to the winner log
    pub fn label(&self) -> &'static str {
        match self {
            Winner::Snake => "Snake",
            Winner::Pointer => "Mouse",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
