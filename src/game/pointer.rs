use super::collision::{resolve_hit, Verdict};
use super::config::PlayField;
use super::state::{slot_letter, Coordinate, Word};

/// Region the pointer is confined to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// The whole screen
    Menu,
    /// The pointer's half of the field, away from the borders
    Play,
}

/// The mouse player's cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Pointer {
    position: Coordinate,
    field: PlayField,
}

impl Pointer {
    pub fn new(field: PlayField) -> Self {
        Self {
            position: field.cursor_start,
            field,
        }
    }

    pub fn at(position: Coordinate, field: PlayField) -> Self {
        Self { position, field }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    /// Apply a motion sample.
    ///
    /// Each delta is limited to the maximum step first; the y delta points up,
    /// so it is subtracted from the screen coordinate.
    pub fn update_position(&mut self, delta_x: i32, delta_y: i32, bounds: Bounds) {
        let max = self.field.pointer_max_delta;
        self.position.x += delta_x.clamp(-max, max);
        self.position.y -= delta_y.clamp(-max, max);

        let (min_x, max_x, min_y, max_y) = match bounds {
            Bounds::Menu => (0, self.field.width, 0, self.field.height),
            Bounds::Play => {
                let border = self.field.border_size;
                let sprite = self.field.cursor_size;
                (
                    self.field.middle_border + border,
                    self.field.width - border - sprite,
                    border,
                    self.field.height - border - sprite,
                )
            }
        };
        self.position.x = self.position.x.clamp(min_x, max_x);
        self.position.y = self.position.y.clamp(min_y, max_y);
    }

    /// Check a click against the word's remaining pointer-side letters.
    ///
    /// Decoys can be hit but never stand in for the expected letter.
    pub fn test_click_collision(&self, word: &mut Word, progress: usize) -> Verdict {
        let at = self.position;
        let tolerance = self.field.pointer_hit_tolerance;
        let swappable = word.targets.len();
        let (targets, decoys) = (&word.targets, &word.decoys);

        resolve_hit(
            &mut word.mouse,
            |i| slot_letter(targets, decoys, i),
            progress,
            swappable,
            |c| (c.x - at.x).abs() < tolerance && (c.y - at.y).abs() < tolerance,
        )
    }
}
