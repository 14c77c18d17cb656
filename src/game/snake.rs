use std::collections::VecDeque;

use super::action::Direction;
use super::collision::{resolve_hit, Verdict};
use super::config::PlayField;
use super::state::{Coordinate, SnakeSegment, Word};

/// The keyboard player's snake
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<SnakeSegment>,
    /// Direction the next step will take
    heading: Direction,
    field: PlayField,
}

impl Snake {
    /// Create a one-segment snake at `origin`
    pub fn initialize(origin: Coordinate, direction: Direction, field: PlayField) -> Self {
        let mut body = VecDeque::new();
        body.push_back(SnakeSegment::new(origin, direction));
        Self {
            body,
            heading: direction,
            field,
        }
    }

    pub fn head(&self) -> &SnakeSegment {
        // The body never shrinks below its initial segment
        &self.body[0]
    }

    pub fn tail(&self) -> &SnakeSegment {
        &self.body[self.body.len() - 1]
    }

    pub fn body(&self) -> &VecDeque<SnakeSegment> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Direction the next step will take
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Record the direction of the next step.
    ///
    /// A reversal of the head's current facing, or of a turn already recorded
    /// for this step, is ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction.is_opposite(self.head().facing) || direction.is_opposite(self.heading) {
            return;
        }
        self.heading = direction;
    }

    /// Move one grid unit: a new head in front, the tail dropped
    pub fn advance(&mut self) {
        self.push_head();
        self.body.pop_back();
    }

    /// Add one segment behind the tail, leaving every existing segment in place
    pub fn grow(&mut self) {
        let tail = *self.tail();
        let coord = tail.coord.stepped(tail.facing.opposite(), self.field.grid_unit);
        self.body.push_back(SnakeSegment { coord, ..tail });
    }

    /// Check the head against the snake's half of the field and its own body
    pub fn test_boundary(&self) -> Verdict {
        let head = self.head().coord;
        let half = self.field.grid_unit / 2;

        let outside = head.x >= self.field.middle_border
            || head.x + half <= 0
            || head.y >= self.field.height
            || head.y + half <= 0;
        if outside {
            return Verdict::CollisionFatal;
        }

        if self.body.iter().skip(1).any(|segment| segment.coord == head) {
            return Verdict::CollisionFatal;
        }

        Verdict::NoCollision
    }

    /// Check the head against the word's remaining snake-side letters.
    ///
    /// A letter is hit when the head is aligned with it on one axis and closer
    /// than the hit tolerance on the other.
    pub fn test_collision(&self, word: &mut Word, progress: usize) -> Verdict {
        let head = self.head().coord;
        let tolerance = self.field.snake_hit_tolerance;
        let swappable = word.targets.len();
        let targets = &word.targets;

        resolve_hit(
            &mut word.kbd,
            |i| targets.get(i).copied(),
            progress,
            swappable,
            |c| {
                (c.x == head.x && (c.y - head.y).abs() < tolerance)
                    || (c.y == head.y && (c.x - head.x).abs() < tolerance)
            },
        )
    }

    fn push_head(&mut self) {
        let coord = self.head().coord.stepped(self.heading, self.field.grid_unit);
        self.body.push_front(SnakeSegment::new(coord, self.heading));
    }
}
