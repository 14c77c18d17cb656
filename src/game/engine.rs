use super::{
    action::{Action, Direction},
    collision::Verdict,
    config::PlayField,
    pointer::Pointer,
    snake::Snake,
    state::{Winner, Word},
};
use crate::error::GameError;

/// Result of a snake step or a pointer click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Verdict that drove the step
    pub verdict: Verdict,
    /// Set when the step decided the race
    pub winner: Option<Winner>,
}

impl StepResult {
    fn continues(verdict: Verdict) -> Self {
        Self {
            verdict,
            winner: None,
        }
    }

    fn ends(verdict: Verdict, winner: Winner) -> Self {
        Self {
            verdict,
            winner: Some(winner),
        }
    }
}

/// Where a player stands in the word list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Index of the current word
    pub word: usize,
    /// Index of the next required letter in the current word
    pub letter: usize,
}

impl Progress {
    /// Count one consumed letter; returns true when the word is complete
    fn consume(&mut self, word_len: usize) -> bool {
        self.letter += 1;
        if self.letter >= word_len {
            self.letter = 0;
            self.word += 1;
            return true;
        }
        false
    }
}

/// State of one race between the snake and the pointer
#[derive(Debug, Clone)]
pub struct MatchEngine {
    words: Vec<Word>,
    snake: Snake,
    snake_progress: Progress,
    pointer_progress: Progress,
    ticks: u32,
    ticks_per_step: u32,
    /// Last direction received since the previous step
    pending: Action,
}

impl MatchEngine {
    /// Start a race over `words`
    pub fn new(words: Vec<Word>, field: PlayField, ticks_per_step: u32) -> Result<Self, GameError> {
        if words.is_empty() {
            return Err(GameError::Allocation("the word list is empty".to_string()));
        }

        Ok(Self {
            words,
            snake: Snake::initialize(field.snake_spawn, field.snake_heading, field),
            snake_progress: Progress::default(),
            pointer_progress: Progress::default(),
            ticks: 0,
            ticks_per_step: ticks_per_step.max(1),
            pending: Action::Continue,
        })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_progress(&self) -> Progress {
        self.snake_progress
    }

    pub fn pointer_progress(&self) -> Progress {
        self.pointer_progress
    }

    /// Word the snake is currently spelling
    pub fn snake_word(&self) -> Option<&Word> {
        self.words.get(self.snake_progress.word)
    }

    /// Word the pointer is currently spelling
    pub fn pointer_word(&self) -> Option<&Word> {
        self.words.get(self.pointer_progress.word)
    }

    /// Remember a direction for the next step; a later valid one replaces it.
    ///
    /// A reversal of the head's facing can never be applied, so it does not
    /// displace an earlier turn.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if direction.is_opposite(self.snake.head().facing) {
            return;
        }
        self.pending = Action::Move(direction);
    }

    /// Count a tick; every `ticks_per_step`-th tick moves the snake
    pub fn on_tick(&mut self) -> Option<StepResult> {
        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % self.ticks_per_step != 0 {
            return None;
        }
        Some(self.step())
    }

    /// Move the snake once and judge where its head landed
    pub fn step(&mut self) -> StepResult {
        if let Action::Move(direction) = std::mem::take(&mut self.pending) {
            self.snake.set_direction(direction);
        }
        self.snake.advance();

        let boundary = self.snake.test_boundary();
        if boundary.is_loss() {
            return StepResult::ends(boundary, Winner::Pointer);
        }

        let index = self.snake_progress.word;
        let Some(word) = self.words.get_mut(index) else {
            return StepResult::continues(Verdict::NoCollision);
        };

        let verdict = self.snake.test_collision(word, self.snake_progress.letter);
        match verdict {
            Verdict::NoCollision => StepResult::continues(verdict),
            Verdict::CorrectLetter => {
                let word_len = word.len();
                self.snake.grow();
                if self.snake_progress.consume(word_len) && self.snake_progress.word == self.words.len() {
                    return StepResult::ends(verdict, Winner::Snake);
                }
                StepResult::continues(verdict)
            }
            Verdict::WrongLetter | Verdict::CollisionFatal => StepResult::ends(verdict, Winner::Pointer),
        }
    }

    /// Judge a pointer click at the pointer's current position
    pub fn on_click(&mut self, pointer: &Pointer) -> StepResult {
        let index = self.pointer_progress.word;
        let Some(word) = self.words.get_mut(index) else {
            return StepResult::continues(Verdict::NoCollision);
        };

        let verdict = pointer.test_click_collision(word, self.pointer_progress.letter);
        match verdict {
            Verdict::NoCollision => StepResult::continues(verdict),
            Verdict::CorrectLetter => {
                let word_len = word.len();
                if self.pointer_progress.consume(word_len)
                    && self.pointer_progress.word == self.words.len()
                {
                    return StepResult::ends(verdict, Winner::Pointer);
                }
                StepResult::continues(verdict)
            }
            Verdict::WrongLetter | Verdict::CollisionFatal => StepResult::ends(verdict, Winner::Snake),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Coordinate;

    fn word(letters: &str, kbd: &[(i32, i32)], mouse: &[(i32, i32)]) -> Word {
        Word {
            targets: letters.chars().collect(),
            decoys: Vec::new(),
            kbd: kbd.iter().map(|&(x, y)| Coordinate::new(x, y)).collect(),
            mouse: mouse.iter().map(|&(x, y)| Coordinate::new(x, y)).collect(),
        }
    }

    fn engine(words: Vec<Word>) -> MatchEngine {
        MatchEngine::new(words, PlayField::default(), 4).unwrap()
    }

    fn pointer_at(x: i32, y: i32) -> Pointer {
        Pointer::at(Coordinate::new(x, y), PlayField::default())
    }

    #[test]
    fn test_empty_word_list_is_rejected() {
        let result = MatchEngine::new(Vec::new(), PlayField::default(), 4);
        assert!(matches!(result, Err(GameError::Allocation(_))));
    }

    #[test]
    fn test_snake_moves_every_fourth_tick() {
        let mut engine = engine(vec![word("A", &[(400, 100)], &[(600, 100)])]);

        assert_eq!(engine.on_tick(), None);
        assert_eq!(engine.on_tick(), None);
        assert_eq!(engine.on_tick(), None);
        assert_eq!(engine.snake().head().coord, Coordinate::new(0, 300));

        let result = engine.on_tick().unwrap();
        assert_eq!(result.verdict, Verdict::NoCollision);
        assert_eq!(engine.snake().head().coord, Coordinate::new(20, 300));
    }

    #[test]
    fn test_only_latest_direction_is_used() {
        let mut engine = engine(vec![word("A", &[(400, 100)], &[(600, 100)])]);
        engine.buffer_direction(Direction::Up);
        engine.buffer_direction(Direction::Down);
        engine.step();

        assert_eq!(engine.snake().head().coord, Coordinate::new(0, 320));

        // Without new input the snake keeps going down
        engine.step();
        assert_eq!(engine.snake().head().coord, Coordinate::new(0, 340));
    }

    #[test]
    fn test_reversal_does_not_replace_earlier_turn() {
        let mut engine = engine(vec![word("A", &[(400, 100)], &[(600, 100)])]);
        engine.buffer_direction(Direction::Up);
        engine.buffer_direction(Direction::Left);
        engine.step();

        assert_eq!(engine.snake().head().coord, Coordinate::new(0, 280));
    }

    #[test]
    fn test_snake_eats_letters_and_changes_word() {
        let mut engine = engine(vec![
            word("AB", &[(20, 300), (40, 300)], &[(600, 100), (620, 100)]),
            word("C", &[(100, 300)], &[(600, 100)]),
        ]);

        let result = engine.step();
        assert_eq!(result, StepResult::continues(Verdict::CorrectLetter));
        assert_eq!(engine.snake().len(), 2);
        assert_eq!(engine.snake_progress(), Progress { word: 0, letter: 1 });

        engine.step();
        assert_eq!(engine.snake_progress(), Progress { word: 1, letter: 0 });
        assert_eq!(engine.snake_word().unwrap().text(), "C");
        assert_eq!(engine.pointer_progress(), Progress::default());
    }

    #[test]
    fn test_snake_wins_after_last_word() {
        let mut engine = engine(vec![word("A", &[(20, 300)], &[(600, 100)])]);

        let result = engine.step();
        assert_eq!(result.winner, Some(Winner::Snake));
    }

    #[test]
    fn test_wrong_letter_hands_win_to_pointer() {
        let mut engine = engine(vec![word("AB", &[(200, 100), (20, 300)], &[(600, 100), (620, 100)])]);

        let result = engine.step();
        assert_eq!(result, StepResult::ends(Verdict::WrongLetter, Winner::Pointer));
    }

    #[test]
    fn test_leaving_the_field_hands_win_to_pointer() {
        let mut engine = engine(vec![word("A", &[(400, 100)], &[(600, 100)])]);
        engine.buffer_direction(Direction::Up);
        engine.step();
        engine.buffer_direction(Direction::Left);

        let result = engine.step();
        assert_eq!(result, StepResult::ends(Verdict::CollisionFatal, Winner::Pointer));
    }

    #[test]
    fn test_wall_beats_letter_on_the_wall() {
        let mut engine = engine(vec![word("A", &[(500, 300)], &[(600, 100)])]);

        for _ in 0..24 {
            assert_eq!(engine.step(), StepResult::continues(Verdict::NoCollision));
        }
        assert_eq!(engine.snake().head().coord, Coordinate::new(480, 300));

        let result = engine.step();
        assert_eq!(result, StepResult::ends(Verdict::CollisionFatal, Winner::Pointer));
        assert_eq!(engine.snake_progress(), Progress::default());
        assert_eq!(engine.snake().len(), 1);
    }

    #[test]
    fn test_pointer_spells_words() {
        let mut engine = engine(vec![
            word("AB", &[(400, 100)], &[(600, 100), (700, 100)]),
            word("C", &[(400, 140)], &[(520, 40)]),
        ]);

        assert_eq!(engine.on_click(&pointer_at(601, 101)).verdict, Verdict::CorrectLetter);
        assert_eq!(engine.pointer_progress(), Progress { word: 0, letter: 1 });
        assert_eq!(engine.on_click(&pointer_at(700, 100)).verdict, Verdict::CorrectLetter);
        assert_eq!(engine.pointer_word().unwrap().text(), "C");

        let result = engine.on_click(&pointer_at(520, 40));
        assert_eq!(result, StepResult::ends(Verdict::CorrectLetter, Winner::Pointer));
        assert_eq!(engine.snake_progress(), Progress::default());
    }

    #[test]
    fn test_pointer_wrong_letter_hands_win_to_snake() {
        let mut engine = engine(vec![word("AB", &[(400, 100)], &[(600, 100), (700, 100)])]);

        let result = engine.on_click(&pointer_at(700, 100));
        assert_eq!(result, StepResult::ends(Verdict::WrongLetter, Winner::Snake));
    }

    #[test]
    fn test_click_on_nothing_continues() {
        let mut engine = engine(vec![word("AB", &[(400, 100)], &[(600, 100), (700, 100)])]);

        let result = engine.on_click(&pointer_at(760, 500));
        assert_eq!(result, StepResult::continues(Verdict::NoCollision));
    }
}
