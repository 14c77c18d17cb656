//! Core game logic
//!
//! Everything needed to run a race between the snake and the pointer, without
//! any I/O or rendering dependencies: level generation, both engines, and the
//! per-session match state.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod pointer;
pub mod snake;
pub mod state;
pub mod words;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use collision::Verdict;
pub use config::{CellRange, GameConfig, PlayField};
pub use engine::{MatchEngine, Progress, StepResult};
pub use pointer::{Bounds, Pointer};
pub use snake::Snake;
pub use state::{Coordinate, SnakeSegment, Winner, Word};
pub use words::{FileVocabulary, Vocabulary, WordGenerator};
