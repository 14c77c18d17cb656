//! Word/level generation
//!
//! Turns vocabulary lines into [`Word`]s with letters placed on both halves of
//! the field. Placement draws from a shuffled list of free grid cells, so a
//! seeded RNG always reproduces the same level.

use rand::seq::SliceRandom;
use rand::Rng;
use std::path::PathBuf;

use super::config::PlayField;
use super::state::{Coordinate, Word};
use crate::error::GameError;

/// Source of vocabulary lines, consumed once per play session
pub trait Vocabulary {
    fn lines(&self) -> Result<Vec<String>, GameError>;
}

/// Newline-delimited word file
#[derive(Debug, Clone)]
pub struct FileVocabulary {
    path: PathBuf,
}

impl FileVocabulary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Vocabulary for FileVocabulary {
    fn lines(&self) -> Result<Vec<String>, GameError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| GameError::Resource {
            what: self.path.display().to_string(),
            source,
        })?;
        Ok(content.lines().map(str::to_owned).collect())
    }
}

impl Vocabulary for Vec<String> {
    fn lines(&self) -> Result<Vec<String>, GameError> {
        Ok(self.clone())
    }
}

pub struct WordGenerator {
    field: PlayField,
}

impl WordGenerator {
    pub fn new(field: PlayField) -> Self {
        Self { field }
    }

    /// Build the word list for one session.
    ///
    /// Only the first `max_words` source lines are read; blank ones among
    /// them are skipped. Words keep source order.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        lines: &[String],
        rng: &mut R,
    ) -> Result<Vec<Word>, GameError> {
        let mut words: Vec<Word> = Vec::new();
        let mut anchor = self.field.snake_spawn;

        for line in lines
            .iter()
            .take(self.field.max_words)
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
        {
            let word = self.place_word(line, anchor, rng)?;
            if let Some(last) = word.last_kbd() {
                anchor = last;
            }
            words.push(word);
        }

        Ok(words)
    }

    fn place_word<R: Rng + ?Sized>(
        &self,
        line: &str,
        anchor: Coordinate,
        rng: &mut R,
    ) -> Result<Word, GameError> {
        // One letter per source character, even where full case mapping expands
        let targets: Vec<char> = line
            .chars()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .collect();
        let separation = self.field.spawn_separation;

        let kbd_free: Vec<Coordinate> = self
            .field
            .kbd_cells
            .cells(self.field.grid_unit)
            .into_iter()
            .filter(|c| (c.x - anchor.x).abs() >= separation && (c.y - anchor.y).abs() >= separation)
            .collect();
        let kbd = sample_cells(kbd_free, targets.len(), rng)
            .ok_or_else(|| GameError::Allocation(format!("no room for \"{}\" on the snake side", line)))?;

        let mouse_len = targets.len() + self.field.decoy_count;
        let mouse = sample_cells(self.field.mouse_cells.cells(self.field.grid_unit), mouse_len, rng)
            .ok_or_else(|| GameError::Allocation(format!("no room for \"{}\" on the pointer side", line)))?;

        let decoys = (0..self.field.decoy_count)
            .map(|_| rng.gen_range(b'A'..=b'Z') as char)
            .collect();

        Ok(Word {
            targets,
            decoys,
            kbd,
            mouse,
        })
    }
}

/// Draw `count` distinct cells, or None when there are not enough
fn sample_cells<R: Rng + ?Sized>(
    mut cells: Vec<Coordinate>,
    count: usize,
    rng: &mut R,
) -> Option<Vec<Coordinate>> {
    if cells.len() < count {
        return None;
    }
    let (picked, _) = cells.partial_shuffle(rng, count);
    Some(picked.to_vec())
}
