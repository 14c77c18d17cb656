use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::action::Direction;
use super::state::Coordinate;
use crate::error::GameError;

/// Inclusive range of grid-aligned cells, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl CellRange {
    /// All grid-aligned coordinates inside the range, row by row
    pub fn cells(&self, grid_unit: i32) -> Vec<Coordinate> {
        let align = |v: i32| (v + grid_unit - 1).div_euclid(grid_unit) * grid_unit;
        let mut cells = Vec::new();
        let mut y = align(self.min_y);
        while y <= self.max_y {
            let mut x = align(self.min_x);
            while x <= self.max_x {
                cells.push(Coordinate::new(x, y));
                x += grid_unit;
            }
            y += grid_unit;
        }
        cells
    }
}

/// Geometry of the two-halves play field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayField {
    /// Screen width in pixels
    pub width: i32,
    /// Screen height in pixels
    pub height: i32,
    /// x of the wall between the snake half (left) and the pointer half (right)
    pub middle_border: i32,
    /// Margin kept between the pointer and the screen edges while playing
    pub border_size: i32,
    /// Pixel step of letter placement and snake segments
    pub grid_unit: i32,

    pub snake_spawn: Coordinate,
    pub snake_heading: Direction,
    pub cursor_start: Coordinate,
    /// Extent of the cursor sprite, kept inside the field while playing
    pub cursor_size: i32,

    pub max_words: usize,
    pub decoy_count: usize,
    /// Minimum per-axis distance between a new word's letters and the snake's position
    pub spawn_separation: i32,

    pub snake_hit_tolerance: i32,
    pub pointer_hit_tolerance: i32,
    /// Largest per-axis pointer movement accepted from a single sample
    pub pointer_max_delta: i32,

    /// Where snake-side letters may be placed
    pub kbd_cells: CellRange,
    /// Where pointer-side letters and decoys may be placed
    pub mouse_cells: CellRange,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            middle_border: 495,
            border_size: 5,
            grid_unit: 20,
            snake_spawn: Coordinate::new(0, 300),
            snake_heading: Direction::Right,
            cursor_start: Coordinate::new(395, 270),
            cursor_size: 10,
            max_words: 20,
            decoy_count: 20,
            spawn_separation: 50,
            snake_hit_tolerance: 20,
            pointer_hit_tolerance: 16,
            pointer_max_delta: 10,
            kbd_cells: CellRange {
                min_x: 6,
                max_x: 474,
                min_y: 6,
                max_y: 579,
            },
            mouse_cells: CellRange {
                min_x: 500,
                max_x: 794,
                min_y: 6,
                max_y: 579,
            },
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Newline-delimited vocabulary, one word per line
    pub words_path: PathBuf,
    /// Append-only winner log
    pub winners_path: PathBuf,
    /// Frequency of the tick source
    pub tick_hz: u32,
    /// Ticks between two snake steps
    pub ticks_per_step: u32,
    /// How long the outcome screen stays up
    pub outcome_secs: u64,
    /// Fixed seed for letter placement; random when absent
    pub seed: Option<u64>,
    pub field: PlayField,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            words_path: PathBuf::from("res/words.txt"),
            winners_path: PathBuf::from("res/winners.txt"),
            tick_hz: 60,
            ticks_per_step: 4,
            outcome_secs: 5,
            seed: None,
            field: PlayField::default(),
        }
    }
}

impl GameConfig {
    /// Load a YAML configuration, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(GameError::Resource {
                    what: path.display().to_string(),
                    source,
                })
            }
        };

        let config: Self = serde_yaml_ng::from_str(&content)
            .map_err(|e| GameError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engines cannot work with
    pub fn validate(&self) -> Result<(), GameError> {
        if self.tick_hz == 0 {
            return Err(GameError::Config("tick_hz must be positive".to_string()));
        }
        if self.ticks_per_step == 0 {
            return Err(GameError::Config("ticks_per_step must be positive".to_string()));
        }
        self.field.validate()
    }
}

impl PlayField {
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("grid_unit", self.grid_unit),
            ("pointer_max_delta", self.pointer_max_delta),
            ("snake_hit_tolerance", self.snake_hit_tolerance),
            ("pointer_hit_tolerance", self.pointer_hit_tolerance),
        ];
        for (name, value) in positive {
            if value <= 0 {
                return Err(GameError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.border_size < 0 || self.cursor_size < 0 {
            return Err(GameError::Config(format!(
                "border_size and cursor_size must be non-negative, got {} and {}",
                self.border_size, self.cursor_size
            )));
        }

        if !(0..self.width).contains(&self.middle_border) {
            return Err(GameError::Config(format!(
                "middle_border must lie inside the field, got {}",
                self.middle_border
            )));
        }

        // The pointer's play area must not collapse
        if self.middle_border + self.border_size > self.width - self.border_size - self.cursor_size
            || self.border_size > self.height - self.border_size - self.cursor_size
        {
            return Err(GameError::Config(
                "no room for the pointer between the borders".to_string(),
            ));
        }

        for (name, range) in [("kbd_cells", self.kbd_cells), ("mouse_cells", self.mouse_cells)] {
            if range.cells(self.grid_unit).is_empty() {
                return Err(GameError::Config(format!("{name} holds no grid cell")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.tick_hz, 60);
        assert_eq!(config.ticks_per_step, 4);
        assert_eq!(config.field.middle_border, 495);
        assert_eq!(config.field.snake_spawn, Coordinate::new(0, 300));
    }

    #[test]
    fn test_kbd_cells_are_grid_aligned() {
        let field = PlayField::default();
        let cells = field.kbd_cells.cells(field.grid_unit);

        assert_eq!(cells.first(), Some(&Coordinate::new(20, 20)));
        assert_eq!(cells.last(), Some(&Coordinate::new(460, 560)));
        assert_eq!(cells.len(), 23 * 28);
        assert!(cells.iter().all(|c| c.x % 20 == 0 && c.y % 20 == 0));
    }

    #[test]
    fn test_mouse_cells_stay_right_of_middle() {
        let field = PlayField::default();
        let cells = field.mouse_cells.cells(field.grid_unit);

        assert_eq!(cells.first(), Some(&Coordinate::new(500, 20)));
        assert_eq!(cells.last(), Some(&Coordinate::new(780, 560)));
        assert!(cells.iter().all(|c| c.x > field.middle_border));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GameConfig::load(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_hz: 30\nseed: 7\nfield:\n  decoy_count: 5").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.tick_hz, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.field.decoy_count, 5);
        assert_eq!(config.field.grid_unit, 20);
    }

    fn load_yaml(yaml: &str) -> Result<GameConfig, GameError> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{yaml}").unwrap();
        GameConfig::load(file.path())
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_rejects_zero_grid_unit() {
        assert!(matches!(
            load_yaml("field:\n  grid_unit: 0"),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_load_rejects_negative_pointer_delta() {
        assert!(matches!(
            load_yaml("field:\n  pointer_max_delta: -10"),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_load_rejects_non_positive_values() {
        for yaml in [
            "field:\n  width: 0",
            "field:\n  height: -600",
            "field:\n  snake_hit_tolerance: 0",
            "field:\n  pointer_hit_tolerance: -1",
            "tick_hz: 0",
            "ticks_per_step: 0",
        ] {
            assert!(
                matches!(load_yaml(yaml), Err(GameError::Config(_))),
                "accepted {yaml:?}"
            );
        }
    }

    #[test]
    fn test_load_rejects_empty_cell_ranges() {
        let empty_kbd = "field:\n  kbd_cells: {min_x: 100, max_x: 50, min_y: 6, max_y: 579}";
        assert!(matches!(load_yaml(empty_kbd), Err(GameError::Config(_))));

        // Non-empty bounds, but no grid-aligned cell inside
        let no_cell = "field:\n  mouse_cells: {min_x: 501, max_x: 510, min_y: 6, max_y: 579}";
        assert!(matches!(load_yaml(no_cell), Err(GameError::Config(_))));
    }

    #[test]
    fn test_load_rejects_cramped_pointer_area() {
        assert!(matches!(
            load_yaml("field:\n  middle_border: 790"),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_hz: [not a number").unwrap();

        assert!(matches!(
            GameConfig::load(file.path()),
            Err(GameError::Config(_))
        ));
    }
}
