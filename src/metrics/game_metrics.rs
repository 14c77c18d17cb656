use std::time::{Duration, Instant};

use crate::game::Winner;

/// Session clock and win tally shown in the status bar
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub snake_wins: u32,
    pub pointer_wins: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            snake_wins: 0,
            pointer_wins: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, winner: Winner) {
        self.update();
        self.games_played += 1;
        match winner {
            Winner::Snake => self.snake_wins += 1,
            Winner::Pointer => self.pointer_wins += 1,
        }
    }

    pub fn wins(&self, side: Winner) -> u32 {
        match side {
            Winner::Snake => self.snake_wins,
            Winner::Pointer => self.pointer_wins,
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
