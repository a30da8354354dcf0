use std::time::{Duration, Instant};

/// Session-level counters shown in the TUI header
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Best score seen, seeded from the save file at startup
    pub high_score: u32,
    pub games_played: u32,
    /// Times the rival train has died across the whole session
    pub rival_deaths: u32,
}

impl GameMetrics {
    /// Fresh metrics with the persisted high score carried in
    pub fn new(high_score: u32) -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score,
            games_played: 0,
            rival_deaths: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record a finished run. Returns true when the score set a new high.
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
            true
        } else {
            false
        }
    }

    pub fn on_rival_death(&mut self) {
        self.rival_deaths += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
