use std::time::{Duration, Instant};

/// Session statistics shown next to the board.
///
/// Play time only runs while a game is live; pauses and the game-over screen
/// do not count.
pub struct GameMetrics {
    running_since: Option<Instant>,
    banked: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.banked + self.running_since.map_or(Duration::ZERO, |since| since.elapsed())
    }

    pub fn on_game_start(&mut self) {
        self.banked = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    pub fn on_pause(&mut self) {
        self.bank();
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.bank();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }

    fn bank(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// mm:ss, minutes unbounded
fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
