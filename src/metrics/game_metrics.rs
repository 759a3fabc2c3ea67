use std::time::{Duration, Instant};

use super::ScoreBoard;

/// Session-wide statistics, built once at startup and kept across rounds
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
    pub high_scores: ScoreBoard,
}

impl GameMetrics {
    pub fn new(high_score_capacity: usize) -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
            high_scores: ScoreBoard::new(high_score_capacity),
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        self.high_scores.record(final_score);
    }

    pub fn high_score(&self) -> u32 {
        self.high_scores.best().unwrap_or(0)
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
        Self::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::default();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_round_over_records_score() {
        let mut metrics = GameMetrics::default();

        metrics.on_round_over(10);
        assert_eq!(metrics.high_score(), 10);
        assert_eq!(metrics.rounds_played, 1);

        metrics.on_round_over(5);
        assert_eq!(metrics.high_score(), 10); // Should not decrease
        assert_eq!(metrics.rounds_played, 2);

        metrics.on_round_over(15);
        assert_eq!(metrics.high_score(), 15);
        assert_eq!(metrics.high_scores.top(), vec![15, 10, 5]);
    }

    #[test]
    fn test_round_start_resets_time() {
        let mut metrics = GameMetrics::default();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_round_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
