pub mod game_metrics;
pub mod score_board;

pub use game_metrics::GameMetrics;
pub use score_board::ScoreBoard;
