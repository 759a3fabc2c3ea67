//! Best scores seen during this process
//!
//! Scores live only as long as the process; nothing is written to disk.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Bounded set of the highest round scores
///
/// Backed by a min-heap: the smallest kept score sits on top, so a new
/// score only has to beat it to get in.
///
/// # Example
///
/// ```rust
/// use arena_snake::metrics::ScoreBoard;
///
/// let mut board = ScoreBoard::new(3);
/// for score in [4, 9, 1, 7] {
///     board.record(score);
/// }
///
/// assert_eq!(board.top(), vec![9, 7, 4]);
/// assert_eq!(board.best(), Some(9));
/// ```
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    heap: BinaryHeap<Reverse<u32>>,
    capacity: usize,
}

impl ScoreBoard {
    /// Create an empty board keeping at most `capacity` scores
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Add a finished round's score, evicting the lowest when over capacity
    pub fn record(&mut self, score: u32) {
        self.heap.push(Reverse(score));
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    /// Kept scores, highest first
    pub fn top(&self) -> Vec<u32> {
        let mut scores: Vec<u32> = self.heap.iter().map(|Reverse(score)| *score).collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores
    }

    pub fn best(&self) -> Option<u32> {
        self.heap.iter().map(|Reverse(score)| *score).max()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new(5)
    }
}
