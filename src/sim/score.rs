//! Per-side point counters

use serde::{Deserialize, Serialize};

use super::state::Side;

/// Two monotonically increasing counters. No win condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    left: u32,
    right: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.saturating_add(1),
            Side::Right => self.right = self.right.saturating_add(1),
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Read-only (left, right) snapshot for display
    pub fn render_state(&self) -> (u32, u32) {
        (self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_per_side() {
        let mut score = ScoreTracker::new();
        assert_eq!(score.render_state(), (0, 0));
        score.increment(Side::Left);
        score.increment(Side::Right);
        score.increment(Side::Right);
        assert_eq!(score.render_state(), (1, 2));
        assert_eq!(score.get(Side::Right), 2);
    }
}
