use serde::Serialize;

/// Per-game counters.
///
/// There is no score or level; the counters only describe what happened:
///
/// - **Ticks**: gravity steps processed while the game was running
/// - **Locked pieces**: pieces written into the board
/// - **Cleared lines**: rows removed in total
/// - **Line clear distribution**: how many locks cleared 0, 1, 2, 3 or 4 rows
///
/// # Example
///
/// ```
/// use blocktris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_tick();
/// stats.record_lock(2);
///
/// assert_eq!(stats.ticks(), 1);
/// assert_eq!(stats.locked_pieces(), 1);
/// assert_eq!(stats.cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    ticks: u64,
    locked_pieces: usize,
    cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            locked_pieces: 0,
            cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns a histogram of locks by number of rows cleared.
    ///
    /// Index `n` counts the locks that cleared exactly `n` rows. A shape is
    /// at most 4 cells tall, so no lock can clear more.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    pub const fn record_tick(&mut self) {
        self.ticks += 1;
    }

    /// Updates the counters after a piece was locked.
    pub const fn record_lock(&mut self, cleared_lines: usize) {
        self.locked_pieces += 1;
        self.cleared_lines += cleared_lines;
        if cleared_lines < self.line_cleared_counter.len() {
            self.line_cleared_counter[cleared_lines] += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        assert_eq!(GameStats::new(), GameStats::default());
        assert_eq!(GameStats::new().line_cleared_counter(), &[0; 5]);
    }

    #[test]
    fn test_record_lock_accumulates() {
        let mut stats = GameStats::new();
        stats.record_lock(0);
        stats.record_lock(1);
        stats.record_lock(4);
        stats.record_lock(1);
        assert_eq!(stats.locked_pieces(), 4);
        assert_eq!(stats.cleared_lines(), 6);
        assert_eq!(stats.line_cleared_counter(), &[1, 2, 0, 0, 1]);
    }

    #[test]
    fn test_serialization() {
        let mut stats = GameStats::new();
        stats.record_tick();
        stats.record_lock(1);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ticks": 1,
                "locked_pieces": 1,
                "cleared_lines": 1,
                "line_cleared_counter": [0, 1, 0, 0, 0],
            })
        );
    }
}
