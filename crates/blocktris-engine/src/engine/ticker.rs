use std::time::{Duration, Instant};

use rand::Rng;

use super::game::{Game, TickOutcome};

/// Fixed-interval gravity clock.
///
/// The ticker never reads the clock itself; callers pass `now`, so it works
/// equally with [`Instant::now`] and with a virtual clock.
///
/// A tick is due once `interval` has elapsed since the previous one. Firing
/// restarts the interval from `now`: late ticks shift the schedule and missed
/// ticks are not replayed. Once disarmed it never fires again.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use blocktris_engine::Ticker;
///
/// let start = Instant::now();
/// let mut ticker = Ticker::new(Duration::from_millis(500), start);
///
/// assert!(!ticker.poll(start + Duration::from_millis(499)));
/// assert!(ticker.poll(start + Duration::from_millis(500)));
/// assert_eq!(
///     ticker.next_deadline(),
///     Some(start + Duration::from_millis(1000))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last: Instant,
    armed: bool,
}

impl Ticker {
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
            armed: true,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Instant at which the next tick becomes due, or `None` once disarmed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.then(|| self.last + self.interval)
    }

    /// Returns `true`, and restarts the interval, if a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.armed || now.saturating_duration_since(self.last) < self.interval {
            return false;
        }
        self.last = now;
        true
    }

    /// Ticks `game` if a tick is due at `now`.
    ///
    /// The ticker disarms itself as soon as the game is over, so from then on
    /// this always returns `None`.
    pub fn drive<R>(&mut self, game: &mut Game<R>, now: Instant) -> Option<TickOutcome>
    where
        R: Rng,
    {
        if game.is_game_over() {
            self.disarm();
            return None;
        }
        if !self.poll(now) {
            return None;
        }
        let outcome = game.tick();
        if game.is_game_over() {
            tracing::debug!("game over, gravity stopped");
            self.disarm();
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use crate::{BlockColor, Board, GameConfig, ShapeCatalog, engine::catalog::ZeroRng};

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_poll_fires_after_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);
        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + ms(499)));
        assert!(ticker.poll(start + ms(500)));
        assert!(!ticker.poll(start + ms(500)));
        assert!(ticker.poll(start + ms(1000)));
    }

    #[test]
    fn test_late_tick_shifts_schedule_without_catch_up() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);

        // three intervals late: one tick, not three
        assert!(ticker.poll(start + ms(1600)));
        assert!(!ticker.poll(start + ms(1600)));
        assert!(!ticker.poll(start + ms(2000)));
        assert_eq!(ticker.next_deadline(), Some(start + ms(2100)));
        assert!(ticker.poll(start + ms(2100)));
    }

    #[test]
    fn test_clock_going_backwards_does_not_fire() {
        let start = Instant::now() + ms(1000);
        let mut ticker = Ticker::new(INTERVAL, start);
        assert!(!ticker.poll(start - ms(800)));
    }

    #[test]
    fn test_disarmed_ticker_never_fires() {
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);
        ticker.disarm();
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(start + ms(10_000)));
        assert_eq!(ticker.next_deadline(), None);
    }

    #[test]
    fn test_drive_ticks_game_when_due() {
        let mut game = Game::with_catalog(
            &GameConfig::default(),
            ShapeCatalog::with_rng(ZeroRng, BlockColor::ALL.to_vec()),
        );
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);

        assert_eq!(ticker.drive(&mut game, start + ms(100)), None);
        assert_eq!(game.stats().ticks(), 0);
        assert_eq!(
            ticker.drive(&mut game, start + ms(500)),
            Some(TickOutcome::Moved)
        );
        assert_eq!(game.active_piece().y(), 1);
        assert_eq!(game.stats().ticks(), 1);
    }

    #[test]
    fn test_drive_disarms_at_game_over() {
        let mut board = Board::new(20, 10);
        for row in 2..20 {
            board.fill_row_except(row, BlockColor::Green, &[0]);
        }
        let mut game =
            Game::from_board(board, ShapeCatalog::with_rng(ZeroRng, BlockColor::ALL.to_vec()));
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);

        let mut now = start;
        let mut outcomes = vec![];
        for _ in 0..5 {
            now += INTERVAL;
            outcomes.extend(ticker.drive(&mut game, now));
        }
        assert_eq!(outcomes, vec![TickOutcome::ToppedOut { cleared_lines: 0 }]);
        assert!(!ticker.is_armed());
        assert_eq!(ticker.next_deadline(), None);
        assert_eq!(game.stats().ticks(), 1);
    }

    #[test]
    fn test_drive_on_finished_game_disarms() {
        let mut board = Board::new(20, 10);
        board.fill_row_except(1, BlockColor::Green, &[0]);
        let mut game =
            Game::from_board(board, ShapeCatalog::with_rng(ZeroRng, BlockColor::ALL.to_vec()));
        let start = Instant::now();
        let mut ticker = Ticker::new(INTERVAL, start);
        assert_eq!(ticker.drive(&mut game, start + INTERVAL), None);
        assert!(!ticker.is_armed());
    }
}
