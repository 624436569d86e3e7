use std::{
    io,
    time::{Duration, Instant},
};

use blocktris_engine::Ticker;
use crossterm::event;

use crate::tui::event::TuiEvent;

/// Event loop state management.
///
/// Emits `Tick` whenever the installed [`Ticker`] fires, and `Render` once
/// after every tick or terminal event. Without a ticker, or once it is
/// disarmed, only terminal events wake the loop.
#[derive(Debug)]
pub(super) struct EventLoop {
    ticker: Option<Ticker>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            ticker: None,
            dirty: true, // Initial render is required on startup
        }
    }

    pub(super) fn set_ticker(&mut self, ticker: Option<Ticker>) {
        self.ticker = ticker;
    }

    pub(super) fn ticker_mut(&mut self) -> Option<&mut Ticker> {
        self.ticker.as_mut()
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick is due, a render is pending or a crossterm event
    /// occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.pending_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn pending_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(ticker) = &mut self.ticker
            && ticker.poll(now)
        {
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }
        if self.dirty {
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.ticker.as_ref().and_then(Ticker::next_deadline)?;
        Some(next_tick_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn test_initial_render_then_tick_then_render() {
        let start = Instant::now();
        let mut events = EventLoop::new();
        events.set_ticker(Some(Ticker::new(INTERVAL, start)));

        assert!(events.pending_event(start).unwrap().is_render());
        assert!(events.pending_event(start).is_none());

        let later = start + INTERVAL;
        assert!(events.pending_event(later).unwrap().is_tick());
        assert!(events.pending_event(later).unwrap().is_render());
        assert!(events.pending_event(later).is_none());
    }

    #[test]
    fn test_timeout_follows_ticker_deadline() {
        let start = Instant::now();
        let mut events = EventLoop::new();
        assert_eq!(events.compute_timeout(start), None);

        events.set_ticker(Some(Ticker::new(INTERVAL, start)));
        assert_eq!(
            events.compute_timeout(start + Duration::from_millis(200)),
            Some(Duration::from_millis(300))
        );
        assert_eq!(
            events.compute_timeout(start + Duration::from_secs(2)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_disarmed_ticker_stops_ticks() {
        let start = Instant::now();
        let mut events = EventLoop::new();
        events.set_ticker(Some(Ticker::new(INTERVAL, start)));
        events.ticker_mut().unwrap().disarm();

        let later = start + INTERVAL * 10;
        assert!(events.pending_event(later).unwrap().is_render());
        assert!(events.pending_event(later).is_none());
        assert_eq!(events.compute_timeout(later), None);
    }
}
