use std::time::{Duration, Instant};

use blocktris_engine::{Command, Game, GameConfig, PieceSeed, Ticker};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::{
    tui::{App, Tui},
    ui::widgets::{GameDisplay, style},
};

const PLAYING_HELP: &str = "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Q (Quit)";
const GAME_OVER_HELP: &str = "Controls: Q (Quit)";

/// Maps a key to the engine command it triggers.
pub(crate) fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Down => Some(Command::SoftDrop),
        KeyCode::Up => Some(Command::Rotate),
        _ => None,
    }
}

#[derive(Debug)]
pub struct PlayApp {
    game: Game,
    tick_interval: Duration,
    block_size: u16,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(config: &GameConfig, seed: PieceSeed) -> Self {
        Self {
            game: Game::with_seed(config, seed),
            tick_interval: config.tick_interval(),
            block_size: config.block_size,
            is_exiting: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_ticker(Ticker::new(self.tick_interval, Instant::now()));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if !key.is_press() {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            code => {
                if let Some(command) = command_for_key(code) {
                    let outcome = self.game.apply(command);
                    tracing::trace!(%command, ?outcome, "command applied");
                }
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let display = GameDisplay::new(self.game.snapshot(), self.block_size);
        let help_text = if self.game.is_game_over() {
            GAME_OVER_HELP
        } else {
            PLAYING_HELP
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        self.game.tick();
        if self.game.is_game_over() {
            tui.stop_ticker();
        }
    }
}
