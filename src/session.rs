//! Turn-by-turn game driver.
//!
//! A [`Session`] owns the authoritative game state, one agent per color,
//! and the win/tie tally across games played in it.

use anyhow::Context;
use log::{debug, info};

use crate::board::Color;
use crate::engine::Agent;
use crate::game::{GameState, Move, Outcome};
use crate::metrics::Tally;

/// What happened on one call to [`Session::play_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Moved { color: Color, pos: Move },
    Passed(Color),
    Finished(Outcome),
}

pub struct Session {
    state: GameState,
    first: Color,
    light: Box<dyn Agent>,
    dark: Box<dyn Agent>,
    tally: Tally,
}

impl Session {
    pub fn new(first: Color, light: Box<dyn Agent>, dark: Box<dyn Agent>) -> Self {
        Self {
            state: GameState::new(first),
            first,
            light,
            dark,
            tally: Tally::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn agent(&self, color: Color) -> &dyn Agent {
        match color {
            Color::Light => self.light.as_ref(),
            Color::Dark => self.dark.as_ref(),
        }
    }

    fn agent_mut(&mut self, color: Color) -> &mut dyn Agent {
        match color {
            Color::Light => self.light.as_mut(),
            Color::Dark => self.dark.as_mut(),
        }
    }

    /// Start a new game. The tally is kept.
    pub fn reset(&mut self) {
        self.state = GameState::new(self.first);
    }

    /// Advance the game by one turn.
    ///
    /// A finished game is recorded in the tally each time this reports
    /// [`Turn::Finished`], so callers should stop or [`reset`](Self::reset).
    pub fn play_turn(&mut self) -> anyhow::Result<Turn> {
        if let Some(outcome) = self.state.game_over() {
            let (light, dark) = self.state.score();
            info!("{outcome} (light {light}, dark {dark})");
            self.tally.record(outcome);
            return Ok(Turn::Finished(outcome));
        }

        let color = self.state.to_move;
        if !self.state.has_legal_move() {
            debug!("{color} has no legal move, passing");
            self.state.switch_side();
            return Ok(Turn::Passed(color));
        }

        let state = self.state;
        let choice = self
            .agent_mut(color)
            .choose_move(&state)
            .with_context(|| format!("{color} failed to choose a move"))?;

        match choice {
            Some(pos) => {
                self.state
                    .play(pos)
                    .with_context(|| format!("{color} chose illegal move {pos}"))?;
                Ok(Turn::Moved { color, pos })
            }
            None => {
                self.state.switch_side();
                Ok(Turn::Passed(color))
            }
        }
    }

    /// Play turns until the game ends.
    pub fn play_game(&mut self) -> anyhow::Result<Outcome> {
        loop {
            if let Turn::Finished(outcome) = self.play_turn()? {
                return Ok(outcome);
            }
        }
    }
}
