//! Match lifecycle around the frame driver: weapon selection, start,
//! per-frame advance, game over and rematch.

use tracing::info;

use crate::error::ConfigError;
use crate::init::{create_initial_state, validate_config};
use crate::step::step;
use crate::types::*;

/// Number of stage colour themes the renderer cycles through on rematch.
pub const THEME_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct Session {
    config: MatchConfig,
    phase: Phase,
    state: Option<GameState>,
    prev_inputs: [PlayerInput; 2],
    theme: usize,
}

impl Session {
    /// Validate the config once; everything after this is infallible.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        validate_config(&config)?;
        Ok(Session {
            config,
            phase: Phase::Menu,
            state: None,
            prev_inputs: [NULL_INPUT; 2],
            theme: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current match, if one has been started.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn theme(&self) -> usize {
        self.theme
    }

    pub fn selection(&self) -> [Weapon; 2] {
        [self.config.players[0].weapon, self.config.players[1].weapon]
    }

    /// Pick a weapon for the next match. Only honoured between matches.
    pub fn select_weapon(&mut self, player: PlayerId, weapon: Weapon) -> Option<Cue> {
        if self.phase == Phase::Playing {
            return None;
        }
        let setup = self.config.players.get_mut(player)?;
        setup.weapon = weapon;
        Some(Cue::Click)
    }

    /// Start a fresh match from the current selection.
    pub fn start(&mut self) -> Option<Cue> {
        match self.phase {
            Phase::Playing => return None,
            Phase::GameOver => self.theme = (self.theme + 1) % THEME_COUNT,
            Phase::Menu => {}
        }
        info!(selection = ?self.selection(), theme = self.theme, "match started");
        self.state = Some(create_initial_state(&self.config));
        self.prev_inputs = [NULL_INPUT; 2];
        self.phase = Phase::Playing;
        Some(Cue::Click)
    }

    /// Play again after a finished match.
    pub fn rematch(&mut self) -> Option<Cue> {
        if self.phase != Phase::GameOver {
            return None;
        }
        self.start()
    }

    /// Run one frame while playing. Moves to game over once the referee calls it.
    pub fn advance(&mut self, inputs: [PlayerInput; 2]) -> Option<&GameState> {
        if self.phase != Phase::Playing {
            return None;
        }
        let prev = self.state.as_ref()?;
        let next = step(prev, &inputs, &self.prev_inputs, &self.config);
        self.prev_inputs = inputs;
        if next.match_over {
            self.phase = Phase::GameOver;
        }
        self.state = Some(next);
        self.state.as_ref()
    }

    /// Display name of the winner once the match is over.
    pub fn winner_name(&self) -> Option<&str> {
        let winner = self.state.as_ref()?.winner?;
        Some(self.config.players[winner].name.as_str())
    }
}
