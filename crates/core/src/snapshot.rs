//! Game snapshot - a plain copy of the field and scores for rendering.
//!
//! `GameSession::snapshot_into` refills an existing snapshot in place, so a
//! render loop can reuse one value for the whole game.

use crate::session::{GameOutcome, SessionState};
use crate::types::{Cell, Direction, PlayerId, Pos};

/// Renderable copy of a session, handed to the view every frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub height: u16,
    pub width: u16,
    /// Row-major cells, `height * width` long
    pub cells: Vec<Cell>,
    /// Facing direction per player, for head glyphs
    pub directions: [Option<Direction>; 2],
    pub scores: [u32; 2],
    pub two_players: bool,
    pub state: SessionState,
    pub outcome: Option<GameOutcome>,
    pub delay_ms: u32,
}

impl GameSnapshot {
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        if pos.row >= self.height || pos.col >= self.width {
            return None;
        }
        self.cells
            .get(pos.row as usize * self.width as usize + pos.col as usize)
            .copied()
    }

    pub fn direction(&self, player: PlayerId) -> Option<Direction> {
        self.directions[player.index()]
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player.index()]
    }

    pub fn paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.state == SessionState::Ended
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }
}
