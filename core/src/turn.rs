// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn state machine
//!
//! ```text
//!   MyTurn ──dispatch──▶ WaitingForOpponent ──remote──▶ MyTurn | GameOver
//! ```
//!
//! Only a successful local move takes `MyTurn` to `WaitingForOpponent`.
//! Every other transition comes from the remote authority. `GameOver` is
//! terminal.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::WinLine;

/// Outcome message shown after a local move has been sent
pub const WAITING_FOR_OPPONENT: &str = "Waiting for another player to move";

/// Outcome message shown when the local player may move
pub const YOUR_TURN: &str = "Your turn";

/// Whose turn it is, plus the message to show for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    /// The local player may move
    MyTurn { outcome: String },
    /// A move was sent; the opponent is to play
    WaitingForOpponent { outcome: String },
    /// The remote authority ended the game
    GameOver {
        outcome: String,
        win_line: Option<WinLine>,
    },
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState::MyTurn {
            outcome: YOUR_TURN.to_string(),
        }
    }
}

/// Turn update delivered by the remote authority
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteTurn {
    pub outcome: String,
    /// `Some(true)` hands the turn to the local player
    pub my_turn: Option<bool>,
    pub game_over: Option<bool>,
    pub win_line: Option<WinLine>,
}

impl TurnState {
    /// State entered after a local move was handed to the transport
    pub fn waiting() -> Self {
        TurnState::WaitingForOpponent {
            outcome: WAITING_FOR_OPPONENT.to_string(),
        }
    }

    pub fn outcome(&self) -> &str {
        match self {
            TurnState::MyTurn { outcome }
            | TurnState::WaitingForOpponent { outcome }
            | TurnState::GameOver { outcome, .. } => outcome,
        }
    }

    pub fn win_line(&self) -> Option<WinLine> {
        match self {
            TurnState::GameOver { win_line, .. } => *win_line,
            _ => None,
        }
    }

    pub fn is_my_turn(&self) -> bool {
        matches!(self, TurnState::MyTurn { .. })
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, TurnState::GameOver { .. })
    }

    /// Fold a remote update into the state
    ///
    /// A win line or `game_over` ends the game. Otherwise `my_turn` picks the
    /// side to move; when it is absent the current side is kept and only the
    /// message changes. Returns true if the state changed.
    pub fn apply_remote(&mut self, update: RemoteTurn) -> bool {
        if self.is_game_over() {
            debug!(outcome = %update.outcome, "Ignoring turn update after game over");
            return false;
        }

        let RemoteTurn {
            outcome,
            my_turn,
            game_over,
            win_line,
        } = update;

        let next = if game_over.unwrap_or(false) || win_line.is_some() {
            TurnState::GameOver { outcome, win_line }
        } else {
            match my_turn {
                Some(true) => TurnState::MyTurn { outcome },
                Some(false) => TurnState::WaitingForOpponent { outcome },
                None if self.is_my_turn() => TurnState::MyTurn { outcome },
                None => TurnState::WaitingForOpponent { outcome },
            }
        };

        if *self == next {
            return false;
        }
        debug!(from = ?self, to = ?next, "Turn state updated by remote");
        *self = next;
        true
    }

    /// Setter payload form of the state
    pub fn payload(&self) -> TurnPayload {
        TurnPayload {
            outcome: self.outcome().to_string(),
            win_indxs: self.win_line(),
        }
    }
}

/// `{ "outcome": ..., "winIndxs"?: [[r, c], [r, c]] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnPayload {
    pub outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_indxs: Option<WinLine>,
}

impl From<&TurnState> for TurnPayload {
    fn from(state: &TurnState) -> Self {
        state.payload()
    }
}
