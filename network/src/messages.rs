// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire envelope and decoded server events
//!
//! Every message is one line of JSON: `{"event": "<name>", "payload": <json>}`.

use gridmark_core::{Board, RemoteTurn, WinLine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Server pushes a new authoritative board
pub const BOARD_EVENT: &str = "board";

/// Server pushes a new turn status
pub const TURN_STATE_EVENT: &str = "turn-state";

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {event:?} payload: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One event on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

impl Envelope {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }

    /// Encode as a single line, without the trailing newline
    pub fn to_line(&self) -> Result<String, MessageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_line(line: &str) -> Result<Self, MessageError> {
        Ok(serde_json::from_str(line.trim_end())?)
    }
}

/// Payload of a `board` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUpdate {
    pub board: Board,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default, rename = "winIndxs", skip_serializing_if = "Option::is_none")]
    pub win_line: Option<WinLine>,
}

/// Payload of a `turn-state` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnStateUpdate {
    pub outcome: String,
    #[serde(default, rename = "winIndxs", skip_serializing_if = "Option::is_none")]
    pub win_line: Option<WinLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_turn: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
}

impl From<TurnStateUpdate> for RemoteTurn {
    fn from(update: TurnStateUpdate) -> Self {
        RemoteTurn {
            outcome: update.outcome,
            my_turn: update.my_turn,
            game_over: update.game_over,
            win_line: update.win_line,
        }
    }
}

/// Decoded server-to-client event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Board(BoardUpdate),
    TurnState(TurnStateUpdate),
    /// An event this client does not handle
    Unknown { event: String },
}

impl ServerEvent {
    pub fn decode(envelope: Envelope) -> Result<Self, MessageError> {
        let Envelope { event, payload } = envelope;
        let decoded = match event.as_str() {
            BOARD_EVENT => serde_json::from_value(payload).map(ServerEvent::Board),
            TURN_STATE_EVENT => serde_json::from_value(payload).map(ServerEvent::TurnState),
            _ => return Ok(ServerEvent::Unknown { event }),
        };
        decoded.map_err(|source| MessageError::Payload { event, source })
    }

    pub fn from_line(line: &str) -> Result<Self, MessageError> {
        Self::decode(Envelope::from_line(line)?)
    }

    /// Event name as it appeared on the wire
    pub fn name(&self) -> &str {
        match self {
            ServerEvent::Board(_) => BOARD_EVENT,
            ServerEvent::TurnState(_) => TURN_STATE_EVENT,
            ServerEvent::Unknown { event } => event,
        }
    }
}
