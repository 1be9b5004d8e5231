// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local move legality guard and move emission

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::board::Board;
use crate::turn::TurnState;
use crate::CellIndex;

/// Event name of an outbound move
pub const TURN_EVENT: &str = "turn";

/// Failure to hand an event to the transport
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The connection is gone
    #[error("Transport closed")]
    Closed,
}

/// Outbound event channel to the game server
///
/// `emit` is fire-and-forget: `Ok` means the event was handed off, not that
/// the server received it.
pub trait Transport {
    fn emit(&mut self, event: &str, payload: Value) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn emit(&mut self, event: &str, payload: Value) -> Result<(), TransportError> {
        (**self).emit(event, payload)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn emit(&mut self, event: &str, payload: Value) -> Result<(), TransportError> {
        (**self).emit(event, payload)
    }
}

/// Caller-owned turn state setter
pub trait TurnStateSink {
    fn set_turn_state(&mut self, state: TurnState);
}

impl<F: FnMut(TurnState)> TurnStateSink for F {
    fn set_turn_state(&mut self, state: TurnState) {
        self(state)
    }
}

/// Why a move was not sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    GameOver,
    Occupied,
    OutOfBounds,
    TransportClosed,
}

/// Result of a dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The move was emitted with this linear cell index
    Sent { index: usize },
    Rejected(RejectReason),
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent { .. })
    }
}

/// Validates a selected cell and forwards it as a move
#[derive(Debug, Clone)]
pub struct MoveDispatcher {
    event: String,
}

impl Default for MoveDispatcher {
    fn default() -> Self {
        Self {
            event: TURN_EVENT.to_string(),
        }
    }
}

impl MoveDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit moves under a different event name
    pub fn with_event(event: impl Into<String>) -> Self {
        Self { event: event.into() }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    /// Send a move for `cell` if it is legal locally
    ///
    /// A finished game or an occupied cell is a silent no-op. On success the
    /// linear index `row * N + col` is emitted once and the sink is set to
    /// [`TurnState::waiting`] once. The board itself is never touched; the
    /// authoritative update arrives from the server.
    pub fn dispatch<T, S>(
        &self,
        cell: CellIndex,
        board: &Board,
        game_over: bool,
        transport: &mut T,
        sink: &mut S,
    ) -> DispatchOutcome
    where
        T: Transport + ?Sized,
        S: TurnStateSink + ?Sized,
    {
        if game_over {
            debug!(?cell, "Move ignored: game is over");
            return DispatchOutcome::Rejected(RejectReason::GameOver);
        }

        let Some(index) = board.linear_index(cell) else {
            debug!(?cell, size = board.size(), "Move ignored: cell outside board");
            return DispatchOutcome::Rejected(RejectReason::OutOfBounds);
        };

        if !board.is_empty_at(cell) {
            debug!(?cell, "Move ignored: cell occupied");
            return DispatchOutcome::Rejected(RejectReason::Occupied);
        }

        if let Err(e) = transport.emit(&self.event, Value::from(index)) {
            warn!(?cell, error = %e, "Failed to send move");
            return DispatchOutcome::Rejected(RejectReason::TransportClosed);
        }

        debug!(?cell, index, "Move sent");
        sink.set_turn_state(TurnState::waiting());
        DispatchOutcome::Sent { index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        sent: Vec<(String, Value)>,
        closed: bool,
    }

    impl Transport for Recorder {
        fn emit(&mut self, event: &str, payload: Value) -> Result<(), TransportError> {
            if self.closed {
                return Err(TransportError::Closed);
            }
            self.sent.push((event.to_string(), payload));
            Ok(())
        }
    }

    #[test]
    fn sends_row_major_index() {
        let board = Board::new(4);
        let mut transport = Recorder::default();
        let mut states = Vec::new();
        let outcome = MoveDispatcher::new().dispatch(
            CellIndex::new(2, 1),
            &board,
            false,
            &mut transport,
            &mut |s: TurnState| states.push(s),
        );

        assert_eq!(outcome, DispatchOutcome::Sent { index: 9 });
        assert_eq!(transport.sent, vec![("turn".to_string(), Value::from(9))]);
        assert_eq!(states, vec![TurnState::waiting()]);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let board = Board::new(3);
        let mut transport = Recorder::default();
        let outcome = MoveDispatcher::new().dispatch(
            CellIndex::new(0, 3),
            &board,
            false,
            &mut transport,
            &mut |_: TurnState| panic!("turn state must not change"),
        );
        assert_eq!(outcome, DispatchOutcome::Rejected(RejectReason::OutOfBounds));
        assert!(transport.sent.is_empty());
    }

    #[test]
    fn closed_transport_leaves_turn_state() {
        let board = Board::new(3);
        let mut transport = Recorder {
            closed: true,
            ..Default::default()
        };
        let mut calls = 0;
        let outcome = MoveDispatcher::new().dispatch(
            CellIndex::new(0, 0),
            &board,
            false,
            &mut transport,
            &mut |_: TurnState| calls += 1,
        );
        assert_eq!(outcome, DispatchOutcome::Rejected(RejectReason::TransportClosed));
        assert_eq!(calls, 0);
    }

    #[test]
    fn custom_event_name() {
        let board = Board::new(3);
        let mut transport = Recorder::default();
        let dispatcher = MoveDispatcher::with_event("move");
        dispatcher.dispatch(CellIndex::new(0, 1), &board, false, &mut transport, &mut |_: TurnState| {});
        assert_eq!(transport.sent[0].0, "move");
    }
}
