// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main application state and UI logic.

use std::time::Duration;

use crossbeam_channel::Receiver;
use gridmark_core::{Board, BoardProps, ClickOutcome, RemoteTurn, TurnState, WinLine};
use gridmark_network::{BoardUpdate, ChannelTransport, ServerEvent};
use tracing::{debug, info, warn};

use crate::components::BoardWidget;
use crate::msg::NetToUi;
use crate::theme::ThemeProvider;
use crate::ui_config::UiConfig;

/// Outcome shown when the server ends the game without a message
const GAME_OVER: &str = "Game over";

/// Fallback repaint interval so queued network messages are picked up
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Connection status shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting(String),
    Connected(String),
    Disconnected(String),
}

impl ConnectionStatus {
    fn label(&self) -> String {
        match self {
            ConnectionStatus::Connecting(addr) => format!("Connecting to {addr}..."),
            ConnectionStatus::Connected(peer) => format!("Connected to {peer}"),
            ConnectionStatus::Disconnected(reason) => format!("Disconnected: {reason}"),
        }
    }
}

/// Main application state
pub struct App {
    board: Board,
    game_over: bool,
    win_line: Option<WinLine>,
    turn: TurnState,
    status: ConnectionStatus,
    widget: BoardWidget,
    theme: ThemeProvider,
    transport: ChannelTransport,
    ui_rx: Receiver<NetToUi>,
}

impl App {
    pub fn new(config: &UiConfig, transport: ChannelTransport, ui_rx: Receiver<NetToUi>) -> Self {
        Self {
            board: Board::new(config.board.dimension.max(1)),
            game_over: false,
            win_line: None,
            turn: TurnState::default(),
            status: ConnectionStatus::Connecting(config.network.server_addr.clone()),
            widget: BoardWidget::new(config.board.render_style(), config.board.pixel_size),
            theme: ThemeProvider::new(config.theme),
            transport,
            ui_rx,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over || self.turn.is_game_over()
    }

    /// Win line to highlight: the board's, else the one carried by the turn
    pub fn win_line(&self) -> Option<WinLine> {
        self.win_line.or_else(|| self.turn.win_line())
    }

    /// Drain every pending message from the network worker
    pub fn handle_network_messages(&mut self) {
        while let Ok(msg) = self.ui_rx.try_recv() {
            match msg {
                NetToUi::Connecting { addr } => self.status = ConnectionStatus::Connecting(addr),
                NetToUi::Connected { peer } => {
                    info!(%peer, "Connected");
                    self.status = ConnectionStatus::Connected(peer.to_string());
                }
                NetToUi::Disconnected { reason, retry_in } => {
                    debug!(%reason, ?retry_in, "Disconnected");
                    self.status = ConnectionStatus::Disconnected(reason);
                }
                NetToUi::Server(event) => self.apply_server_event(event),
            }
        }
    }

    fn apply_server_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Board(update) => self.apply_board(update),
            ServerEvent::TurnState(update) => {
                self.turn.apply_remote(RemoteTurn::from(update));
            }
            ServerEvent::Unknown { event } => debug!(%event, "Ignoring unknown server event"),
        }
    }

    fn apply_board(&mut self, update: BoardUpdate) {
        let BoardUpdate {
            board,
            game_over,
            win_line,
        } = update;

        if board.size() != self.board.size() {
            warn!(
                expected = self.board.size(),
                got = board.size(),
                "Ignoring board of a different size"
            );
            return;
        }

        self.board = board;
        self.game_over = game_over;
        self.win_line = win_line;

        if game_over {
            let outcome = if self.turn.is_game_over() {
                self.turn.outcome().to_string()
            } else {
                GAME_OVER.to_string()
            };
            self.turn.apply_remote(RemoteTurn {
                outcome,
                game_over: Some(true),
                win_line,
                ..Default::default()
            });
        }
    }

    fn board_ui(&mut self, ui: &mut egui::Ui) {
        let game_over = self.is_game_over();
        let win_line = self.win_line();
        let theme = self.theme.current(ui.visuals());

        ui.vertical_centered(|ui| {
            ui.heading(self.turn.outcome());
            ui.add_space(8.0);

            let props = BoardProps {
                board: &self.board,
                game_over,
                win_line,
                theme,
            };
            let turn = &mut self.turn;
            let result = self
                .widget
                .show(ui, &props, &mut self.transport, &mut |state: TurnState| *turn = state);

            if let Some(ClickOutcome::Dispatched(outcome)) = result.click {
                debug!(?outcome, "Board clicked");
            }
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.theme.apply(ctx);
        self.handle_network_messages();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.label());
        });

        egui::CentralPanel::default().show(ctx, |ui| self.board_ui(ui));

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}
