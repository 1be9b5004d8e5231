// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(clippy::all)]

//! gridmark egui host
//!
//! Hosts the board view in an eframe window and talks to the game server
//! through a background network worker.

pub mod app;
pub mod canvas;
pub mod components;
pub mod msg;
pub mod theme;
pub mod ui_config;
pub mod worker;

pub use app::App;
pub use canvas::PainterCanvas;
pub use msg::NetToUi;
pub use ui_config::UiConfig;
