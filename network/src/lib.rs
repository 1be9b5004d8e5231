// SPDX-License-Identifier: MIT OR Apache-2.0

//! gridmark network - wire format and transports for the game server
//!
//! This crate provides:
//! - The newline-delimited JSON envelope and decoded server events
//! - A channel-backed [`gridmark_core::Transport`] for the UI thread
//! - A tokio TCP client that pumps envelopes to and from the server
//! - TOML configuration loading

#![deny(unsafe_code)]

pub mod channel;
pub mod config;
pub mod messages;
pub mod socket;

pub use channel::{channel, ChannelTransport};
pub use config::NetworkConfig;
pub use messages::{BoardUpdate, Envelope, MessageError, ServerEvent, TurnStateUpdate};
pub use socket::{Disconnect, SocketClient};
