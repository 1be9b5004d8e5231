// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messages from the network worker to the UI.
//!
//! Outbound moves travel the other way as [`gridmark_network::Envelope`]s
//! through a [`gridmark_network::ChannelTransport`].

use std::net::SocketAddr;
use std::time::Duration;

use gridmark_network::ServerEvent;

/// Messages sent from Network worker to UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetToUi {
    /// Attempting to reach the server
    Connecting { addr: String },
    /// Connection established
    Connected { peer: SocketAddr },
    /// Connection lost or refused; the worker retries after `retry_in`
    Disconnected { reason: String, retry_in: Duration },
    /// Authoritative state from the server
    Server(ServerEvent),
}
