// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel-backed transport for handing moves to a network worker

use crossbeam_channel::{Receiver, Sender};
use gridmark_core::{Transport, TransportError};
use serde_json::Value;
use tracing::trace;

use crate::messages::Envelope;

/// [`Transport`] that queues envelopes for another thread
///
/// Sending never blocks. Once the receiving side is dropped every emit
/// fails with [`TransportError::Closed`].
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: Sender<Envelope>,
}

impl ChannelTransport {
    pub fn new(tx: Sender<Envelope>) -> Self {
        Self { tx }
    }
}

impl Transport for ChannelTransport {
    fn emit(&mut self, event: &str, payload: Value) -> Result<(), TransportError> {
        trace!(event, %payload, "Queueing outbound event");
        self.tx
            .send(Envelope::new(event, payload))
            .map_err(|_| TransportError::Closed)
    }
}

/// Unbounded transport plus the receiver the worker drains
pub fn channel() -> (ChannelTransport, Receiver<Envelope>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (ChannelTransport::new(tx), rx)
}
