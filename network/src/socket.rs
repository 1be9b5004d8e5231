// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-lines TCP client for the game server

use std::net::SocketAddr;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, TryRecvError};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::config::NetworkConfig;
use crate::messages::{Envelope, ServerEvent};

/// How often the outbound queue is polled while no inbound data arrives
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Why [`SocketClient::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disconnect {
    /// The server closed the connection or the read side failed
    ServerClosed,
    /// Every outbound sender was dropped
    ClientClosed,
}

/// One line read from the socket
enum Frame {
    Line(Vec<u8>),
    /// A line longer than the limit; the byte count was discarded
    Oversized(usize),
}

/// Connected client speaking newline-delimited JSON envelopes
pub struct SocketClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    peer: SocketAddr,
    max_line_bytes: usize,
}

impl SocketClient {
    /// Connect to the configured server within the connect timeout
    pub async fn connect(config: &NetworkConfig) -> Result<Self> {
        let connect = TcpStream::connect(config.server_addr.as_str());
        let stream = timeout(config.connect_timeout(), connect)
            .await
            .with_context(|| {
                format!(
                    "Timed out after {:?} connecting to {}",
                    config.connect_timeout(),
                    config.server_addr
                )
            })?
            .with_context(|| format!("Failed to connect to {}", config.server_addr))?;

        let client = Self::from_stream(stream, config.max_line_bytes)?;
        info!(peer = %client.peer, "Connected to game server");
        Ok(client)
    }

    pub fn from_stream(stream: TcpStream, max_line_bytes: usize) -> Result<Self> {
        let peer = stream.peer_addr().context("Failed to read peer address")?;
        let (read_half, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer,
            peer,
            max_line_bytes,
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Pump envelopes both ways until either side closes
    ///
    /// Outbound envelopes are drained from `outbound` and written one per
    /// line. Every decodable inbound line is passed to `on_event`; oversized
    /// or malformed lines are logged and skipped.
    pub async fn run<F>(self, outbound: &Receiver<Envelope>, mut on_event: F) -> Result<Disconnect>
    where
        F: FnMut(ServerEvent),
    {
        let Self {
            reader,
            mut writer,
            peer,
            max_line_bytes,
        } = self;

        let (inbound_tx, mut inbound_rx) = mpsc::unbounded_channel();
        let reader_task = tokio::spawn(read_loop(reader, max_line_bytes, inbound_tx));

        let result = loop {
            let received = tokio::select! {
                event = inbound_rx.recv() => Some(event),
                _ = tokio::time::sleep(POLL_INTERVAL) => None,
            };
            match received {
                Some(Some(event)) => on_event(event),
                Some(None) => break Ok(Disconnect::ServerClosed),
                None => {}
            }

            match drain_outbound(outbound, &mut writer).await {
                Ok(true) => {}
                Ok(false) => break Ok(Disconnect::ClientClosed),
                Err(e) => break Err(e),
            }
        };

        reader_task.abort();
        info!(%peer, ?result, "Connection to game server ended");
        result
    }
}

/// Write every queued envelope. Returns false once the queue is disconnected.
async fn drain_outbound(outbound: &Receiver<Envelope>, writer: &mut OwnedWriteHalf) -> Result<bool> {
    loop {
        match outbound.try_recv() {
            Ok(envelope) => write_envelope(writer, &envelope).await?,
            Err(TryRecvError::Empty) => return Ok(true),
            Err(TryRecvError::Disconnected) => return Ok(false),
        }
    }
}

async fn write_envelope(writer: &mut OwnedWriteHalf, envelope: &Envelope) -> Result<()> {
    let mut line = envelope.to_line()?.into_bytes();
    line.push(b'\n');
    writer.write_all(&line).await.context("Failed to write to game server")?;
    writer.flush().await.context("Failed to flush game server stream")?;
    debug!(event = %envelope.event, "Sent envelope");
    Ok(())
}

async fn read_loop(
    mut reader: BufReader<OwnedReadHalf>,
    max_line_bytes: usize,
    inbound: mpsc::UnboundedSender<ServerEvent>,
) {
    loop {
        let frame = match read_frame(&mut reader, max_line_bytes).await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                debug!("Game server closed the stream");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Read from game server failed");
                return;
            }
        };

        let line = match frame {
            Frame::Line(line) => line,
            Frame::Oversized(len) => {
                warn!(len, max_line_bytes, "Skipping oversized line");
                continue;
            }
        };

        let text = match std::str::from_utf8(&line) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Skipping line that is not valid UTF-8");
                continue;
            }
        };
        if text.trim().is_empty() {
            continue;
        }

        match ServerEvent::from_line(text) {
            Ok(event) => {
                if inbound.send(event).is_err() {
                    return;
                }
            }
            Err(e) => warn!(error = %e, "Skipping undecodable line"),
        }
    }
}

/// Read one newline-terminated line, never buffering more than the limit
async fn read_frame(reader: &mut BufReader<OwnedReadHalf>, max_line_bytes: usize) -> std::io::Result<Option<Frame>> {
    let limit = max_line_bytes as u64 + 1;
    let mut buf = Vec::new();
    let n = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(None);
    }

    let terminated = buf.last() == Some(&b'\n');
    if terminated || buf.len() <= max_line_bytes {
        return Ok(Some(Frame::Line(buf)));
    }

    // Discard the remainder of the long line
    let mut skipped = buf.len();
    loop {
        buf.clear();
        let n = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;
        skipped += n;
        if n == 0 || buf.last() == Some(&b'\n') {
            return Ok(Some(Frame::Oversized(skipped)));
        }
    }
}
