// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background worker with tokio runtime for networking.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use gridmark_network::{Disconnect, Envelope, NetworkConfig, SocketClient};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

use crate::msg::NetToUi;

/// Delay before reconnecting after the server went away
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Spawn the background worker thread
///
/// The worker keeps a connection to `config.server_addr` alive, writes every
/// envelope queued on `outbound` and forwards server events to `ui_tx`. It
/// exits once every outbound sender or the UI receiver is dropped.
pub fn spawn_worker(
    config: NetworkConfig,
    outbound: Receiver<Envelope>,
    ui_tx: Sender<NetToUi>,
    repaint: Option<egui::Context>,
) -> anyhow::Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("gridmark-net".to_string())
        .spawn(move || {
            if let Err(e) = run_worker(config, outbound, ui_tx, repaint) {
                error!("Worker thread error: {:#}", e);
            }
        })?;
    Ok(handle)
}

fn run_worker(
    config: NetworkConfig,
    outbound: Receiver<Envelope>,
    ui_tx: Sender<NetToUi>,
    repaint: Option<egui::Context>,
) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    rt.block_on(async {
        let worker = NetworkWorker {
            config,
            outbound,
            ui_tx,
            repaint,
        };
        worker.run().await
    })
}

struct NetworkWorker {
    config: NetworkConfig,
    outbound: Receiver<Envelope>,
    ui_tx: Sender<NetToUi>,
    repaint: Option<egui::Context>,
}

impl NetworkWorker {
    /// Send to the UI. Returns false once the UI is gone.
    fn notify(&self, msg: NetToUi) -> bool {
        let delivered = self.ui_tx.send(msg).is_ok();
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
        delivered
    }

    /// Drop moves queued while disconnected so they never reach a new session
    fn discard_stale_moves(&self) {
        let stale: Vec<Envelope> = self.outbound.try_iter().collect();
        if !stale.is_empty() {
            warn!(
                count = stale.len(),
                events = ?stale.iter().map(|e| e.event.as_str()).collect::<Vec<_>>(),
                "Discarding moves queued while disconnected"
            );
        }
    }

    async fn run(self) -> anyhow::Result<()> {
        let mut reconnecting = false;
        loop {
            let addr = self.config.server_addr.clone();
            if !self.notify(NetToUi::Connecting { addr }) {
                return Ok(());
            }

            let reason = match SocketClient::connect(&self.config).await {
                Ok(client) => {
                    if reconnecting {
                        self.discard_stale_moves();
                    }
                    if !self.notify(NetToUi::Connected {
                        peer: client.peer_addr(),
                    }) {
                        return Ok(());
                    }

                    let ui_tx = self.ui_tx.clone();
                    let repaint = self.repaint.clone();
                    let result = client
                        .run(&self.outbound, move |event| {
                            debug!(event = event.name(), "Server event");
                            if ui_tx.send(NetToUi::Server(event)).is_err() {
                                warn!("UI receiver dropped, discarding server event");
                            }
                            if let Some(ctx) = &repaint {
                                ctx.request_repaint();
                            }
                        })
                        .await;

                    match result {
                        Ok(Disconnect::ClientClosed) => {
                            info!("Outbound channel closed, stopping network worker");
                            return Ok(());
                        }
                        Ok(Disconnect::ServerClosed) => "Server closed the connection".to_string(),
                        Err(e) => format!("{e:#}"),
                    }
                }
                Err(e) => format!("{e:#}"),
            };

            warn!(%reason, retry_in = ?RETRY_DELAY, "Disconnected from game server");
            if !self.notify(NetToUi::Disconnected {
                reason,
                retry_in: RETRY_DELAY,
            }) {
                return Ok(());
            }
            reconnecting = true;
            tokio::time::sleep(RETRY_DELAY).await;
        }
    }
}
