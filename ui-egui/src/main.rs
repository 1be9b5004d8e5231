// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main entry point for the egui UI

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossbeam_channel::unbounded;
use gridmark_core::ThemeMode;
use gridmark_ui_egui::{worker, App, NetToUi, UiConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gridmark")]
#[command(about = "Networked N×N grid game client")]
struct Args {
    /// Game server address (host:port)
    #[arg(long)]
    server: Option<String>,

    /// Cells per board side
    #[arg(long)]
    size: Option<usize>,

    /// Force a theme instead of following the system
    #[arg(long)]
    theme: Option<ThemeMode>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    debug: bool,
}

impl Args {
    /// Command-line flags take precedence over the config file
    fn apply(&self, config: &mut UiConfig) -> Result<()> {
        if let Some(server) = &self.server {
            config.network.server_addr = server.clone();
        }
        if let Some(size) = self.size {
            config.board.dimension = size;
        }
        if let Some(theme) = self.theme {
            config.theme = Some(theme);
        }
        if config.board.dimension == 0 {
            bail!("Board size must be at least 1");
        }
        Ok(())
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let (mut config, path) = UiConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut config)?;
    tracing::info!(config = %path.display(), server = %config.network.server_addr, "Starting gridmark");

    // Setup channels for communication between UI and worker
    let (transport, outbound) = gridmark_network::channel();
    let (net_tx, ui_rx) = unbounded::<NetToUi>();

    let (width, height) = config.window.initial_size;
    let (min_width, min_height) = config.window.min_size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([width, height])
            .with_min_inner_size([min_width, min_height]),
        ..Default::default()
    };

    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let repaint = Some(cc.egui_ctx.clone());
            if let Err(e) = worker::spawn_worker(config.network.clone(), outbound, net_tx, repaint) {
                tracing::error!("Failed to start network worker: {:#}", e);
            }
            Box::new(App::new(&config, transport, ui_rx))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run eframe: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "gridmark",
            "--server",
            "10.1.1.1:9000",
            "--size",
            "4",
            "--theme",
            "dark",
        ])
        .unwrap();
        let mut config = UiConfig::default();
        args.apply(&mut config).unwrap();

        assert_eq!(config.network.server_addr, "10.1.1.1:9000");
        assert_eq!(config.board.dimension, 4);
        assert_eq!(config.theme, Some(ThemeMode::Dark));
    }

    #[test]
    fn zero_size_is_rejected() {
        let args = Args::try_parse_from(["gridmark", "--size", "0"]).unwrap();
        assert!(args.apply(&mut UiConfig::default()).is_err());
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(Args::try_parse_from(["gridmark", "--theme", "sepia"]).is_err());
    }
}
