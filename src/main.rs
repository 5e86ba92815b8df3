//! TopicVis - Main Entry Point
//!
//! Opens the topic inspector window, or with `--print` renders the Internals
//! panel for a snapshot file to stdout and exits.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use topicvis_rs::{
    config::{self, AppConfig, UiSessionState},
    frontend::TopicVisApp,
    internals::{build_view, render_text},
    player::{load_snapshot, PlayerBridge, SnapshotSource},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "topicvis", version, about = "Inspect player subscriptions and publishers")]
struct Args {
    /// Player snapshot (JSON) to open
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Print the Internals panel for the snapshot and exit
    #[arg(long, value_enum)]
    print: Option<PrintFormat>,

    /// Config file to use instead of the one in the app data directory
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PrintFormat {
    Text,
    Json,
}

/// Set up stderr logging, plus a rolling log file when enabled in the config.
fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,topicvis_rs=debug"));

    let (file_layer, guard) = match config.log_to_file.then(config::log_dir).flatten() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "topicvis.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

fn print_snapshot(path: &Path, format: PrintFormat) -> anyhow::Result<()> {
    let state = load_snapshot(path)?;
    let view = build_view(&state);

    match format {
        PrintFormat::Text => print!("{}", render_text(&view)),
        PrintFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load_or_default(args.config.as_deref());
    let _log_guard = init_logging(&config);

    if let Some(format) = args.print {
        let path = args
            .snapshot
            .or_else(|| config.snapshot_path.clone())
            .context("--print needs a snapshot: pass --snapshot or set snapshot_path in config.toml")?;
        return print_snapshot(&path, format);
    }

    tracing::info!("Starting TopicVis");

    // Load UI session (window, layout, recent snapshots)
    let mut session = UiSessionState::load();
    session.cleanup_missing_snapshots();

    let initial_snapshot = args
        .snapshot
        .or_else(|| config.snapshot_path.clone())
        .or_else(|| session.last_snapshot_path.clone());
    if let Some(path) = &initial_snapshot {
        tracing::info!("Restoring snapshot from {:?}", path);
    }

    // Create the bridge and spawn the snapshot source thread
    let (bridge, cmd_rx, msg_tx) = PlayerBridge::new();
    let source_handle = SnapshotSource::new(cmd_rx, msg_tx, config.poll_interval())
        .with_initial_snapshot(initial_snapshot)
        .spawn()
        .context("Failed to start snapshot source")?;

    let window = session.window.clone();
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([window.size.0 as f32, window.size.1 as f32])
        .with_min_inner_size([480.0, 320.0])
        .with_maximized(window.maximized)
        .with_title("TopicVis");
    if let Some((x, y)) = window.position {
        viewport = viewport.with_position([x as f32, y as f32]);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let result = eframe::run_native(
        "TopicVis",
        native_options,
        Box::new(move |cc| {
            if dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }

            Ok(Box::new(TopicVisApp::new(cc, bridge, config, session)))
        }),
    );

    // The app sent Shutdown on exit; dropping the bridge also stops the source
    tracing::info!("Shutting down...");
    if source_handle.join().is_err() {
        tracing::warn!("Snapshot source thread panicked");
    }

    result.map_err(|e| anyhow::anyhow!("UI error: {}", e))
}
