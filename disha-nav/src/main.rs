//! DishaNav - Waypoint recording and turn-by-turn guidance replay
//!
//! Replays a recorded walk (pose samples plus operator events) through the
//! Marga engine: waypoints are recorded into a graph, routes are planned on
//! demand and guidance is tracked edge by edge.
//!
//! ## Multi-Threaded Architecture
//!
//! - **Sampler Thread** (~5Hz): replays trace samples into a bounded channel
//! - **Guidance Thread**: pose pipeline, recording, navigation session
//! - **Main Thread**: polls the published guidance and logs status, then
//!   exports the graph when the replay is done
//!
//! ## Usage
//!
//! ```bash
//! disha-nav traces/corridor.yaml --output-dir output
//! RUST_LOG=debug disha-nav traces/corridor.yaml --config disha.toml
//! ```

mod config;
mod error;
mod shared;
mod threads;
mod trace;

use clap::Parser;
use config::DishaConfig;
use error::Result;
use shared::SharedState;
use threads::spawn_threads;
use trace::Trace;

use log::{error, info, warn};
use marga::NavigationState;
use marga::io::{SvgConfig, SvgVisualizer, save_json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "disha-nav")]
#[command(about = "Replay a walk through waypoint recording and turn-by-turn guidance")]
#[command(version)]
struct Args {
    /// Trace file (YAML)
    trace: PathBuf,

    /// Configuration file (TOML); defaults to ./disha.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the JSON and SVG exports
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Override the sample interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("DishaNav failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            DishaConfig::load(path)?
        }
        None if Path::new("disha.toml").exists() => {
            info!("Loading configuration from disha.toml");
            DishaConfig::load(Path::new("disha.toml"))?
        }
        None => {
            info!("Using default configuration");
            DishaConfig::default()
        }
    };
    if let Some(interval_ms) = args.interval_ms {
        config.sampler.interval_ms = interval_ms;
    }

    info!("DishaNav v{}", env!("CARGO_PKG_VERSION"));

    let trace = Trace::load(&args.trace)?;
    info!(
        "Trace '{}': {} samples, {} events",
        trace.name,
        trace.samples.len(),
        trace.event_count()
    );
    if !trace.description.is_empty() {
        info!("  {}", trace.description);
    }
    let title = trace.name.clone();

    info!(
        "Reach threshold {:.2}m, sample interval {}ms",
        config.navigation.reach_threshold, config.sampler.interval_ms
    );

    let shared_state = Arc::new(SharedState::new(config.navigation.clone()));
    let handles = spawn_threads(&config, trace, Arc::clone(&shared_state))?;

    // Main thread: presentation role, polls published guidance
    let status_interval = config.sampler.status_interval();
    let mut last_state = NavigationState::Idle;
    loop {
        std::thread::sleep(status_interval);
        report_status(&shared_state, &mut last_state);

        if shared_state.is_replay_complete() {
            info!("Replay complete");
            break;
        }
        if handles.guidance.is_finished() {
            warn!("Guidance thread exited unexpectedly");
            break;
        }
    }

    shared_state.signal_shutdown();

    info!("Waiting for threads to finish...");
    let join_start = Instant::now();
    if let Err(e) = handles.guidance.join() {
        error!("Guidance thread panicked: {:?}", e);
    }
    if let Err(e) = handles.sampler.join() {
        error!("Sampler thread panicked: {:?}", e);
    }
    info!("Threads joined in {:?}", join_start.elapsed());

    export(&config, &args.output_dir, &shared_state, &title)?;

    info!("DishaNav finished");
    Ok(())
}

/// Log the current guidance the way a display would present it.
fn report_status(shared_state: &SharedState, last_state: &mut NavigationState) {
    let snapshot = shared_state.snapshot();

    if snapshot.state != *last_state {
        info!("Navigation state: {:?} -> {:?}", last_state, snapshot.state);
        *last_state = snapshot.state;
    }

    match snapshot.state {
        NavigationState::Active => match snapshot.remaining_offset {
            Some(remaining) => {
                let bearing = shared_state
                    .session()
                    .bearing_degrees()
                    .map(|b| format!("{:.0}°", b))
                    .unwrap_or_else(|| "-".to_string());
                info!(
                    "Leg {}/{}: {:.2}m east, {:.2}m north to go (bearing {})",
                    snapshot.current_index + 1,
                    snapshot.path_len.saturating_sub(1),
                    remaining.east,
                    remaining.north,
                    bearing
                );
            }
            None => warn!("Leg {}: no guidance available", snapshot.current_index + 1),
        },
        NavigationState::Arrived | NavigationState::Idle => {
            let graph = shared_state.graph().read();
            log::debug!(
                "{} waypoints, {} edges, {} samples processed",
                graph.len(),
                graph.edge_count(),
                shared_state.samples_processed()
            );
        }
    }
}

/// Write the graph to JSON and SVG.
fn export(config: &DishaConfig, output_dir: &Path, shared_state: &SharedState, title: &str) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    let route = shared_state.last_route();
    let trajectory = shared_state.trajectory();
    let graph = shared_state.graph().read();

    info!(
        "Graph: {} waypoints, {} edges; {} waypoints reached",
        graph.len(),
        graph.edge_count(),
        shared_state.arrivals.load(Ordering::Relaxed)
    );

    let json_path = output_dir.join(&config.output.graph_json);
    save_json(&graph, &json_path)?;

    // Trajectory is relative to the route start, which is path[0]
    let offset = route
        .first()
        .and_then(|start| graph.layout_positions().get(start).copied())
        .unwrap_or_default();
    let trajectory = trajectory.into_iter().map(|p| p + offset).collect();

    let svg_path = output_dir.join(&config.output.graph_svg);
    SvgVisualizer::new(&graph, SvgConfig::default())
        .with_title(title)
        .with_route(&route)
        .with_trajectory(trajectory)
        .save(&svg_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["disha-nav", "trace.yaml", "--interval-ms", "50", "-o", "out"]);
        assert_eq!(args.trace, PathBuf::from("trace.yaml"));
        assert_eq!(args.interval_ms, Some(50));
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_status_interval_never_zero() {
        let mut config = DishaConfig::default();
        config.sampler.status_interval_ms = 0;
        assert_eq!(config.sampler.status_interval(), Duration::from_millis(1));
    }
}
