//! Drives the patrol tree once per simulated frame.
mod agent;
mod config;

use anyhow::Result;
use tick_tree::TreeConfig;
use tracing::{debug, info};

use agent::{Agent, build_patrol_tree};
use config::PatrolConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = PatrolConfig::from_env();
    let mut tree = build_patrol_tree(&config, TreeConfig::from_env())?;
    let mut agent = Agent::new(&config);

    info!(
        frames = config.frames,
        from = %config.waypoint_a,
        to = %config.waypoint_b,
        "starting patrol"
    );

    let mut runs = 0u32;
    for frame in 0..config.frames {
        if tree.tick(&mut agent)? {
            runs += 1;
            info!(frame, runs, position = %agent.position, "tree run finished");
        } else if let Some(leaf) = tree.active_leaf() {
            debug!(frame, leaf = leaf.name(), "leaf still running");
        }
    }

    info!(runs, position = %agent.position, "patrol finished");
    Ok(())
}
