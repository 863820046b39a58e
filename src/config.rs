use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::layouts::Layout;
use crate::runner::DEFAULT_TICK_MS;

/// Terminal maze chase: steer the player, watch the wanderer roam.
#[derive(Debug, Clone, Parser)]
#[command(name = "pacman-lite", version)]
pub struct Settings {
    /// Milliseconds between ticks.
    #[arg(long, env = "PACMAN_TICK_MS", default_value_t = DEFAULT_TICK_MS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Seed for the wanderer's random walk. Unseeded runs draw from entropy.
    #[arg(long, env = "PACMAN_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "PACMAN_LAYOUT", value_enum, default_value_t = Layout::Classic)]
    pub layout: Layout,

    /// Write logs here. Filter with RUST_LOG.
    #[arg(long, env = "PACMAN_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
