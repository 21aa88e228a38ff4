use std::path::PathBuf;

use clap::Parser;

use crate::error::LoadError;
use crate::file::read_file;
use crate::gui::theme::Theme;
use crate::model::BodyRegistry;

/// Interactive solar-system orrery.
#[derive(Debug, Clone, Parser)]
#[command(name = "orrery")]
pub struct Args {
    /// Window width in pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Load bodies from a table file instead of the built-in solar system.
    #[arg(long)]
    pub bodies: Option<PathBuf>,

    /// Start with the animation paused.
    #[arg(long)]
    pub paused: bool,

    /// Start in light mode.
    #[arg(long)]
    pub light: bool,

    /// Longest frame time (seconds) fed to the animation in one step.
    #[arg(long, default_value_t = 0.1)]
    pub max_dt: f32,

    /// Number of background stars.
    #[arg(long, default_value_t = 1500)]
    pub stars: usize,

    /// Seed for star placement.
    #[arg(long, default_value_t = 0)]
    pub star_seed: u64,

    /// Log filter, e.g. `debug` or `solar_orrery=trace`. RUST_LOG wins if set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn theme(&self) -> Theme {
        if self.light {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn registry(&self) -> Result<BodyRegistry, LoadError> {
        match &self.bodies {
            Some(path) => read_file(path),
            None => Ok(BodyRegistry::default()),
        }
    }
}

pub fn init_logging(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    // Tests may initialize more than once
    let _ = env_logger::Builder::from_env(env).try_init();
}
