use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Scene presets selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum ScenePreset {
    /// Five-sphere showcase.
    Default,
    /// Book-cover scene with a random sphere grid.
    Rich,
}

/// Command line arguments.
#[derive(Parser)]
#[command(name = "lumipath")]
#[command(about = "A CPU Monte-Carlo path tracer")]
pub struct Args {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "1200")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "675")]
    pub height: u32,

    /// Number of rays per pixel
    #[arg(long, short = 'r', default_value = "64")]
    pub rays: u32,

    /// Maximum ray bounce depth
    #[arg(long, short = 'd', default_value = "12")]
    pub max_depth: u32,

    /// Number of parallel workers (0 = all logical CPUs)
    #[arg(long, short = 'w', default_value = "0")]
    pub workers: usize,

    /// Seed for scene generation and sampling (0 randomizes each run)
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Scene to render
    #[arg(long, value_enum, default_value = "rich")]
    pub scene: ScenePreset,

    /// Output PNG path (empty = do not save)
    #[arg(long, short = 'o', default_value = "output.png")]
    pub output: String,

    /// Run the worker-scaling benchmark instead of a normal render
    #[arg(long)]
    pub bench: bool,
}
