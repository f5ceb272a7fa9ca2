use crate::cli::{Args, ColorChoice};
use crate::interpreter::stack::DEFAULT_MAX_DEPTH;
use tracing_subscriber::EnvFilter;

pub struct AppConfig {
    pub color_enabled: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub max_depth: usize,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        let color_enabled = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => atty::is(atty::Stream::Stderr) && atty::is(atty::Stream::Stdout),
        };

        AppConfig {
            color_enabled,
            quiet: args.quiet,
            verbose: args.verbose,
            max_depth: args.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(config: &AppConfig) {
    let default_level = if config.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color_enabled)
        .with_target(false)
        .try_init();
}
