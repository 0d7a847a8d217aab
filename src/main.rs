use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use wavetrace::{config::Config, run, start_logging, Opts};

fn main() -> Result<()> {
    start_logging()?;

    let opts = Opts::parse();
    let config = match &opts.config {
        Some(file) => Config::load_file(file)
            .with_context(|| format!("Failed to load settings from {}", file.display()))?,
        None => Config::load()
            .context("Failed to load settings")?,
    };

    match config.get_config_dir() {
        Some(dir) => debug!("config dir {}", dir.display()),
        None => debug!("no config dir, using defaults"),
    }

    let input = opts.input.clone();
    run(opts, &config)
        .with_context(|| format!("Failed to extract traces from {}", input))?;

    Ok(())
}
