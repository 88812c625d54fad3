use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use roster::config::{self, Config};
use roster::logging;
use roster::ui;

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Keep a list of contacts in the terminal")]
struct Cli {
    /// Configuration file (defaults to <config dir>/roster/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level override: error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate the configuration, then exit
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    let level = match cli.log_level.as_deref() {
        Some(level) => logging::normalize_level(level).context("invalid --log-level")?,
        None => logging::normalize_level(&config.log.level)?,
    };

    if let Some(Command::CheckConfig) = cli.command {
        return handle_check_config(&config, level);
    }

    let log_dir = config.log.resolved_dir()?;
    logging::init_logging(level, &log_dir)
        .with_context(|| format!("failed to start logging in {}", log_dir.display()))?;

    info!(
        "event=config_loaded path={} from_file={}",
        config.config_path.display(),
        config.loaded_from_file
    );
    for warning in &config.warnings {
        warn!("event=config_warning message={}", warning);
    }

    let mut app = ui::app::App::new(&config);
    app.run()
}

fn handle_check_config(config: &Config, level: &str) -> Result<()> {
    for warning in &config.warnings {
        eprintln!("warning: {}", warning);
    }

    if config.loaded_from_file {
        println!("Configuration OK: {}", config.config_path.display());
    } else {
        println!(
            "No configuration file at {}; using defaults",
            config.config_path.display()
        );
    }
    println!("Log level: {}", level);
    println!("Log directory: {}", config.log.resolved_dir()?.display());
    Ok(())
}
