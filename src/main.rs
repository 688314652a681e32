use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use genesis_config::{RunnerConfig, RunnerConfigDef};
use genesis_runner::TaskRunner;

/// Genesis - a configurable async task runner
#[derive(Parser)]
#[command(name = "genesis")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the default unit of work and print each result as JSON
  Run {
    /// Path to a runner config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable diagnostic logging around each run
    #[arg(long)]
    verbose: bool,

    /// Number of sequential runs on the same runner
    #[arg(long, default_value_t = 1)]
    count: u32,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Run {
      config,
      verbose,
      count,
    }) => {
      run(config, verbose, count)?;
    }
    None => {
      println!("genesis - use --help to see available commands");
    }
  }

  Ok(())
}

fn run(config_file: Option<PathBuf>, verbose: bool, count: u32) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_async(config_file, verbose, count).await })
}

async fn run_async(config_file: Option<PathBuf>, verbose: bool, count: u32) -> Result<()> {
  let mut def = match &config_file {
    Some(path) => load_config_def(path).await?,
    None => RunnerConfigDef::default(),
  };

  if verbose {
    def = def.with_verbose(true);
  }

  let config = def.resolve().context("invalid runner configuration")?;
  init_tracing(&config);

  let runner = TaskRunner::new(config);

  for _ in 0..count {
    let result = runner.run().await;
    println!("{}", serde_json::to_string_pretty(&result)?);
  }

  tracing::debug!(completed_runs = runner.completed_runs(), "all runs finished");

  Ok(())
}

async fn load_config_def(path: &Path) -> Result<RunnerConfigDef> {
  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read config file: {}", path.display()))?;

  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse config file: {}", path.display()))
}

fn init_tracing(config: &RunnerConfig) {
  let default_level = if config.verbose() { "info" } else { "warn" };
  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(env_filter)
    .init();
}
