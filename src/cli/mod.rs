//! Command-line interface for wakfu-gamedata.
//!
//! Provides commands for syncing a game-data version, resolving the current
//! version, rebuilding item buckets from a previous dump, and inspecting the
//! resolved configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::adapters::{CdnClient, GameDataSource};
use crate::config::{load_config, ResolvedConfig};
use crate::core::{DatasetWriter, MalformedPolicy, Orchestrator, RunSettings};
use crate::domain::{select_datasets, DatasetType, ALL_DATASETS};

/// wakfu-gamedata - Download and bucket Wakfu game data
#[derive(Parser, Debug)]
#[command(name = "wakfu-gamedata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: discover .wakfu/config.yaml)
    #[arg(long, global = true, env = "WAKFU_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every dataset of a version and write the output tree
    Sync {
        /// Use this version instead of resolving the current one
        #[arg(long = "game-version")]
        game_version: Option<String>,

        /// Output root (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Only process these datasets (comma-separated)
        #[arg(long, value_delimiter = ',')]
        only: Vec<DatasetType>,

        /// Drop malformed item records instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Print the current game-data version
    Version,

    /// Rebuild item buckets from a previously downloaded raw dump
    Reprocess {
        /// Version whose <version>-source/items.json to read
        game_version: String,

        /// Output root (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Drop malformed item records instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Show resolved configuration (debug)
    Config,

    /// List the dataset types in processing order
    Datasets,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;

        match self.command {
            Commands::Sync {
                game_version,
                output_dir,
                only,
                skip_malformed,
            } => {
                apply_overrides(&mut config, output_dir, skip_malformed);
                sync(&config, game_version.as_deref(), &only).await
            }
            Commands::Version => show_version(&config).await,
            Commands::Reprocess {
                game_version,
                output_dir,
                skip_malformed,
            } => {
                apply_overrides(&mut config, output_dir, skip_malformed);
                reprocess(&config, &game_version).await
            }
            Commands::Config => show_config(&config),
            Commands::Datasets => {
                for dataset in ALL_DATASETS {
                    println!("{}", dataset);
                }
                Ok(())
            }
        }
    }
}

/// Flags take precedence over file and environment settings
fn apply_overrides(config: &mut ResolvedConfig, output_dir: Option<PathBuf>, skip_malformed: bool) {
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if skip_malformed {
        config.malformed = MalformedPolicy::Skip;
    }
}

fn build_orchestrator(config: &ResolvedConfig, only: &[DatasetType]) -> Result<Orchestrator<CdnClient>> {
    let client = CdnClient::new(&config.config_url, &config.base_url, config.request_timeout)?;
    let settings = RunSettings {
        datasets: select_datasets(&ALL_DATASETS, only),
        brackets: config.brackets.clone(),
        malformed: config.malformed,
    };

    Ok(Orchestrator::new(
        client,
        DatasetWriter::new(&config.output_dir),
        settings,
    ))
}

/// Run a full sync and print the report
async fn sync(config: &ResolvedConfig, game_version: Option<&str>, only: &[DatasetType]) -> Result<()> {
    let orchestrator = build_orchestrator(config, only)?;
    let report = orchestrator.sync(game_version).await?;

    println!("{}", report);
    eprintln!(
        "\n[Sync of {} completed into {}]",
        report.version,
        config.output_dir.display()
    );
    Ok(())
}

/// Print the current remote version
async fn show_version(config: &ResolvedConfig) -> Result<()> {
    let client = CdnClient::new(&config.config_url, &config.base_url, config.request_timeout)?;
    let version = client.current_version().await?;
    println!("{}", version);
    Ok(())
}

/// Rebuild the item buckets of a version from disk
async fn reprocess(config: &ResolvedConfig, game_version: &str) -> Result<()> {
    let orchestrator = build_orchestrator(config, &[DatasetType::Items])?;
    let entry = orchestrator.reprocess_items(game_version).await?;

    println!("Reprocessed items for {}", game_version);
    println!("  Files written: {}", entry.files_written);
    if let Some(stats) = entry.items {
        println!("  Items:         {}", stats.normalized);
        println!("  Skipped:       {}", stats.skipped.len());
        println!("  Rarity out of range: {}", stats.rarity_out_of_range);
    }
    Ok(())
}

fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!("wakfu-gamedata configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("CDN:");
    println!("  Version URL: {}", cfg.config_url);
    println!("  Base URL:    {}", cfg.base_url);
    match cfg.request_timeout {
        Some(t) => println!("  Timeout:     {}s", t.as_secs()),
        None => println!("  Timeout:     (none)"),
    }
    println!();
    println!("Output root:     {}", cfg.output_dir.display());
    println!("Brackets:        {:?}", cfg.brackets.thresholds());
    println!("Malformed items: {:?}", cfg.malformed);

    Ok(())
}
