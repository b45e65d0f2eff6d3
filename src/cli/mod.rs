//! Command-line interface
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `aliases`: Print the aliases derived from tsconfig.json
//! - `resolve`: Apply the aliases to an import specifier

mod aliases;
mod resolve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::config::{AliasesOptions, HostConfig};
use crate::plugins::PLUGIN_NAME;

pub use aliases::AliasesCommand;
pub use resolve::ResolveCommand;

/// Turn tsconfig.json path mappings into bundler aliases
#[derive(Parser, Debug)]
#[command(name = "tsconfig-aliases")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// tsconfig file to read (overrides the plugin entry of --config)
    #[arg(short = 'p', long, global = true, env = "TSCONFIG_PATH")]
    pub tsconfig: Option<PathBuf>,

    /// Host TOML config holding a `tsconfig-aliases` plugin entry
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root that relative paths are resolved against
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the aliases derived from the tsconfig file
    Aliases(AliasesCommand),

    /// Resolve an import specifier through the aliases
    Resolve(ResolveCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        print_banner();

        let root = self.root()?;
        let options = self.plugin_options()?;

        debug!("Project root: {}", root.display());

        match &self.command {
            Commands::Aliases(cmd) => cmd.execute(&root, options).await,
            Commands::Resolve(cmd) => cmd.execute(root, options).await,
        }
    }

    /// Absolute project root, defaulting to the current directory
    fn root(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;

        Ok(match &self.root {
            Some(root) => crate::utils::resolve_path(&cwd, root),
            None => cwd,
        })
    }

    /// Plugin options from `--tsconfig`, then `--config`, then defaults
    fn plugin_options(&self) -> Result<AliasesOptions> {
        if let Some(tsconfig_path) = &self.tsconfig {
            return Ok(AliasesOptions {
                tsconfig_path: tsconfig_path.clone(),
            });
        }

        let Some(config_path) = &self.config else {
            return Ok(AliasesOptions::default());
        };

        let host = HostConfig::load(config_path)?;
        match host.plugin(PLUGIN_NAME) {
            Some(plugin) => AliasesOptions::from_plugin_config(plugin),
            None => {
                debug!("No '{}' entry in {}", PLUGIN_NAME, config_path.display());
                Ok(AliasesOptions::default())
            }
        }
    }
}

/// Print the banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "⚡".cyan(),
        PLUGIN_NAME.bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
