//! Aliases command implementation

use std::path::Path;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::config::{AliasesOptions, UserConfig};
use crate::plugins::to_aliases;
use crate::tsconfig::try_load_tsconfig_paths;
use crate::utils::display_path;

/// Print the aliases derived from the tsconfig file
#[derive(Args, Debug)]
pub struct AliasesCommand {
    /// Print the resolver configuration fragment as JSON
    #[arg(long)]
    pub json: bool,
}

impl AliasesCommand {
    /// Unlike the plugin hook, read and parse errors fail the command.
    pub async fn execute(&self, root: &Path, options: AliasesOptions) -> Result<()> {
        info!("Loading aliases from {}", options.tsconfig_path.display());

        let paths = try_load_tsconfig_paths(&options.tsconfig_path, root)?;
        let config = UserConfig::with_aliases(to_aliases(&paths));

        if self.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }

        let aliases = &config.resolve.alias;
        if aliases.is_empty() {
            eprintln!(
                "{} No aliases found in {}\n",
                "!".yellow().bold(),
                options.tsconfig_path.display().to_string().cyan()
            );
            return Ok(());
        }

        eprintln!(
            "{} {} alias(es) from {}\n",
            "✓".green().bold(),
            aliases.len(),
            options.tsconfig_path.display().to_string().cyan()
        );

        let width = aliases.iter().map(|a| a.find.len()).max().unwrap_or(0);
        for alias in aliases {
            println!(
                "  {} {:<width$} {} {}",
                "•".dimmed(),
                alias.find,
                "→".dimmed(),
                display_path(&alias.replacement, root).cyan(),
                width = width
            );
        }

        eprintln!();

        Ok(())
    }
}
