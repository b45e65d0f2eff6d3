//! Resolve command implementation

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::AliasesOptions;
use crate::plugins::{PluginManager, TsconfigAliases};

/// Resolve an import specifier through the aliases
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Import specifier, e.g. `@app/components/button`
    pub specifier: String,
}

impl ResolveCommand {
    pub async fn execute(&self, root: PathBuf, options: AliasesOptions) -> Result<()> {
        let mut plugins = PluginManager::new(root);
        plugins.register(Arc::new(TsconfigAliases::new(options)));

        match plugins.resolve_id(&self.specifier, None).await? {
            Some(path) => {
                println!("{}", path.display());
                Ok(())
            }
            None => {
                eprintln!(
                    "{} No alias matches {}",
                    "✗".red().bold(),
                    self.specifier.cyan()
                );
                anyhow::bail!("Unresolved specifier: {}", self.specifier)
            }
        }
    }
}
