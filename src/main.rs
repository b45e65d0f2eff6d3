//! tsconfig-aliases - keep bundler aliases in sync with tsconfig.json
//!
//! Path aliases are declared once, in `compilerOptions.paths`, and projected
//! into the bundler's `resolve.alias` settings.
//!
//! # Commands
//! - `aliases`: list the aliases (or print them as a JSON config fragment)
//! - `resolve`: rewrite an import specifier through the aliases

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tsconfig_aliases::Cli;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tsconfig_aliases=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tsconfig_aliases=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute().await
}
