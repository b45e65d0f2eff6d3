//! tsconfig-aliases library
//!
//! Reads `compilerOptions.paths` from tsconfig.json and exposes them as
//! `resolve.alias` entries through a bundler plugin.

pub mod cli;
pub mod config;
pub mod plugins;
pub mod tsconfig;
pub mod utils;

pub use cli::Cli;
pub use config::{Alias, AliasesOptions, ResolveConfig, UserConfig};
pub use plugins::{Plugin, PluginManager, TsconfigAliases};
