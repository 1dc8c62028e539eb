//! Command-line argument parsing for the assistant
//!
//! Supports:
//! - Opening a document to work on
//! - Loading config from a custom path
//! - Printing the effective config

use clap::Parser;
use std::path::PathBuf;

use crate::config::AssistConfig;

/// A writing assistant with selection-aware rewrites
#[derive(Parser, Debug)]
#[command(
    name = "quill",
    version,
    about = "A writing assistant with selection-aware rewrites"
)]
pub struct CliArgs {
    /// Document to open
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Load config from this file instead of the default location
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective config as YAML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Document to load, if any
    pub document: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub print_config: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if let Some(path) = &self.path {
            if path.is_dir() {
                return Err(format!("{} is a directory", path.display()));
            }
        }
        Ok(StartupConfig {
            document: self.path,
            config_path: self.config,
            print_config: self.print_config,
        })
    }
}

impl StartupConfig {
    /// Load the assistant config this session should use
    pub fn load_assist_config(&self) -> AssistConfig {
        match &self.config_path {
            Some(path) => AssistConfig::load_from(path),
            None => AssistConfig::load(),
        }
    }
}
