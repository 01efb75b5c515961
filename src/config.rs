//! Configuration management for the markdown indentation linter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Lint option loading from TOML configuration files

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Command-line arguments for the linter
#[derive(Debug, Parser)]
#[command(name = "mdindent")]
#[command(about = "Indentation linter for markdown files")]
#[command(version)]
pub struct Args {
    /// Markdown files to lint
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Explicit configuration file
    #[arg(long, help = "TOML configuration file to use")]
    pub config: Option<PathBuf>,

    /// Rewrite the files in place applying every fix
    #[arg(long)]
    pub fix: bool,

    /// Output format for diagnostics
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Log level for the linter
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

fn default_indent() -> usize {
    2
}

/// Options recognized by the validation passes.
///
/// Negative values never reach the engine: the fields are unsigned, so a
/// negative value in a configuration file is rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintOptions {
    /// Offset charged for an unordered ancestor when its marker width is not
    /// used; also the fallback for `start_indent`.
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Required indentation of root-level lists. Unset disables the
    /// top-level list alignment rule.
    #[serde(default)]
    pub start_indent: Option<usize>,

    /// When true, root-level list items are expected to already sit at
    /// `start_indent` instead of column zero.
    #[serde(default)]
    pub start_indented: bool,

    /// Fixed indentation for unordered sub-lists instead of deriving it
    /// from marker widths.
    #[serde(default)]
    pub ul_indent: Option<usize>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            start_indent: None,
            start_indented: false,
            ul_indent: None,
        }
    }
}

impl LintOptions {
    /// Baseline for root-level items when `start_indented` is set.
    pub fn effective_start_indent(&self) -> usize {
        self.start_indent.unwrap_or(self.indent)
    }

    /// Offset charged per unordered ancestor by the list indent pass.
    pub fn sub_list_offset(&self) -> usize {
        self.ul_indent.unwrap_or(self.indent)
    }
}

/// Root configuration file structure (matches TOML)
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    options: Option<LintOptions>,
}

/// Combined configuration from all sources
#[derive(Debug)]
pub struct Config {
    pub options: LintOptions,
    pub paths: Vec<PathBuf>,
    pub fix: bool,
    pub json_output: bool,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let options = match args.config {
            Some(path) => load_options(&path)?,
            None => discover_options()?,
        };

        Ok(Config {
            options,
            paths: args.paths,
            fix: args.fix,
            json_output: args.format == "json",
            log_level: args.log_level,
        })
    }
}

/// Load lint options from a TOML file.
pub fn load_options(path: &Path) -> Result<LintOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(file.options.unwrap_or_default())
}

/// Look for `mdindent.toml` in the working directory, then in the user
/// config directory. Defaults apply when neither exists.
fn discover_options() -> Result<LintOptions> {
    let mut candidates = vec![PathBuf::from("mdindent.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("mdindent").join("config.toml"));
    }

    for candidate in candidates {
        if candidate.is_file() {
            log::debug!("loading options from {}", candidate.display());
            return load_options(&candidate);
        }
    }
    Ok(LintOptions::default())
}
