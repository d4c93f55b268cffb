//! Configuration management for batch renaming

use crate::error::{RenameError, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub directory: PathBuf,
    pub filter: FilterConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Extension without the leading dot
    pub extension: String,
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub verbose: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("public/audio"),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extension: "mp3".to_string(),
            case_sensitive: true,
        }
    }
}

impl Config {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn verbose(&self) -> bool {
        self.output.verbose
    }

    pub fn report_path(&self) -> Option<&Path> {
        self.output.report_path.as_deref()
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "accentstrip", about = "Rename audio files, replacing accented characters with ASCII", version, author)]
pub struct Args {
    #[arg(short = 'd', long = "dir", help = "Directory containing the audio files [default: public/audio]")]
    pub directory: Option<PathBuf>,

    #[arg(short = 'e', long = "extension", help = "File extension to process [default: mp3]")]
    pub extension: Option<String>,

    #[arg(long = "ignore-case", help = "Match the extension case-insensitively")]
    pub ignore_case: bool,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[arg(long = "report", help = "Write a TOML report of the run to this path")]
    pub report: Option<PathBuf>,

    #[arg(long = "init-config", help = "Write a default config file to this path and exit")]
    pub init_config: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output mode")]
    pub verbose: bool,
}

impl Config {
    /// Create config from command line arguments and config file.
    ///
    /// Flags given on the command line win over the config file, which wins
    /// over the defaults.
    pub fn from_args_and_config(args: Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        if let Some(directory) = args.directory {
            config.directory = directory;
        }
        if let Some(extension) = args.extension {
            config.filter.extension = extension;
        }
        if args.ignore_case {
            config.filter.case_sensitive = false;
        }
        if args.report.is_some() {
            config.output.report_path = args.report;
        }
        config.output.verbose |= args.verbose;

        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RenameError::config(format!("Failed to read config file: {}", e)))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| RenameError::config(format!("Failed to parse config file: {}", e)))?;
        config.normalize();
        Ok(config)
    }

    /// Accept ".mp3" as well as "mp3".
    fn normalize(&mut self) {
        if let Some(stripped) = self.filter.extension.strip_prefix('.') {
            self.filter.extension = stripped.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(RenameError::config("Directory must not be empty"));
        }

        let ext = &self.filter.extension;
        if ext.is_empty() {
            return Err(RenameError::config("Extension must not be empty"));
        }
        if ext.starts_with('.') {
            return Err(RenameError::config(format!("Invalid extension: {}", ext)));
        }
        if ext.contains(['/', '\\']) {
            return Err(RenameError::config("Extension cannot contain path separators"));
        }

        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RenameError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| RenameError::config(format!("Failed to write config file: {}", e)))
    }

    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        Self::default().save_to_file(path)
    }
}
