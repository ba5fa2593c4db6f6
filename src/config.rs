use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::cli::Args;
use crate::completion::PathCompletion;
use crate::mapping::ParseMode;
use crate::rename_log::DEFAULT_LOG_FILE_NAME;
use crate::renamer::RenameOptions;

pub const DEFAULT_MAPPING_FILE: &str = "friends_map.txt";
const LOCAL_CONFIG_FILE: &str = "friends-renamer.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mapping file, relative to the working directory unless absolute
    pub mapping_file: PathBuf,
    pub log_file_name: String,
    /// Delete unmapped `.mkv` files after renaming. Off unless asked for.
    pub cleanup_unmapped: bool,
    /// Fail on malformed mapping lines instead of skipping them
    pub strict_parsing: bool,
    pub path_completion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mapping_file: PathBuf::from(DEFAULT_MAPPING_FILE),
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            cleanup_unmapped: false,
            strict_parsing: false,
            path_completion: true,
        }
    }
}

/// Get the path to the config file (tries ./friends-renamer.yaml first, then
/// ~/.config/friends-renamer/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
    if local_config.exists() {
        return Some(local_config);
    }

    let home_config = dirs::home_dir()?
        .join(".config")
        .join("friends-renamer")
        .join("config.yaml");
    if home_config.exists() {
        return Some(home_config);
    }

    None
}

impl Config {
    /// Load from an explicit path, or the first config file found, or defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match get_config_path() {
            Some(path) => Self::load_from_file(&path),
            None => {
                warn!("No config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load config from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(
            "Config loaded: mapping_file={}, cleanup_unmapped={}, strict_parsing={}",
            config.mapping_file.display(),
            config.cleanup_unmapped,
            config.strict_parsing
        );
        Ok(config)
    }

    /// Layer command-line overrides on top of the file settings
    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(map) = &args.map {
            self.mapping_file = map.clone();
        }
        if args.cleanup {
            self.cleanup_unmapped = true;
        }
        if args.strict {
            self.strict_parsing = true;
        }
        if args.no_completion {
            self.path_completion = false;
        }
        self
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.strict_parsing {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    pub fn path_completion(&self) -> PathCompletion {
        if self.path_completion {
            PathCompletion::default()
        } else {
            PathCompletion::disabled()
        }
    }

    pub fn rename_options(&self) -> RenameOptions {
        RenameOptions {
            cleanup_unmapped: self.cleanup_unmapped,
            log_file_name: self.log_file_name.clone(),
        }
    }
}
