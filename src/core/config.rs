//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tagbox/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::directory::{Directory, User};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TagboxConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub author: Option<String>,
    pub seed_comments: Option<bool>,
    pub log_level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_AUTHOR: &str = "Me";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub author: String,
    pub seed_comments: bool,
    pub log_level: LevelFilter,
    pub directory: Directory,
    /// Problems that were worked around during resolution, for the caller
    /// to report once logging is set up
    pub warnings: Vec<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            seed_comments: true,
            log_level: DEFAULT_LOG_LEVEL,
            directory: Directory::default(),
            warnings: Vec::new(),
        }
    }
}

/// Overrides taken from the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub author: Option<&'a str>,
    pub no_seed: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidDirectory(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::InvalidDirectory(msg) => write!(f, "invalid user directory: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tagbox/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tagbox").join("config.toml"))
}

/// Load config from `path`, or `~/.tagbox/config.toml` when `path` is None.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `TagboxConfig::default()`. An explicit path that doesn't exist is
/// an I/O error. A malformed file returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<TagboxConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => {
                if !p.exists() {
                    info!("No config file found, generating default at {}", p.display());
                    generate_default_config(&p);
                    return Ok(TagboxConfig::default());
                }
                p
            }
            None => {
                warn!("Could not determine home directory, using default config");
                return Ok(TagboxConfig::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Parse a config document.
pub fn parse_config(contents: &str) -> Result<TagboxConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Tagbox Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# author = "Me"                      # Or set TAGBOX_AUTHOR env var
# seed_comments = true               # Start with two example comments
# log_level = "debug"                # "error", "warn", "info", "debug", "trace", "off"

# Users that can be @mentioned. Leave out to use the built-in list.
# [[users]]
# id = 1
# name = "Kevin"

# [[users]]
# id = 2
# name = "Jeff"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TagboxConfig, cli: &CliOverrides<'_>) -> Result<ResolvedConfig, ConfigError> {
    // Author: CLI → env → config → default
    let author = cli
        .author
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TAGBOX_AUTHOR").ok())
        .or_else(|| config.general.author.clone())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    let seed_comments = !cli.no_seed && config.general.seed_comments.unwrap_or(true);

    let mut warnings = Vec::new();
    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warnings.push(format!(
                "Unknown log level {:?}, using {}",
                level, DEFAULT_LOG_LEVEL
            ));
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    Ok(ResolvedConfig {
        author,
        seed_comments,
        log_level,
        directory: resolve_directory(&config.users)?,
        warnings,
    })
}

/// Build the directory from configured users, or the built-in table if none.
fn resolve_directory(users: &[User]) -> Result<Directory, ConfigError> {
    if users.is_empty() {
        return Ok(Directory::default());
    }

    let mut seen = HashSet::new();
    for user in users {
        if user.display_name.trim().is_empty() {
            return Err(ConfigError::InvalidDirectory(format!(
                "user {} has an empty name",
                user.id
            )));
        }
        if !seen.insert(user.id) {
            return Err(ConfigError::InvalidDirectory(format!(
                "duplicate user id {}",
                user.id
            )));
        }
    }

    Ok(Directory::new(users.to_vec()))
}
