//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navroute/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! The `[[segments]]` tables define the route table; without any, the
//! built-in demo table is used.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::routing::{RouteTable, SegmentEntry, TableError};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavrouteConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub segments: Vec<SegmentEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub root_segment: Option<String>,
    pub separator: Option<String>,
    pub ellipsis: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ROOT_SEGMENT: &str = "home";
pub const DEFAULT_SEPARATOR: &str = " › ";
pub const DEFAULT_ELLIPSIS: &str = "…";

/// home → items → {item} → details, home → settings
pub fn default_segments() -> Vec<SegmentEntry> {
    vec![
        SegmentEntry::name("home", None),
        SegmentEntry::name("items", Some("home")),
        SegmentEntry::data("item", "items", &["1", "2", "42"]),
        SegmentEntry::name("details", Some("item")),
        SegmentEntry::name("settings", Some("home")),
    ]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub root_segment: String,
    pub separator: String,
    pub ellipsis: String,
    pub table: Arc<RouteTable>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Table(TableError),
    /// The root segment is missing from the table or is not a name segment.
    UnknownRoot(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Table(e) => write!(f, "route table error: {e}"),
            ConfigError::UnknownRoot(name) => {
                write!(f, "root segment '{name}' is not a name segment of the route table")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<TableError> for ConfigError {
    fn from(e: TableError) -> Self {
        ConfigError::Table(e)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.navroute/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navroute").join("config.toml"))
}

/// Load config from `~/.navroute/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavrouteConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavrouteConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NavrouteConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NavrouteConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<NavrouteConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NavrouteConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# navroute Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# root_segment = "home"      # Or set NAVROUTE_ROOT env var
# separator = " › "          # Or set NAVROUTE_SEPARATOR env var
# ellipsis = "…"

# Route table. Without any [[segments]] the built-in demo table is used.
# kind is "name" (default) or "data"; data segments need a name parent.

# [[segments]]
# name = "home"

# [[segments]]
# name = "items"
# parent = "home"

# [[segments]]
# name = "item"
# kind = "data"
# parent = "items"
# values = ["1", "2", "42"]

# [[segments]]
# name = "details"
# parent = "item"
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
///
/// `cli_root` is the `--root` flag (None = not specified).
pub fn resolve(config: &NavrouteConfig, cli_root: Option<&str>) -> Result<ResolvedConfig, ConfigError> {
    // Root: CLI → env → config → default
    let root_segment = cli_root
        .map(|s| s.to_string())
        .or_else(|| std::env::var("NAVROUTE_ROOT").ok())
        .or_else(|| config.general.root_segment.clone())
        .unwrap_or_else(|| DEFAULT_ROOT_SEGMENT.to_string());

    // Separator: env → config → default
    let separator = std::env::var("NAVROUTE_SEPARATOR")
        .ok()
        .or_else(|| config.general.separator.clone())
        .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());

    let ellipsis = config
        .general
        .ellipsis
        .clone()
        .unwrap_or_else(|| DEFAULT_ELLIPSIS.to_string());

    let table = if config.segments.is_empty() {
        debug!("No segments configured, using the demo route table");
        RouteTable::from_entries(&default_segments())?
    } else {
        RouteTable::from_entries(&config.segments)?
    };

    if table.name_segment(&root_segment).is_none() {
        return Err(ConfigError::UnknownRoot(root_segment));
    }

    Ok(ResolvedConfig {
        root_segment,
        separator,
        ellipsis,
        table: Arc::new(table),
    })
}
