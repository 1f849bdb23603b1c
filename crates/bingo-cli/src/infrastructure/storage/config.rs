//! TOML-based configuration for the `golf-bingo` CLI.
//!
//! The config file is looked up in this order:
//!
//! 1. `--config <path>` (or the `GOLF_BINGO_CONFIG` environment variable),
//! 2. the platform config directory:
//!    - Windows:  `%APPDATA%\golf-bingo\config.toml`
//!    - Linux:    `~/.config/golf-bingo/config.toml`
//!    - macOS:    `~/Library/Application Support/golf-bingo/config.toml`
//!
//! A missing file is not an error: every field has a default, and the
//! defaults describe the standard board and a sample golfer catalog.
//!
//! ```toml
//! [general]
//! log_level = "info"
//!
//! [storage]
//! data_dir = "/var/lib/golf-bingo"
//!
//! [feed]
//! path = "/var/lib/golf-bingo/scores.json"
//! cache_ttl_secs = 300
//! refresh_secs = 60
//!
//! [[zones]]
//! name = "orange"
//! budget = 40000
//! cells = [0, 4, 20, 24]
//!
//! [[golfers]]
//! name = "Jon Rahm"
//! salary = 12000
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.  Leaving out
//! `[[zones]]` entirely yields the standard five-zone board; listing any zone
//! replaces the whole table.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bingo_core::{
    BoardGeometry, CatalogError, GeometryError, GolferAssignment, GolferCatalog, Zone,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directory name used under the platform config directory.
const APP_DIR: &str = "golf-bingo";

/// File name of the board store inside the data directory.
const BOARDS_FILE: &str = "boards.json";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The `[[zones]]` table does not partition the board.
    #[error("invalid zone table: {0}")]
    Geometry(#[from] GeometryError),

    /// The `[[golfers]]` table is invalid.
    #[error("invalid golfer catalog: {0}")]
    Catalog(#[from] CatalogError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    /// Colour zones; must partition cells 0–24 exactly.
    #[serde(default = "default_zones")]
    pub zones: Vec<Zone>,
    /// Draftable golfers and their salaries.
    #[serde(default = "default_golfers")]
    pub golfers: Vec<GolferAssignment>,
}

/// General behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where boards are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding `boards.json`.  Defaults to the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Score feed settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedConfig {
    /// JSON file with the current tournament scores.  Scoring commands are
    /// unavailable when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// How long fetched scores are reused before the feed is read again.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Poll interval for `best-line --watch`.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl FeedConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        // A zero interval would spin the watch loop.
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_cache_ttl_secs() -> u64 {
    300
}
fn default_refresh_secs() -> u64 {
    60
}
fn default_zones() -> Vec<Zone> {
    BoardGeometry::standard_zones()
}

/// Sample catalog, enough to fill a board with a few to spare.
fn default_golfers() -> Vec<GolferAssignment> {
    [
        ("Scottie Scheffler", 14_000),
        ("Rory McIlroy", 13_000),
        ("Jon Rahm", 12_000),
        ("Xander Schauffele", 11_500),
        ("Collin Morikawa", 10_500),
        ("Bryson DeChambeau", 10_200),
        ("Patrick Cantlay", 10_000),
        ("Viktor Hovland", 9_800),
        ("Ludvig Aberg", 9_600),
        ("Justin Thomas", 9_200),
        ("Hideki Matsuyama", 9_000),
        ("Jordan Spieth", 8_800),
        ("Brooks Koepka", 8_600),
        ("Tommy Fleetwood", 8_400),
        ("Matt Fitzpatrick", 8_200),
        ("Shane Lowry", 8_000),
        ("Wyndham Clark", 7_900),
        ("Sungjae Im", 7_800),
        ("Sam Burns", 7_700),
        ("Sepp Straka", 7_600),
        ("Dustin Johnson", 7_400),
        ("Robert Macintyre", 7_300),
        ("Justin Rose", 7_200),
        ("Corey Conners", 7_100),
        ("Adam Scott", 7_000),
        ("Louis Oosthuizen", 6_800),
        ("Tiger Woods", 6_500),
        ("Chris Gotterup", 6_200),
    ]
    .into_iter()
    .map(|(name, salary)| GolferAssignment::new(name, salary))
    .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            storage: StorageConfig::default(),
            feed: FeedConfig::default(),
            zones: default_zones(),
            golfers: default_golfers(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: None,
            cache_ttl_secs: default_cache_ttl_secs(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl AppConfig {
    /// Builds the board geometry from `[[zones]]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] if the zones do not partition the board.
    pub fn geometry(&self) -> Result<BoardGeometry, ConfigError> {
        Ok(BoardGeometry::new(self.zones.clone())?)
    }

    /// Builds the golfer catalog from `[[golfers]]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] for duplicate names or zero salaries.
    pub fn catalog(&self) -> Result<GolferCatalog, ConfigError> {
        Ok(GolferCatalog::new(self.golfers.clone())?)
    }

    /// Path of the board store file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformConfigDir`] when no `data_dir` is set
    /// and the platform directory cannot be determined.
    pub fn boards_path(&self) -> Result<PathBuf, ConfigError> {
        let dir = match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => config_dir()?,
        };
        Ok(dir.join(BOARDS_FILE))
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the config file path: `explicit` if given, otherwise
/// `config.toml` in the platform config directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if no path was given and the
/// base directory cannot be determined.
pub fn config_file_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config_dir()?.join("config.toml")),
    }
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to `path`.
///
/// Creates the parent directory if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join(APP_DIR))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join(APP_DIR))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
