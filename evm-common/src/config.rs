//! Bootstrap configuration loading and root folder resolution
//!
//! Configuration is read once at startup from a TOML file. Runtime data
//! (events, venues, tickets, ...) lives entirely in the database.
//!
//! Config file location priority:
//! 1. Command-line argument (`--config`)
//! 2. `EVM_CONFIG` environment variable
//! 3. `~/.config/evm/config.toml`, then `/etc/evm/config.toml`
//! 4. Built-in defaults

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "EVM_CONFIG";

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV_VAR: &str = "EVM_ROOT_FOLDER";

/// Default admin dashboard port
pub const DEFAULT_ADMIN_PORT: u16 = 5780;

/// Default customer portal port
pub const DEFAULT_PORTAL_PORT: u16 = 5781;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Folder holding the database file
    pub root_folder: Option<PathBuf>,

    /// Database file name inside the root folder
    pub database_file: String,

    pub admin: AdminConfig,
    pub portal: PortalConfig,
    pub logging: LoggingConfig,
}

/// Admin dashboard service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub host: String,
    pub port: u16,

    /// Bearer token required on `/api/*` routes. `None` disables the check.
    pub admin_token: Option<String>,
}

/// Customer portal service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub host: String,
    pub port: u16,

    /// Lifetime of an attendee session, counted from login
    pub session_ttl_minutes: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            database_file: "evm.db".to_string(),
            admin: AdminConfig::default(),
            portal: PortalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_ADMIN_PORT,
            admin_token: None,
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORTAL_PORT,
            session_ttl_minutes: 120,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl BootstrapConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BootstrapConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration following the file location priority.
    ///
    /// An explicitly named file (CLI or environment) must exist; the
    /// well-known locations are optional and fall back to defaults.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let explicit = cli_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

        if let Some(path) = explicit {
            return Self::load_file(&path);
        }

        match find_config_file() {
            Some(path) => Self::load_file(&path),
            None => {
                debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database_file.trim().is_empty() {
            return Err(Error::Config("database_file cannot be empty".to_string()));
        }
        if self.portal.session_ttl_minutes == 0 {
            return Err(Error::Config(
                "portal.session_ttl_minutes must be greater than zero".to_string(),
            ));
        }
        if matches!(&self.admin.admin_token, Some(token) if token.trim().is_empty()) {
            return Err(Error::Config(
                "admin.admin_token cannot be blank (omit it to disable auth)".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the root folder:
    /// 1. Command-line argument (highest priority)
    /// 2. Environment variable
    /// 3. TOML config value
    /// 4. OS-dependent compiled default (fallback)
    pub fn resolve_root_folder(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg {
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV_VAR) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.root_folder {
            return path.clone();
        }

        default_root_folder()
    }

    /// Full path of the database file inside `root_folder`
    pub fn database_path(&self, root_folder: &Path) -> PathBuf {
        root_folder.join(&self.database_file)
    }
}

/// Create the root folder if it is missing
pub fn ensure_directory_exists(root_folder: &Path) -> Result<()> {
    if !root_folder.exists() {
        std::fs::create_dir_all(root_folder)?;
        info!("Created root folder: {}", root_folder.display());
    }
    Ok(())
}

/// Look for a config file in the well-known locations
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("evm").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/evm/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/evm (or /var/lib/evm for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("evm"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/evm"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/evm
        dirs::data_dir()
            .map(|d| d.join("evm"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/evm"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\evm
        dirs::data_local_dir()
            .map(|d| d.join("evm"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\evm"))
    } else {
        PathBuf::from("./evm_data")
    }
}
