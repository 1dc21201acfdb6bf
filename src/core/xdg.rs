//! XDG Base Directory Support
//!
//! Locates the Sextant definition file following the XDG Base
//! Directory specification.

use std::env;
use std::path::PathBuf;

/// XDG directories used by Sextant
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
}

impl XdgDirs {
    /// Resolve directories
    ///
    /// Priority order (highest to lowest):
    /// 1. SEXTANT_CONFIG_DIR
    /// 2. XDG_CONFIG_HOME
    /// 3. XDG default (~/.config)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(dir) = env::var("SEXTANT_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("sextant");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("sextant")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::debug!("XDG config dir: {:?}", self.config_dir);
        tracing::debug!("XDG config file: {:?}", self.config_file());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
