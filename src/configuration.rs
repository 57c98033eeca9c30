//! Settings: registry endpoints and timing, search tuning, and the optional
//! user curated-tools overlay.
//!
//! Loaded from `~/.config/brewdeck/config.toml` when present, with
//! `BREWDECK_*` environment overrides (`__` separates nesting, e.g.
//! `BREWDECK_REGISTRY__TTL_SECS=120`). Every field has a default, so an
//! absent file is not an error.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::errors::Result;
use crate::rank::WindowPolicy;
use crate::registry::{CASK_ENDPOINT, DEFAULT_TIMEOUT, DEFAULT_TTL, FORMULA_ENDPOINT};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub registry: RegistrySettings,
    pub search: SearchSettings,
    /// Optional user curated-tools overlay (same JSON shape as the bundled
    /// list), merged over it by entry id.
    pub curated_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub formula_url: String,
    pub cask_url: String,
    pub timeout_secs: u64,
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub debounce_ms: u64,
    pub popular_window: usize,
    pub default_window: usize,
    pub popular_floor: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry: RegistrySettings::default(),
            search: SearchSettings::default(),
            curated_file: None,
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            formula_url: FORMULA_ENDPOINT.to_string(),
            cask_url: CASK_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            ttl_secs: DEFAULT_TTL.as_secs(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        let windows = WindowPolicy::default();
        Self {
            debounce_ms: 300,
            popular_window: windows.popular_cap,
            default_window: windows.default_window,
            popular_floor: windows.popular_floor,
        }
    }
}

impl Settings {
    /// Load settings from the default config file (if any) and the
    /// environment.
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                debug!("Loading settings from {}", path.display());
                builder = builder.add_source(File::from(path));
            }
        }
        let settings = builder
            .add_source(
                Environment::with_prefix("BREWDECK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Load settings from an explicit TOML file, still applying environment
    /// overrides.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix("BREWDECK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Platform config file location (`~/.config/brewdeck/config.toml` on
    /// Linux).
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "brewdeck").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.registry.ttl_secs)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.registry.timeout_secs)
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    #[must_use]
    pub fn window_policy(&self) -> WindowPolicy {
        WindowPolicy {
            popular_floor: self.search.popular_floor,
            popular_cap: self.search.popular_window,
            default_window: self.search.default_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.registry.formula_url, FORMULA_ENDPOINT);
        assert_eq!(settings.registry.cask_url, CASK_ENDPOINT);
        assert_eq!(settings.ttl(), DEFAULT_TTL);
        assert_eq!(settings.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(settings.debounce(), Duration::from_millis(300));
        assert!(settings.curated_file.is_none());
    }

    #[test]
    fn test_window_policy_maps_search_settings() {
        let mut settings = Settings::default();
        settings.search.popular_floor = 5;
        settings.search.popular_window = 20;
        settings.search.default_window = 12;

        let windows = settings.window_policy();
        assert_eq!(windows.popular_floor, 5);
        assert_eq!(windows.popular_cap, 20);
        assert_eq!(windows.default_window, 12);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(
            file,
            r#"
curated_file = "/tmp/my-tools.json"

[registry]
ttl_secs = 120

[search]
debounce_ms = 150
"#
        )
        .unwrap();
        file.flush().unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.ttl(), Duration::from_secs(120));
        assert_eq!(settings.debounce(), Duration::from_millis(150));
        assert_eq!(
            settings.curated_file,
            Some(PathBuf::from("/tmp/my-tools.json"))
        );
        // untouched fields keep their defaults
        assert_eq!(settings.registry.formula_url, FORMULA_ENDPOINT);
        assert_eq!(settings.search.popular_floor, 10);
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let result = Settings::load_from(std::path::Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }
}
