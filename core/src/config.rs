//! Engine configuration.
//!
//! Loaded from `config.toml` under the Reframe home directory. A missing
//! file yields defaults; a malformed file is an error at load time rather
//! than silently ignored settings.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::error::ReframeError;
use crate::error::Result;
use crate::flow::NavigationPolicy;

pub const REFRAME_HOME_ENV: &str = "REFRAME_HOME";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 600;
const DEFAULT_CRISIS_SCAN_MIN_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home: PathBuf,
    pub autosave_debounce_ms: u64,
    pub navigation: NavigationPolicy,
    pub crisis_scan_min_len: usize,
}

/// `config.toml` shape; every field optional so partial files work.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ConfigToml {
    autosave_debounce_ms: Option<u64>,
    navigation: Option<NavigationPolicy>,
    crisis_scan_min_len: Option<usize>,
}

impl Config {
    /// Resolve the home directory (`$REFRAME_HOME`, else `~/.reframe`) and
    /// load the config file from it.
    pub fn load() -> Result<Self> {
        Self::load_from_home(find_reframe_home()?)
    }

    pub fn load_from_home(home: PathBuf) -> Result<Self> {
        let path = home.join(CONFIG_FILE_NAME);
        let toml = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                toml::from_str::<ConfigToml>(&contents).map_err(|e| {
                    ReframeError::InvalidConfig {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    }
                })?
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config file at {path:?}, using defaults");
                ConfigToml::default()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            home,
            autosave_debounce_ms: toml
                .autosave_debounce_ms
                .unwrap_or(DEFAULT_AUTOSAVE_DEBOUNCE_MS),
            navigation: toml.navigation.unwrap_or_default(),
            crisis_scan_min_len: toml
                .crisis_scan_min_len
                .unwrap_or(DEFAULT_CRISIS_SCAN_MIN_LEN),
        })
    }
}

/// `$REFRAME_HOME` when set and non-empty, else `~/.reframe`.
pub fn find_reframe_home() -> Result<PathBuf> {
    match std::env::var(REFRAME_HOME_ENV) {
        Ok(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => dirs::home_dir()
            .map(|home: PathBuf| home.join(".reframe"))
            .ok_or(ReframeError::NoHomeDirectory),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_config_file_yields_defaults() -> anyhow::Result<()> {
        let home = tempdir()?;
        let config = Config::load_from_home(home.path().to_path_buf())?;
        assert_eq!(config.autosave_debounce_ms, 600);
        assert_eq!(config.navigation, NavigationPolicy::Gated);
        assert_eq!(config.crisis_scan_min_len, 10);
        Ok(())
    }

    #[test]
    fn partial_config_file_overrides_only_named_fields() -> anyhow::Result<()> {
        let home = tempdir()?;
        std::fs::write(
            home.path().join(CONFIG_FILE_NAME),
            "navigation = \"permissive\"\nautosave-debounce-ms = 250\n",
        )?;
        let config = Config::load_from_home(home.path().to_path_buf())?;
        assert_eq!(config.navigation, NavigationPolicy::Permissive);
        assert_eq!(config.autosave_debounce_ms, 250);
        assert_eq!(config.crisis_scan_min_len, 10);
        Ok(())
    }

    #[test]
    fn malformed_config_file_is_an_error() -> anyhow::Result<()> {
        let home = tempdir()?;
        std::fs::write(home.path().join(CONFIG_FILE_NAME), "navigation = [broken")?;
        let result = Config::load_from_home(home.path().to_path_buf());
        assert!(matches!(result, Err(ReframeError::InvalidConfig { .. })));
        Ok(())
    }
}
