//! Dialog configuration
//!
//! Loaded from a TOML file. Every field is optional; missing fields keep the
//! built-in defaults.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Environment variable consulted when no explicit config path is given.
pub const CONFIG_ENV: &str = "COMSEL_CONFIG";

/// Baud rates offered in the list, in display order.
pub const DEFAULT_BAUD_RATES: [u32; 6] = [115200, 9600, 19200, 38400, 57600, 250000];
pub const DEFAULT_BAUD: u32 = 115200;
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_MANUAL_BAUD_MAX: u32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialogConfig {
    /// Entries of the baud list, shown in this order.
    pub baud_rates: Vec<u32>,
    /// Preselected baud list entry. Falls back to the first entry when absent from the list.
    pub default_baud: u32,
    pub refresh_interval_ms: u64,
    /// Upper bound accepted by the manual baud field.
    pub manual_baud_max: u32,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            baud_rates: DEFAULT_BAUD_RATES.to_vec(),
            default_baud: DEFAULT_BAUD,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            manual_baud_max: DEFAULT_MANUAL_BAUD_MAX,
        }
    }
}

impl DialogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DialogConfig =
            toml::from_str(content).context("Failed to parse dialog config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config at `path`. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {path:?}"))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {path:?}"))?;
        log::info!("📂 Loaded dialog config from {path:?}");
        Ok(config)
    }

    /// Load from an explicit path, else from `COMSEL_CONFIG`, else use defaults.
    ///
    /// A path coming from the environment that does not exist is skipped with
    /// a warning; an explicit path must exist.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                log::warn!("{CONFIG_ENV} points to missing file {path:?}, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.baud_rates.is_empty() {
            return Err(anyhow!("baud_rates must not be empty"));
        }
        if let Some(zero_pos) = self.baud_rates.iter().position(|&b| b == 0) {
            return Err(anyhow!("baud_rates[{zero_pos}] must be positive"));
        }
        if self.refresh_interval_ms == 0 {
            return Err(anyhow!("refresh_interval_ms must be positive"));
        }
        if self.manual_baud_max == 0 {
            return Err(anyhow!("manual_baud_max must be positive"));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Index of `default_baud` in the baud list.
    pub fn default_baud_index(&self) -> usize {
        match self.baud_rates.iter().position(|&b| b == self.default_baud) {
            Some(idx) => idx,
            None => {
                log::warn!(
                    "default_baud {} is not in baud_rates, preselecting the first entry",
                    self.default_baud
                );
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_builtin_constants() {
        let config = DialogConfig::default();
        assert_eq!(
            config.baud_rates,
            vec![115200, 9600, 19200, 38400, 57600, 250000]
        );
        assert_eq!(config.default_baud_index(), 0);
        assert_eq!(config.refresh_interval(), Duration::from_millis(1000));
        assert_eq!(config.manual_baud_max, 1_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = DialogConfig::from_toml_str(
            "baud_rates = [9600, 19200]\ndefault_baud = 19200\n",
        )
        .unwrap();
        assert_eq!(config.baud_rates, vec![9600, 19200]);
        assert_eq!(config.default_baud_index(), 1);
        assert_eq!(config.refresh_interval_ms, DEFAULT_REFRESH_INTERVAL_MS);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(DialogConfig::from_toml_str("baud_rates = []").is_err());
        assert!(DialogConfig::from_toml_str("baud_rates = [9600, 0]").is_err());
        assert!(DialogConfig::from_toml_str("refresh_interval_ms = 0").is_err());
        assert!(DialogConfig::from_toml_str("manual_baud_max = 0").is_err());
        assert!(DialogConfig::from_toml_str("unknown_key = 1").is_err());
        assert!(DialogConfig::from_toml_str("baud_rates = \"fast\"").is_err());
    }

    #[test]
    fn default_baud_outside_list_falls_back_to_first() {
        let config = DialogConfig {
            default_baud: 4800,
            ..Default::default()
        };
        assert_eq!(config.default_baud_index(), 0);
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refresh_interval_ms = 250").unwrap();

        let config = DialogConfig::load(file.path()).unwrap();
        assert_eq!(config.refresh_interval(), Duration::from_millis(250));

        let missing = file.path().with_extension("missing");
        assert!(DialogConfig::resolve(Some(&missing)).is_err());
    }
}
