//! # Register Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_STORE_NAME, TILL_TAX_RATE, TILL_DB_PATH,                      │
//! │     TILL_CART_KEY, TILL_PERSIST_CART                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/till-pos/register.toml (Linux)                           │
//! │     ~/Library/Application Support/com.till.pos/register.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     18% tax, key "pos-cart", persistence on                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # register.toml
//! store_name = "Corner Shop"
//! default_tax_rate_bps = 1800
//! cart_storage_key = "pos-cart"
//! persist_cart = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use till_core::validation::validate_tax_rate_bps;
use till_core::TaxRate;

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "pos-cart";

/// Default tax rate: 18%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    /// Store name (logged at startup, shown by `config`)
    pub store_name: String,

    /// Tax rate applied to new carts, in basis points
    /// e.g., 1800 = 18%
    pub default_tax_rate_bps: u32,

    /// Snapshot database file. `None` means the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Key the cart snapshot is stored under
    pub cart_storage_key: String,

    /// Whether the cart survives a restart
    pub persist_cart: bool,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        RegisterConfig {
            store_name: "Till POS".to_string(),
            default_tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            database_path: None,
            cart_storage_key: DEFAULT_CART_KEY.to_string(),
            persist_cart: true,
        }
    }
}

impl RegisterConfig {
    /// Loads configuration from file (if present) and the environment.
    ///
    /// `config_path` defaults to `register.toml` in the platform config dir.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading register config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Checks the values that would otherwise misprice a sale.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_tax_rate_bps(self.default_tax_rate_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.cart_storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "cart_storage_key must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Tax rate for new carts.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.default_tax_rate_bps)
    }

    /// Resolves the snapshot database file, creating its directory.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.till.pos/till.db`
    /// - **Windows**: `%APPDATA%\till\pos\data\till.db`
    /// - **Linux**: `~/.local/share/till-pos/till.db`
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        let path = match &self.database_path {
            Some(path) => path.clone(),
            None => directories::ProjectDirs::from("com", "till", "pos")
                .ok_or(ConfigError::NoProjectDirs("data"))?
                .data_dir()
                .join("till.db"),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|source| ConfigError::Read { path: parent.to_path_buf(), source })?;
        }

        Ok(path)
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "pos")
            .map(|dirs| dirs.config_dir().join("register.toml"))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `TILL_*` overrides from any variable source.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("TILL_STORE_NAME") {
            self.store_name = name;
        }

        // Percentage, e.g. "18" or "8.25"
        if let Some(rate) = var("TILL_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() => {
                    let bps = TaxRate::from_percentage(pct).bps();
                    debug!(bps, "Overriding tax rate from environment");
                    self.default_tax_rate_bps = bps;
                }
                _ => warn!(rate = %rate, "Ignoring unparseable TILL_TAX_RATE"),
            }
        }

        if let Some(path) = var("TILL_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = var("TILL_CART_KEY") {
            self.cart_storage_key = key;
        }

        if let Some(flag) = var("TILL_PERSIST_CART") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.persist_cart = true,
                "0" | "false" | "no" | "off" => self.persist_cart = false,
                _ => warn!(flag = %flag, "Ignoring unknown TILL_PERSIST_CART value"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RegisterConfig::default();
        assert_eq!(config.tax_rate(), TaxRate::from_bps(1800));
        assert_eq!(config.cart_storage_key, "pos-cart");
        assert!(config.persist_cart);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = RegisterConfig::default();
        config.apply_overrides(vars(&[
            ("TILL_STORE_NAME", "Corner Shop"),
            ("TILL_TAX_RATE", "8.25"),
            ("TILL_DB_PATH", "/tmp/till-test.db"),
            ("TILL_CART_KEY", "lane-2"),
            ("TILL_PERSIST_CART", "off"),
        ]));

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.default_tax_rate_bps, 825);
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/till-test.db")));
        assert_eq!(config.cart_storage_key, "lane-2");
        assert!(!config.persist_cart);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = RegisterConfig::default();
        config.apply_overrides(vars(&[
            ("TILL_TAX_RATE", "eighteen"),
            ("TILL_PERSIST_CART", "maybe"),
        ]));

        assert_eq!(config.default_tax_rate_bps, 1800);
        assert!(config.persist_cart);
    }

    #[test]
    fn test_validation() {
        let mut config = RegisterConfig::default();

        config.default_tax_rate_bps = 10_001;
        assert!(config.validate().is_err());

        config.default_tax_rate_bps = 0;
        assert!(config.validate().is_ok());

        config.cart_storage_key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RegisterConfig = toml::from_str("store_name = \"Kiosk\"").unwrap();
        assert_eq!(config.store_name, "Kiosk");
        assert_eq!(config.default_tax_rate_bps, 1800);
        assert_eq!(config.cart_storage_key, "pos-cart");
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("register.toml");
        std::fs::write(
            &path,
            "store_name = \"Kiosk\"\ndefault_tax_rate_bps = 500\ncart_storage_key = \"lane-1\"\n",
        )
        .unwrap();

        let config = RegisterConfig::load(Some(path)).unwrap();
        assert_eq!(config.store_name, "Kiosk");
        assert_eq!(config.default_tax_rate_bps, 500);
        assert_eq!(config.cart_storage_key, "lane-1");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("register.toml");

        std::fs::write(&path, "default_tax_rate_bps = 20000\n").unwrap();
        assert!(matches!(
            RegisterConfig::load(Some(path.clone())),
            Err(ConfigError::Invalid(_))
        ));

        std::fs::write(&path, "persist_cart = \"sometimes\"\n").unwrap();
        assert!(matches!(RegisterConfig::load(Some(path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_resolve_explicit_database_path_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config = RegisterConfig {
            database_path: Some(dir.path().join("nested").join("till.db")),
            ..RegisterConfig::default()
        };

        let path = config.resolve_database_path().unwrap();
        assert!(path.parent().unwrap().is_dir());
    }
}
