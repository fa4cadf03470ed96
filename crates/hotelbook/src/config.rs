//! Configuration management for hotelbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "hotelbook";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "hotel.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `HOTELBOOK_`, sections split on `__`)
/// 2. TOML config file at `~/.config/hotelbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Service behaviour.
    pub service: ServiceConfig,
    /// Demo authentication.
    pub auth: AuthConfig,
    /// Booking rules.
    pub booking: BookingConfig,
    /// Room catalog presentation.
    pub catalog: CatalogConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the snapshot database.
    /// Defaults to `~/.local/share/hotelbook/hotel.db`
    pub database_path: Option<PathBuf>,
}

/// Service-layer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Artificial latency added to every service call, in milliseconds.
    pub latency_ms: u64,
    /// Populate empty collections with generated demo data.
    pub seed_on_empty: bool,
    /// Fixed seed for ids, demo data and login coin flips.
    pub rng_seed: Option<u64>,
}

/// Demo authentication configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accounts that log in with any password, every time.
    pub demo_accounts: Vec<String>,
    /// Chance that any other registered account logs in.
    pub random_success_rate: f64,
}

/// How booking totals are reported after the room price changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingPolicy {
    /// Report the total captured when the booking was made.
    #[default]
    Frozen,
    /// Recompute from the room's current nightly price on every read.
    RecomputeOnRead,
}

impl std::fmt::Display for PricingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Frozen => write!(f, "frozen"),
            Self::RecomputeOnRead => write!(f, "recompute_on_read"),
        }
    }
}

/// Booking-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Pricing policy for reported totals.
    pub pricing_policy: PricingPolicy,
}

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Rooms per page in `rooms list`.
    pub page_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency_ms: 200,
            seed_on_empty: true,
            rng_seed: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            demo_accounts: default_demo_accounts(),
            random_success_rate: 0.7,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { page_size: 9 }
    }
}

/// The two seeded accounts that always authenticate.
fn default_demo_accounts() -> Vec<String> {
    vec!["admin@hotel.com".to_string(), "guest@example.com".to_string()]
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("HOTELBOOK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let rate = self.auth.random_success_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(Error::ConfigValidation {
                message: format!("random_success_rate ({rate}) must be between 0.0 and 1.0"),
            });
        }

        if self.catalog.page_size == 0 {
            return Err(Error::ConfigValidation {
                message: "page_size must be greater than 0".to_string(),
            });
        }

        for account in &self.auth.demo_accounts {
            if !account.contains('@') {
                return Err(Error::ConfigValidation {
                    message: format!("demo account is not an email address: {account}"),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the artificial service latency as a Duration.
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.service.latency_ms)
    }

    /// Check whether `email` is one of the always-accepted demo accounts.
    #[must_use]
    pub fn is_demo_account(&self, email: &str) -> bool {
        self.auth
            .demo_accounts
            .iter()
            .any(|a| a.eq_ignore_ascii_case(email))
    }

    /// A configuration suited to tests: no latency, fixed seed.
    #[must_use]
    pub fn for_tests() -> Self {
        let mut config = Self::default();
        config.service.latency_ms = 0;
        config.service.rng_seed = Some(7);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.service.latency_ms, 200);
        assert!(config.service.seed_on_empty);
        assert!(config.service.rng_seed.is_none());
        assert_eq!(config.catalog.page_size, 9);
        assert_eq!(config.booking.pricing_policy, PricingPolicy::Frozen);
    }

    #[test]
    fn test_default_auth_config() {
        let auth = AuthConfig::default();

        assert!((auth.random_success_rate - 0.7).abs() < f64::EPSILON);
        assert!(auth.demo_accounts.contains(&"admin@hotel.com".to_string()));
        assert!(auth.demo_accounts.contains(&"guest@example.com".to_string()));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
        assert!(Config::for_tests().validate().is_ok());
    }

    #[test]
    fn test_validate_rate_out_of_range() {
        let mut config = Config::default();
        config.auth.random_success_rate = 1.5;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("random_success_rate"));
    }

    #[test]
    fn test_validate_zero_page_size() {
        let mut config = Config::default();
        config.catalog.page_size = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("page_size"));
    }

    #[test]
    fn test_validate_demo_account_not_email() {
        let mut config = Config::default();
        config.auth.demo_accounts.push("root".to_string());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("root"));
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        assert!(config.database_path().to_string_lossy().contains("hotel.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/hotel.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/hotel.sqlite")
        );
    }

    #[test]
    fn test_latency() {
        assert_eq!(Config::default().latency(), Duration::from_millis(200));
        assert_eq!(Config::for_tests().latency(), Duration::ZERO);
    }

    #[test]
    fn test_is_demo_account_ignores_case() {
        let config = Config::default();
        assert!(config.is_demo_account("Admin@Hotel.com"));
        assert!(!config.is_demo_account("john.smith@example.com"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("hotelbook"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.catalog, CatalogConfig::default());
        assert_eq!(config.booking, BookingConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "hotelbook_config_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[booking]\npricing_policy = \"recompute_on_read\"\n\n[catalog]\npage_size = 4\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(
            config.booking.pricing_policy,
            PricingPolicy::RecomputeOnRead
        );
        assert_eq!(config.catalog.page_size, 4);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_pricing_policy_serde() {
        let json = serde_json::to_string(&PricingPolicy::RecomputeOnRead).unwrap();
        assert_eq!(json, "\"recompute_on_read\"");
        assert_eq!(PricingPolicy::Frozen.to_string(), "frozen");
    }
}
