use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealweek_mealplan::CookOnceOptions;
use mealweek_shared::household::HouseholdConfig;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub household: HouseholdConfig,
    #[serde(default)]
    pub shopping: ShoppingConfig,
    #[serde(default)]
    pub cook_once: CookOnceConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShoppingConfig {
    /// Whole words removed from the shopping list, case-insensitive.
    #[serde(default = "default_excluded_items")]
    pub excluded_items: Vec<String>,
}

impl Default for ShoppingConfig {
    fn default() -> Self {
        Self {
            excluded_items: default_excluded_items(),
        }
    }
}

fn default_excluded_items() -> Vec<String> {
    vec!["water".to_string(), "salt".to_string(), "ice".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct CookOnceConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_adult_portions")]
    pub adult_portions: f64,
    #[serde(default = "default_max_derived")]
    pub max_derived: usize,
}

impl Default for CookOnceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            adult_portions: default_adult_portions(),
            max_derived: default_max_derived(),
        }
    }
}

impl CookOnceConfig {
    pub fn options(&self) -> CookOnceOptions {
        CookOnceOptions {
            adult_portions: self.adult_portions,
            max_derived: self.max_derived,
        }
    }
}

fn default_adult_portions() -> f64 {
    CookOnceOptions::default().adult_portions
}

fn default_max_derived() -> usize {
    CookOnceOptions::default().max_derived
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CATALOG_PATH),
        }
    }
}

const DEFAULT_CATALOG_PATH: &str = "data/recipes.json";

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALWEEK__HOUSEHOLD__PORTION_MULTIPLIER, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("catalog.path", DEFAULT_CATALOG_PATH)?
            .set_default("observability.log_level", default_log_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: missing file means defaults only
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MEALWEEK")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.household.validate().map_err(|e| e.to_string())?;

        if !self.cook_once.adult_portions.is_finite() || self.cook_once.adult_portions <= 0.0 {
            return Err("Cook-once adult_portions must be positive".to_string());
        }
        if self.catalog.path.as_os_str().is_empty() {
            return Err("Catalog path must not be empty".to_string());
        }
        Ok(())
    }
}
