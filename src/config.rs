use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NormalizerConfig {
    /// USDA FoodData Central connection settings
    #[serde(default)]
    pub usda: UsdaConfig,
    /// Which nutrients are totalled and how they are relabelled
    #[serde(default)]
    pub nutrients: NutrientConfig,
    /// Additions to the built-in unit table
    #[serde(default)]
    pub units: UnitsConfig,
}

/// Configuration for the USDA food search client
#[derive(Debug, Deserialize, Clone)]
pub struct UsdaConfig {
    /// API key (can also be set via the USDA_KEY environment variable)
    pub api_key: Option<String>,
    /// Base URL for the API (override for proxies and tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// FoodData Central data types to search
    #[serde(default = "default_data_types")]
    pub data_types: Vec<String>,
    /// Number of foods requested per search; only the first is used
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for UsdaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            data_types: default_data_types(),
            page_size: default_page_size(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for nutrient aggregation
#[derive(Debug, Deserialize, Clone)]
pub struct NutrientConfig {
    /// Nutrient codes included in totals; everything else is dropped
    #[serde(default = "default_tracked_nutrients")]
    pub tracked: Vec<String>,
    /// Extra synthetic entries emitted for specific (food, nutrient) pairs
    #[serde(default = "default_overrides")]
    pub overrides: Vec<NutrientOverride>,
}

impl Default for NutrientConfig {
    fn default() -> Self {
        Self {
            tracked: default_tracked_nutrients(),
            overrides: default_overrides(),
        }
    }
}

/// When `food_id` reports `nutrient_number`, the fact is also recorded under
/// `synthetic_number` / `synthetic_name`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NutrientOverride {
    pub food_id: u64,
    pub nutrient_number: String,
    pub synthetic_number: String,
    pub synthetic_name: String,
}

/// Configuration for unit recognition
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UnitsConfig {
    /// Map of alias to canonical unit name, e.g. `stick = "stick"`
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

// Default value functions
fn default_base_url() -> String {
    "https://api.nal.usda.gov".to_string()
}

fn default_data_types() -> Vec<String> {
    vec!["Foundation".to_string()]
}

fn default_page_size() -> u32 {
    1
}

fn default_timeout() -> u64 {
    30
}

/// Energy, macronutrients, sugars, fats, cholesterol and the common minerals
/// and vitamins shown on a nutrition panel.
pub const DEFAULT_TRACKED_NUTRIENTS: [&str; 16] = [
    "208", "298", "606", "605", "645", "646", "601", "307", "205", "291", "269.3", "203", "328",
    "301", "303", "306",
];

/// FoodData Central id of granulated sugar; its total sugars are added sugar.
pub const ADDED_SUGAR_FOOD_ID: u64 = 746784;

/// Nutrient code of "Sugars, Total".
pub const TOTAL_SUGARS_NUTRIENT: &str = "269.3";

fn default_tracked_nutrients() -> Vec<String> {
    DEFAULT_TRACKED_NUTRIENTS
        .iter()
        .map(|code| code.to_string())
        .collect()
}

fn default_overrides() -> Vec<NutrientOverride> {
    vec![NutrientOverride {
        food_id: ADDED_SUGAR_FOOD_ID,
        nutrient_number: TOTAL_SUGARS_NUTRIENT.to_string(),
        synthetic_number: "AddedSugar".to_string(),
        synthetic_name: "Added Sugar".to_string(),
    }]
}

impl NormalizerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_NORMALIZE__ prefix
    /// 2. recipe-normalize.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_NORMALIZE__USDA__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`NormalizerConfig::load`] for the precedence rules.
pub fn load_config() -> Result<NormalizerConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-normalize").required(false))
        // Use double underscore for nested: RECIPE_NORMALIZE__USDA__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_NORMALIZE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
