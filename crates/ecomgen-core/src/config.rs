use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Paths and generation settings shared by all pipeline stages.
///
/// Every field has a compiled-in default, so an empty TOML file (or no file
/// at all) yields a runnable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory holding the generated CSV artifacts.
    pub data_dir: PathBuf,
    /// SQLite database file written by the loader and read by the reporter.
    pub db_path: PathBuf,
    /// Directory receiving the report exports.
    pub output_dir: PathBuf,
    pub generation: GenerationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            db_path: PathBuf::from("db").join("ecom.db"),
            output_dir: PathBuf::from("output"),
            generation: GenerationConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a TOML file; missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.generation.validate()
    }
}

/// Row counts and randomness for the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    pub seed: u64,
    /// Ignore `seed` and draw one from OS entropy.
    pub unseeded: bool,
    pub customers: u64,
    pub products: u64,
    pub orders: u64,
    pub max_items_per_order: u32,
    pub max_quantity: u32,
    /// Fixed "today" for date generation.
    pub anchor_date: NaiveDate,
}

pub const DEFAULT_SEED: u64 = 42;

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            unseeded: false,
            customers: 300,
            products: 120,
            orders: 400,
            max_items_per_order: 5,
            max_quantity: 4,
            anchor_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
        }
    }
}

impl GenerationConfig {
    /// Seed in effect, `None` when the run should draw from entropy.
    pub fn effective_seed(&self) -> Option<u64> {
        if self.unseeded { None } else { Some(self.seed) }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("customers", self.customers),
            ("products", self.products),
            ("orders", self.orders),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        if self.max_items_per_order == 0 {
            return Err(Error::InvalidConfig(
                "max_items_per_order must be at least 1".to_string(),
            ));
        }
        if u64::from(self.max_items_per_order) > self.products {
            return Err(Error::InvalidConfig(format!(
                "max_items_per_order ({}) exceeds products ({})",
                self.max_items_per_order, self.products
            )));
        }
        if self.max_quantity == 0 {
            return Err(Error::InvalidConfig(
                "max_quantity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pipeline_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.db_path, PathBuf::from("db/ecom.db"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.generation.effective_seed(), Some(DEFAULT_SEED));
        config.validate().expect("defaults validate");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PipelineConfig = toml::from_str(
            r#"
            output_dir = "exports"

            [generation]
            customers = 50
            anchor_date = "2025-03-01"
            "#,
        )
        .expect("parse toml");

        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.generation.customers, 50);
        assert_eq!(config.generation.products, 120);
        assert_eq!(
            config.generation.anchor_date,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<PipelineConfig, _> = toml::from_str("rows = 5");
        assert!(result.is_err());
    }

    #[test]
    fn basket_larger_than_catalog_is_rejected() {
        let config = GenerationConfig {
            products: 3,
            max_items_per_order: 5,
            ..GenerationConfig::default()
        };
        let err = config.validate().expect_err("invalid");
        assert!(err.to_string().contains("max_items_per_order"));
    }

    #[test]
    fn unseeded_has_no_effective_seed() {
        let config = GenerationConfig {
            unseeded: true,
            ..GenerationConfig::default()
        };
        assert_eq!(config.effective_seed(), None);
    }
}
