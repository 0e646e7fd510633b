use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use ecomgen_core::PipelineConfig;

/// Flags shared by every subcommand. Each one overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// TOML file with pipeline settings; missing keys use defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Directory for the generated CSV files.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// SQLite store path.
    #[arg(long = "db", global = true, value_name = "FILE")]
    pub db_path: Option<PathBuf>,
    /// Directory for report exports.
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Generation overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationArgs {
    /// Seed for the random streams.
    #[arg(long, conflicts_with = "unseeded")]
    pub seed: Option<u64>,
    /// Draw a fresh seed from OS entropy.
    #[arg(long, default_value_t = false)]
    pub unseeded: bool,
    #[arg(long)]
    pub customers: Option<u64>,
    #[arg(long)]
    pub products: Option<u64>,
    #[arg(long)]
    pub orders: Option<u64>,
    /// Upper bound of line items per order.
    #[arg(long)]
    pub max_items: Option<u32>,
    /// Upper bound of units per line item.
    #[arg(long)]
    pub max_quantity: Option<u32>,
    /// Fixed "today" for date generation (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub anchor_date: Option<NaiveDate>,
}

/// Load the config file (or defaults) and apply flag overrides.
pub fn resolve(
    paths: &PathArgs,
    generation: Option<&GenerationArgs>,
) -> ecomgen_core::Result<PipelineConfig> {
    let mut config = match &paths.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(dir) = &paths.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(path) = &paths.db_path {
        config.db_path = path.clone();
    }
    if let Some(dir) = &paths.output_dir {
        config.output_dir = dir.clone();
    }

    if let Some(args) = generation {
        let generation = &mut config.generation;
        if let Some(seed) = args.seed {
            generation.seed = seed;
            generation.unseeded = false;
        }
        if args.unseeded {
            generation.unseeded = true;
        }
        if let Some(customers) = args.customers {
            generation.customers = customers;
        }
        if let Some(products) = args.products {
            generation.products = products;
        }
        if let Some(orders) = args.orders {
            generation.orders = orders;
        }
        if let Some(max_items) = args.max_items {
            generation.max_items_per_order = max_items;
        }
        if let Some(max_quantity) = args.max_quantity {
            generation.max_quantity = max_quantity;
        }
        if let Some(anchor_date) = args.anchor_date {
            generation.anchor_date = anchor_date;
        }
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let config = resolve(&PathArgs::default(), None).expect("resolve");
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let paths = PathArgs {
            db_path: Some(PathBuf::from("tmp/test.db")),
            ..PathArgs::default()
        };
        let generation = GenerationArgs {
            seed: Some(7),
            orders: Some(10),
            ..GenerationArgs::default()
        };
        let config = resolve(&paths, Some(&generation)).expect("resolve");
        assert_eq!(config.db_path, PathBuf::from("tmp/test.db"));
        assert_eq!(config.generation.seed, 7);
        assert_eq!(config.generation.orders, 10);
        assert_eq!(config.generation.customers, 300);
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let generation = GenerationArgs {
            max_quantity: Some(0),
            ..GenerationArgs::default()
        };
        assert!(resolve(&PathArgs::default(), Some(&generation)).is_err());
    }
}
