use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};
use std::path::PathBuf;

/// Catalog service settings
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Directory uploaded assets are written to
    pub asset_dir: PathBuf,
    /// Number of generated sample records inserted at startup
    pub seed_records: usize,
}

impl CatalogConfig {
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            seed_records: 0,
        }
    }

    pub fn with_seed_records(mut self, count: usize) -> Self {
        self.seed_records = count;
        self
    }
}

impl FromEnv for CatalogConfig {
    /// Reads:
    /// - ASSET_DIR: defaults to `img`
    /// - CATALOG_SEED_RECORDS: defaults to 0
    fn from_env() -> Result<Self, ConfigError> {
        let asset_dir = PathBuf::from(env_or_default("ASSET_DIR", "img"));
        let seed_records = env_parse_or("CATALOG_SEED_RECORDS", 0usize)?;

        Ok(Self {
            asset_dir,
            seed_records,
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new("img")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_config_defaults() {
        temp_env::with_vars(
            [
                ("ASSET_DIR", None::<&str>),
                ("CATALOG_SEED_RECORDS", None::<&str>),
            ],
            || {
                let config = CatalogConfig::from_env().unwrap();
                assert_eq!(config.asset_dir, PathBuf::from("img"));
                assert_eq!(config.seed_records, 0);
            },
        );
    }

    #[test]
    fn test_catalog_config_custom_values() {
        temp_env::with_vars(
            [
                ("ASSET_DIR", Some("/var/lib/catalog/assets")),
                ("CATALOG_SEED_RECORDS", Some("25")),
            ],
            || {
                let config = CatalogConfig::from_env().unwrap();
                assert_eq!(config.asset_dir, PathBuf::from("/var/lib/catalog/assets"));
                assert_eq!(config.seed_records, 25);
            },
        );
    }

    #[test]
    fn test_catalog_config_invalid_seed_count() {
        temp_env::with_var("CATALOG_SEED_RECORDS", Some("-1"), || {
            let err = CatalogConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("CATALOG_SEED_RECORDS"));
        });
    }

    #[test]
    fn test_catalog_config_builder() {
        let config = CatalogConfig::new("assets").with_seed_records(4);
        assert_eq!(config.asset_dir, PathBuf::from("assets"));
        assert_eq!(config.seed_records, 4);
    }
}
