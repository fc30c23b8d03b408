//! Extractor configuration, loadable from TOML.
//!
//! ```toml
//! county = "hays"
//! fuzzy_threshold = 80
//! moratorium_cutoff = "2020-03-14"
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use docket_types::types::County;
use serde::Deserialize;
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("fuzzy_threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(u32),
    #[error("invalid base_url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Per-run settings for the extraction engine.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    pub county: County,
    /// Word pairs must score strictly above this to count toward a side.
    pub fuzzy_threshold: u32,
    /// Judgments dated on or after this day are flagged as post-moratorium.
    pub moratorium_cutoff: NaiveDate,
    /// Overrides the county's public-access root for resolving links.
    pub base_url: Option<String>,
}

pub const DEFAULT_FUZZY_THRESHOLD: u32 = 75;

pub fn default_moratorium_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, 14).unwrap_or_default()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            county: County::default(),
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            moratorium_cutoff: default_moratorium_cutoff(),
            base_url: None,
        }
    }
}

impl ExtractorConfig {
    pub fn for_county(county: County) -> Self {
        ExtractorConfig {
            county,
            ..Default::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ExtractorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fuzzy_threshold > 100 {
            return Err(ConfigError::InvalidThreshold(self.fuzzy_threshold));
        }
        self.base_url()?;
        Ok(())
    }

    /// Root URL register links are resolved against.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.county.base_url());
        Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = ExtractorConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.fuzzy_threshold, 75);
        assert_eq!(
            config.moratorium_cutoff,
            NaiveDate::from_ymd_opt(2020, 3, 14).unwrap()
        );
    }

    #[test]
    fn parses_all_fields() {
        let config = ExtractorConfig::from_toml_str(
            r#"
            county = "wilco"
            fuzzy_threshold = 80
            moratorium_cutoff = "2021-01-01"
            base_url = "https://portal.example.org/PublicAccess/"
            "#,
        )
        .unwrap();
        assert_eq!(config.county, County::Williamson);
        assert_eq!(config.fuzzy_threshold, 80);
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://portal.example.org/PublicAccess/"
        );
    }

    #[test]
    fn rejects_threshold_over_100() {
        let err = ExtractorConfig::from_toml_str("fuzzy_threshold = 101").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(101)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ExtractorConfig::from_toml_str("threshold = 10").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = ExtractorConfig::from_toml_str(r#"base_url = "not a url""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn county_default_base_url() {
        let config = ExtractorConfig::for_county(County::Hays);
        assert_eq!(config.base_url().unwrap().as_str(), "http://public.co.hays.tx.us/");
    }
}
