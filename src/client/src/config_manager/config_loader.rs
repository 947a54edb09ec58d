use anyhow::{Context, Result};
use config::Config as RConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use beacon_common::constants::{
    DEFAULT_ENDPOINT, DEFAULT_WAITLIST_ENDPOINT, REQUEST_TIMEOUT_MS,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Base address of the error reporting backend. Ships as a placeholder
    /// that integrators must override.
    pub endpoint: String,
    pub waitlist_endpoint: String,
    pub request_timeout_ms: u64,

    pub config_sources: Vec<String>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_default_config() -> Result<Config> {
        let mut builder = RConfig::builder();

        // set defaults
        builder = builder
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("waitlist_endpoint", DEFAULT_WAITLIST_ENDPOINT)?
            .set_default("request_timeout_ms", REQUEST_TIMEOUT_MS)?;

        // environment overrides, e.g. BEACON_ENDPOINT
        builder = builder.add_source(config::Environment::with_prefix("BEACON"));

        // set overrides
        builder = builder.set_override::<&str, Vec<&str>>("config_sources", vec![])?;

        let config: Config = builder
            .build()?
            .try_deserialize()
            .context("failed to parse config")?;

        Self::validate_base_url(&config.endpoint)?;
        Self::validate_base_url(&config.waitlist_endpoint)?;

        Ok(config)
    }

    fn validate_base_url(base: &str) -> Result<()> {
        Url::parse(base).with_context(|| format!("invalid endpoint url: {}", base))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_point_at_the_placeholder_backend() {
        let config = ConfigLoader::load_default_config().unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.waitlist_endpoint, DEFAULT_WAITLIST_ENDPOINT);
        assert_eq!(config.request_timeout_ms, REQUEST_TIMEOUT_MS);
        assert!(config.config_sources.is_empty());
    }

    #[test]
    #[serial]
    fn environment_overrides_the_endpoint() {
        std::env::set_var("BEACON_ENDPOINT", "https://errors.example.com");

        let config = ConfigLoader::load_default_config().unwrap();
        std::env::remove_var("BEACON_ENDPOINT");

        assert_eq!(config.endpoint, "https://errors.example.com");
    }

    #[test]
    #[serial]
    fn rejects_an_endpoint_that_is_not_a_url() {
        std::env::set_var("BEACON_ENDPOINT", "not a url");

        let result = ConfigLoader::load_default_config();
        std::env::remove_var("BEACON_ENDPOINT");

        assert!(result.is_err());
    }
}
