#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

use crate::core::augment::DEFAULT_COVER_SERVICE;
use crate::core::client::DEFAULT_CATALOG_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_cover_service, validate_url, Validate};

/// Settings the loader actually runs with, whatever they were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub api_endpoint: String,
    pub cover_service: String,
    pub reset_before_publish: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_CATALOG_ENDPOINT.to_string(),
            cover_service: DEFAULT_COVER_SERVICE.to_string(),
            reset_before_publish: false,
        }
    }
}

impl ConfigProvider for CatalogSettings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn cover_service(&self) -> &str {
        &self.cover_service
    }

    fn reset_before_publish(&self) -> bool {
        self.reset_before_publish
    }
}

impl Validate for CatalogSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_cover_service("cover_service", &self.cover_service)
    }
}
