use crate::config::CatalogSettings;
use crate::core::augment::DEFAULT_COVER_SERVICE;
use crate::core::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub covers: Option<CoversConfig>,
    pub publish: Option<PublishConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoversConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    pub reset_before_publish: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| CatalogError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${CATALOG_ENDPOINT})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| CatalogError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn cover_base_url(&self) -> &str {
        self.covers
            .as_ref()
            .and_then(|c| c.base_url.as_deref())
            .unwrap_or(DEFAULT_COVER_SERVICE)
    }

    pub fn reset_enabled(&self) -> bool {
        self.publish
            .as_ref()
            .and_then(|p| p.reset_before_publish)
            .unwrap_or(false)
    }

    pub fn to_settings(&self) -> CatalogSettings {
        CatalogSettings {
            api_endpoint: self.source.endpoint.clone(),
            cover_service: self.cover_base_url().to_string(),
            reset_before_publish: self.reset_enabled(),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn cover_service(&self) -> &str {
        self.cover_base_url()
    }

    fn reset_before_publish(&self) -> bool {
        self.reset_enabled()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_url("source.endpoint", &self.source.endpoint)?;
        crate::utils::validation::validate_cover_service("covers.base_url", self.cover_base_url())
    }
}
