use super::toml_config::TomlConfig;
use super::CatalogSettings;
use crate::core::augment::DEFAULT_COVER_SERVICE;
use crate::core::client::DEFAULT_CATALOG_ENDPOINT;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "album-catalog")]
#[command(about = "Fetch the album catalog and publish it to an observable collection")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_CATALOG_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_COVER_SERVICE)]
    pub cover_service: String,

    #[arg(long, help = "Read settings from a TOML file instead of the flags above")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Clear the collection before publishing a new catalog")]
    pub reset_before_publish: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run counter actions (generate, increment) in order
    Counter {
        #[arg(required = true)]
        actions: Vec<String>,
    },
}

impl CliConfig {
    /// 有 --config 時以 TOML 為準，否則使用命令列參數
    pub fn settings(&self) -> Result<CatalogSettings> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                let mut settings = TomlConfig::from_file(path)?.to_settings();
                settings.reset_before_publish |= self.reset_before_publish;
                Ok(settings)
            }
            None => Ok(CatalogSettings {
                api_endpoint: self.api_endpoint.clone(),
                cover_service: self.cover_service.clone(),
                reset_before_publish: self.reset_before_publish,
            }),
        }
    }
}
