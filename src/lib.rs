pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::config::{toml_config::TomlConfig, CatalogSettings};
pub use crate::core::{
    client::HttpCatalogClient,
    collection::{AlbumCollection, ChangeStream, CollectionChange},
    dispatcher::{DispatcherHandle, UiDispatcher},
    loader::{AlbumLoader, ConsoleFailureHandler, LoadReport},
};
pub use crate::domain::model::{Album, LoadState, RawAlbum};
pub use crate::utils::error::{CatalogError, Result};
