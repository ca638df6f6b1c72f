pub mod augment;
pub mod client;
pub mod collection;
pub mod dispatcher;
pub mod loader;

pub use crate::domain::model::{Album, LoadState, RawAlbum};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, FailureHandler};
pub use crate::utils::error::Result;
