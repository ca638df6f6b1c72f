use crate::domain::model::RawAlbum;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn cover_service(&self) -> &str;
    fn reset_before_publish(&self) -> bool;
}

/// Source of the raw catalog. One call, one complete answer or one error.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<RawAlbum>>;
}

/// Receives the single user-facing message of a failed load.
///
/// A panic here is logged by the loader and does not escape `run`.
pub trait FailureHandler: Send + Sync {
    fn on_failure(&self, message: &str);
}

impl<F> FailureHandler for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_failure(&self, message: &str) {
        self(message)
    }
}
