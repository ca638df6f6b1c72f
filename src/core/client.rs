use crate::core::{CatalogSource, RawAlbum};
use crate::utils::error::Result;
use reqwest::Client;

pub const DEFAULT_CATALOG_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/albums";

/// Fetches the whole catalog with a single GET.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    endpoint: String,
    client: Client,
}

impl HttpCatalogClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_all(&self) -> Result<Vec<RawAlbum>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("API response status: {}", response.status());

        // 非 2xx 視為網路錯誤，不做任何降級處理
        let response = response.error_for_status()?;
        let body = response.text().await?;

        // 整包解析，失敗就整批作廢
        let albums: Vec<RawAlbum> = serde_json::from_str(&body)?;
        tracing::debug!("Decoded {} raw albums", albums.len());

        Ok(albums)
    }
}
