use crate::domain::model::{Product, ProductId, StockRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Product metadata lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, id: ProductId) -> Result<Product>;
}

/// Available-quantity lookup.
#[async_trait]
pub trait StockService: Send + Sync {
    async fn get_stock(&self, id: ProductId) -> Result<StockRecord>;
}

/// Durable key-value storage that survives restarts.
pub trait PersistentStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// User-facing error channel. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn request_timeout_seconds(&self) -> Option<u64>;
    fn default_headers(&self) -> Vec<(String, String)>;
}
