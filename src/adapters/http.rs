use crate::core::{ConfigProvider, Product, ProductCatalog, ProductId, StockRecord, StockService};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the storefront API: `GET /products/{id}` and `GET /stock/{id}`.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder().default_headers(build_headers(config)?);
        if let Some(seconds) = config.request_timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            base_url: config.api_endpoint().trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CartError::LookupError {
                message: format!("{} not found", path),
            });
        }

        Ok(response.error_for_status()?.json::<T>().await?)
    }
}

fn build_headers<C: ConfigProvider>(config: &C) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in config.default_headers() {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| CartError::InvalidConfigValueError {
                field: "api.headers".to_string(),
                value: name.clone(),
                reason: format!("Invalid header name: {}", e),
            })?;
        let header_value =
            HeaderValue::from_str(&value).map_err(|e| CartError::InvalidConfigValueError {
                field: format!("api.headers.{}", name),
                value: value.clone(),
                reason: format!("Invalid header value: {}", e),
            })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

#[async_trait]
impl ProductCatalog for HttpApi {
    async fn get_product(&self, id: ProductId) -> Result<Product> {
        self.get_json(&format!("/products/{}", id)).await
    }
}

#[async_trait]
impl StockService for HttpApi {
    async fn get_stock(&self, id: ProductId) -> Result<StockRecord> {
        self.get_json(&format!("/stock/{}", id)).await
    }
}
