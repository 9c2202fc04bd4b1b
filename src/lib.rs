pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use crate::adapters::http::HttpApi;
pub use crate::adapters::notifier::ConsoleNotifier;
pub use crate::adapters::storage::{LocalStorage, MemoryStorage};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::cart_store::{CartOutcome, CartStore};
pub use crate::core::{
    Cart, CartItem, ConfigProvider, Notifier, PersistentStore, Product, ProductCatalog, ProductId,
    QuantityUpdate, StockRecord, StockService, CART_STORAGE_KEY,
};
pub use crate::utils::error::{CartError, Result};
