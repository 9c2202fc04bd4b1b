pub mod cart_store;

pub use crate::domain::model::{
    Cart, CartItem, Product, ProductId, QuantityUpdate, StockRecord, CART_STORAGE_KEY,
};
pub use crate::domain::ports::{ConfigProvider, Notifier, PersistentStore, ProductCatalog, StockService};
pub use crate::utils::error::Result;
