use crate::core::{
    Cart, CartItem, Notifier, PersistentStore, ProductCatalog, ProductId, QuantityUpdate, Result,
    StockService, CART_STORAGE_KEY,
};
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;

pub const ADD_FAILED: &str = "product add failed";
pub const REMOVE_FAILED: &str = "product remove failed";
pub const OUT_OF_STOCK: &str = "quantity out of stock";
pub const CHANGE_FAILED: &str = "quantity change failed";

/// Result of a cart mutation. Anything but `Updated` left the cart unchanged
/// and has already been reported through the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    Updated,
    NotFound,
    OutOfStock { requested: u32, available: u32 },
    /// Decrement refused because the line is already at 1.
    BelowMinimum,
    LookupFailed,
    PersistFailed,
}

impl CartOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, CartOutcome::Updated)
    }
}

/// The single authoritative cart, mirrored to a `PersistentStore` after every
/// successful mutation.
///
/// Mutations queue on `operation` for their entire read-modify-write,
/// including the awaited catalog or stock lookup, so overlapping calls are
/// applied one after the other. Readers only touch `current`, which is
/// locked just long enough to clone or swap it.
pub struct CartStore<C: ProductCatalog, S: StockService, P: PersistentStore, N: Notifier> {
    catalog: C,
    stock: S,
    storage: P,
    notifier: N,
    operation: Mutex<()>,
    current: RwLock<Cart>,
}

impl<C, S, P, N> CartStore<C, S, P, N>
where
    C: ProductCatalog,
    S: StockService,
    P: PersistentStore,
    N: Notifier,
{
    pub fn new(catalog: C, stock: S, storage: P, notifier: N, cart: Cart) -> Self {
        Self {
            catalog,
            stock,
            storage,
            notifier,
            operation: Mutex::new(()),
            current: RwLock::new(cart),
        }
    }

    /// Builds the store from whatever `storage` holds under [`CART_STORAGE_KEY`].
    ///
    /// A missing entry yields an empty cart. Unparseable data is an error.
    pub fn restore(catalog: C, stock: S, storage: P, notifier: N) -> Result<Self> {
        let cart = match storage.read(CART_STORAGE_KEY)? {
            Some(raw) => Cart::from_json(&raw)?,
            None => Cart::new(),
        };
        tracing::debug!(items = cart.len(), "Restored cart from storage");
        Ok(Self::new(catalog, stock, storage, notifier, cart))
    }

    /// Snapshot of the current cart. Never waits on an in-flight mutation.
    pub fn cart(&self) -> Cart {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Adds one unit of `product_id`.
    ///
    /// A product already in the cart goes through the same stock-checked
    /// increment as [`CartStore::set_quantity`].
    pub async fn add_product(&self, product_id: ProductId) -> CartOutcome {
        let _guard = self.operation.lock().await;
        let cart = self.cart();

        if let Some(current) = cart.get(product_id).map(|item| item.amount) {
            tracing::debug!(%product_id, current, "Product already in cart, incrementing");
            return self
                .step_quantity(&cart, product_id, current.saturating_add(1))
                .await;
        }

        tracing::debug!(%product_id, "Fetching product from catalog");
        let product = match self.catalog.get_product(product_id).await {
            Ok(product) if product.id == product_id => product,
            Ok(product) => {
                tracing::warn!(%product_id, returned = %product.id, "Catalog answered with another product");
                self.notifier.error(ADD_FAILED);
                return CartOutcome::LookupFailed;
            }
            Err(e) => {
                tracing::warn!(%product_id, error = %e, "Catalog lookup failed");
                self.notifier.error(ADD_FAILED);
                return CartOutcome::LookupFailed;
            }
        };

        let mut next = cart;
        let added = next.push(CartItem::from_product(product));
        debug_assert!(added, "id was checked under the operation lock");

        self.commit(next, ADD_FAILED)
    }

    /// Removes the whole line for `product_id`.
    pub async fn remove_product(&self, product_id: ProductId) -> CartOutcome {
        let _guard = self.operation.lock().await;

        let Some(next) = self.cart().without(product_id) else {
            tracing::warn!(%product_id, "Cannot remove a product that is not in the cart");
            self.notifier.error(REMOVE_FAILED);
            return CartOutcome::NotFound;
        };

        self.commit(next, REMOVE_FAILED)
    }

    /// Moves the line one unit towards `update.amount`.
    ///
    /// Increments are checked against the stock service. Decrements never take
    /// a line below 1; use [`CartStore::remove_product`] for that.
    pub async fn set_quantity(&self, update: QuantityUpdate) -> CartOutcome {
        let _guard = self.operation.lock().await;
        let cart = self.cart();
        self.step_quantity(&cart, update.product_id, update.amount)
            .await
    }

    async fn step_quantity(&self, cart: &Cart, product_id: ProductId, target: u32) -> CartOutcome {
        let Some(current) = cart.get(product_id).map(|item| item.amount) else {
            tracing::warn!(%product_id, "Cannot change quantity of a product that is not in the cart");
            self.notifier.error(CHANGE_FAILED);
            return CartOutcome::NotFound;
        };

        let amount = if target > current {
            let stock = match self.stock.get_stock(product_id).await {
                Ok(stock) => stock,
                Err(e) => {
                    tracing::warn!(%product_id, error = %e, "Stock lookup failed");
                    self.notifier.error(CHANGE_FAILED);
                    return CartOutcome::LookupFailed;
                }
            };

            let requested = current.saturating_add(1);
            if requested > stock.amount {
                tracing::info!(%product_id, requested, available = stock.amount, "Not enough stock");
                self.notifier.error(OUT_OF_STOCK);
                return CartOutcome::OutOfStock {
                    requested,
                    available: stock.amount,
                };
            }
            requested
        } else {
            if current <= 1 {
                tracing::warn!(%product_id, "Refusing to decrement below 1");
                self.notifier.error(CHANGE_FAILED);
                return CartOutcome::BelowMinimum;
            }
            current - 1
        };

        let mut next = cart.clone();
        next.set_amount(product_id, amount);
        self.commit(next, CHANGE_FAILED)
    }

    /// Writes `next` to storage and only then makes it the current cart.
    ///
    /// Callers hold the operation lock.
    fn commit(&self, next: Cart, failure_message: &str) -> CartOutcome {
        if let Err(e) = self.persist(&next) {
            tracing::error!(error = %e, "Failed to persist cart");
            self.notifier.error(failure_message);
            return CartOutcome::PersistFailed;
        }

        tracing::info!(items = next.len(), units = next.item_count(), "Cart updated");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
        CartOutcome::Updated
    }

    fn persist(&self, cart: &Cart) -> Result<()> {
        let raw = cart.to_json()?;
        tracing::debug!(bytes = raw.len(), "Writing cart to storage");
        self.storage.write(CART_STORAGE_KEY, &raw)
    }
}
