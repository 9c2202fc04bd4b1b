use anyhow::Result;
use cart_store::{
    Cart, CartItem, CartOutcome, CartStore, HttpApi, LocalStorage, Notifier, PersistentStore,
    ProductId, QuantityUpdate, CART_STORAGE_KEY,
};
use httpmock::prelude::*;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

type HttpCartStore = CartStore<HttpApi, HttpApi, LocalStorage, RecordingNotifier>;

fn open_store(server: &MockServer, dir: &TempDir, notifier: &RecordingNotifier) -> Result<HttpCartStore> {
    let api = HttpApi::new(server.base_url());
    let storage = LocalStorage::new(dir.path());
    Ok(CartStore::restore(api.clone(), api, storage, notifier.clone())?)
}

fn stored_cart(dir: &TempDir) -> Result<Option<Cart>> {
    let raw = LocalStorage::new(dir.path()).read(CART_STORAGE_KEY)?;
    Ok(raw.map(|raw| Cart::from_json(&raw)).transpose()?)
}

fn mock_shoe(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/products/5");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "id": 5,
                "title": "Shoe",
                "image": "u",
                "price": 10
            }));
    })
}

#[tokio::test]
async fn test_add_product_to_empty_cart() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let product_mock = mock_shoe(&server);
    let notifier = RecordingNotifier::default();

    let store = open_store(&server, &temp_dir, &notifier)?;
    let outcome = store.add_product(ProductId(5)).await;

    product_mock.assert();
    assert_eq!(outcome, CartOutcome::Updated);

    let expected = Cart::try_from(vec![CartItem {
        id: ProductId(5),
        title: "Shoe".to_string(),
        image: "u".to_string(),
        price: 10.0,
        amount: 1,
    }])?;
    assert_eq!(store.cart(), expected);
    assert_eq!(stored_cart(&temp_dir)?, Some(expected));
    assert!(notifier.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_increment_refused_when_stock_is_exhausted() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    mock_shoe(&server);
    let stock_mock = server.mock(|when, then| {
        when.method(GET).path("/stock/5");
        then.status(200).json_body(serde_json::json!({"id": 5, "amount": 1}));
    });
    let notifier = RecordingNotifier::default();

    let store = open_store(&server, &temp_dir, &notifier)?;
    assert!(store.add_product(ProductId(5)).await.is_updated());
    let before = store.cart();

    let outcome = store
        .set_quantity(QuantityUpdate {
            product_id: ProductId(5),
            amount: 2,
        })
        .await;

    stock_mock.assert();
    assert_eq!(
        outcome,
        CartOutcome::OutOfStock {
            requested: 2,
            available: 1
        }
    );
    assert_eq!(store.cart(), before);
    assert_eq!(stored_cart(&temp_dir)?, Some(before));
    assert_eq!(notifier.messages(), vec!["quantity out of stock".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_cart_survives_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    mock_shoe(&server);
    server.mock(|when, then| {
        when.method(GET).path("/stock/5");
        then.status(200).json_body(serde_json::json!({"amount": 10}));
    });
    let notifier = RecordingNotifier::default();

    {
        let store = open_store(&server, &temp_dir, &notifier)?;
        store.add_product(ProductId(5)).await;
        store.add_product(ProductId(5)).await;
        store.add_product(ProductId(5)).await;
    }

    let reopened = open_store(&server, &temp_dir, &notifier)?;
    let cart = reopened.cart();
    assert_eq!(cart.get(ProductId(5)).map(|item| item.amount), Some(3));

    assert!(reopened.remove_product(ProductId(5)).await.is_updated());
    assert!(reopened.cart().is_empty());
    assert_eq!(stored_cart(&temp_dir)?, Some(Cart::new()));
    assert!(notifier.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unreachable_catalog_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let product_mock = server.mock(|when, then| {
        when.method(GET).path("/products/7");
        then.status(500);
    });
    let notifier = RecordingNotifier::default();

    let store = open_store(&server, &temp_dir, &notifier)?;
    let outcome = store.add_product(ProductId(7)).await;

    product_mock.assert();
    assert_eq!(outcome, CartOutcome::LookupFailed);
    assert!(store.cart().is_empty());
    assert_eq!(stored_cart(&temp_dir)?, None);
    assert_eq!(notifier.messages(), vec!["product add failed".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_storage_fails_startup() -> Result<()> {
    let temp_dir = TempDir::new()?;
    LocalStorage::new(temp_dir.path()).write(CART_STORAGE_KEY, "not json")?;
    let server = MockServer::start();

    let result = open_store(&server, &temp_dir, &RecordingNotifier::default());

    assert!(result.is_err());
    Ok(())
}
