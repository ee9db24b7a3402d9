//! End-to-end tests for the order placement workflow.
//!
//! Exercises the full stack (services, generic store, audit log)
//! against an in-memory SQLite database.

use std::sync::Arc;

use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use order_engine::application::{ClientService, OrderService, ProductService, ServiceError};
use order_engine::domain::{Client, Product, ValidationError};
use order_engine::infrastructure::persistence::schema;

struct Harness {
    pool: SqlitePool,
    clients: ClientService,
    products: ProductService,
    orders: OrderService,
}

async fn harness() -> Harness {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    schema::apply(&pool).await.unwrap();
    Harness {
        clients: ClientService::new(pool.clone()),
        products: ProductService::new(pool.clone()),
        orders: OrderService::new(pool.clone()),
        pool,
    }
}

async fn seed_client(h: &Harness) -> i64 {
    h.clients
        .insert(&Client {
            id: 0,
            name: "Ana".to_string(),
            address: "1 Main St".to_string(),
            email: "ana@example.com".to_string(),
            age: 30,
        })
        .await
        .unwrap()
}

async fn seed_widget(h: &Harness, stock: i64) -> i64 {
    h.products
        .insert(&Product {
            id: 0,
            name: "Widget".to_string(),
            price: dec!(10.0),
            quantity: stock,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn placing_an_order_decrements_stock_and_writes_order_and_bill() {
    let h = harness().await;
    let client_id = seed_client(&h).await;
    let product_id = seed_widget(&h, 5).await;

    let receipt = h.orders.place_order(client_id, product_id, 3).await.unwrap();

    // Stock decremented exactly.
    let product = h.products.find_by_id(product_id).await.unwrap().unwrap();
    assert_eq!(product.quantity, 2);

    // Exactly one order referencing client and product.
    let orders = h.orders.find_all().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, receipt.order_id);
    assert_eq!(orders[0].client_id, client_id);
    assert_eq!(orders[0].product_id, product_id);
    assert_eq!(orders[0].quantity, 3);

    // Exactly one bill with the price captured at call time.
    let bills = h.orders.bill_history().await.unwrap();
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].order_id, receipt.order_id);
    assert_eq!(bills[0].total_price, dec!(30.0));
    assert_eq!(bills[0].timestamp, orders[0].order_date);
}

#[tokio::test]
async fn second_order_exceeding_remaining_stock_fails_validation() {
    let h = harness().await;
    let client_id = seed_client(&h).await;
    let product_id = seed_widget(&h, 5).await;

    h.orders.place_order(client_id, product_id, 3).await.unwrap();

    // 2 remaining < 3 requested.
    let err = h
        .orders
        .place_order(client_id, product_id, 3)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InsufficientStock {
            requested: 3,
            available: 2,
        })
    ));

    // The failed attempt wrote nothing.
    let product = h.products.find_by_id(product_id).await.unwrap().unwrap();
    assert_eq!(product.quantity, 2);
    assert_eq!(h.orders.find_all().await.unwrap().len(), 1);
    assert_eq!(h.orders.bill_history().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_product_fails_with_no_writes() {
    let h = harness().await;
    let client_id = seed_client(&h).await;

    let err = h.orders.place_order(client_id, 42, 1).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::UnknownProduct(42))
    ));
    assert!(h.orders.find_all().await.unwrap().is_empty());
    assert!(h.orders.bill_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_client_fails_with_no_writes() {
    let h = harness().await;
    let product_id = seed_widget(&h, 5).await;

    let err = h.orders.place_order(42, product_id, 1).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::UnknownClient(42))
    ));

    let product = h.products.find_by_id(product_id).await.unwrap().unwrap();
    assert_eq!(product.quantity, 5);
}

#[tokio::test]
async fn non_positive_quantity_is_rejected_before_any_lookup() {
    let h = harness().await;

    let err = h.orders.place_order(1, 1, 0).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NonPositiveOrderQuantity(0))
    ));
}

#[tokio::test]
async fn repeat_placements_are_distinct_purchases() {
    let h = harness().await;
    let client_id = seed_client(&h).await;
    let product_id = seed_widget(&h, 5).await;

    h.orders.place_order(client_id, product_id, 1).await.unwrap();
    h.orders.place_order(client_id, product_id, 1).await.unwrap();

    let product = h.products.find_by_id(product_id).await.unwrap().unwrap();
    assert_eq!(product.quantity, 3);
    assert_eq!(h.orders.find_all().await.unwrap().len(), 2);
    assert_eq!(h.orders.bill_history().await.unwrap().len(), 2);
}

#[tokio::test]
async fn find_all_orders_matches_individual_lookups() {
    let h = harness().await;
    let client_id = seed_client(&h).await;
    let product_id = seed_widget(&h, 10).await;

    for quantity in [1, 2, 3] {
        h.orders
            .place_order(client_id, product_id, quantity)
            .await
            .unwrap();
    }

    let all = h.orders.find_all().await.unwrap();
    assert_eq!(all.len(), 3);
    for order in &all {
        let found = h.orders.find_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(&found, order);
    }
}

#[tokio::test]
async fn concurrent_placements_cannot_oversell() {
    let h = harness().await;
    let client_id = seed_client(&h).await;
    let product_id = seed_widget(&h, 5).await;

    let orders = Arc::new(OrderService::new(h.pool.clone()));
    let first = {
        let orders = Arc::clone(&orders);
        tokio::spawn(async move { orders.place_order(client_id, product_id, 3).await })
    };
    let second = {
        let orders = Arc::clone(&orders);
        tokio::spawn(async move { orders.place_order(client_id, product_id, 3).await })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let stock_errors = results
        .iter()
        .filter(|r| {
            matches!(
                r,
                Err(ServiceError::Validation(
                    ValidationError::InsufficientStock { .. }
                ))
            )
        })
        .count();

    assert_eq!(successes, 1, "exactly one placement must win");
    assert_eq!(stock_errors, 1, "the loser must fail stock validation");

    let product = h.products.find_by_id(product_id).await.unwrap().unwrap();
    assert_eq!(product.quantity, 2);
    assert_eq!(h.orders.bill_history().await.unwrap().len(), 1);
}
