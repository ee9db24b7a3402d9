//! Order placement workflow.
//!
//! The one place the system has a correctness obligation spanning
//! multiple stores: stock decrement, order insert, and bill append
//! must land together or not at all. Every placement runs inside a
//! single transaction, and the decrement is conditional on remaining
//! stock so concurrent placements cannot oversell.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use super::ServiceError;
use crate::domain::{Bill, Client, Order, Product, ValidationError};
use crate::infrastructure::persistence::{AuditLog, Store, StoreError};

/// Decrements stock only while enough remains; zero affected rows
/// means a concurrent placement won the race.
const DECREMENT_STOCK_SQL: &str =
    r#"UPDATE "Product" SET quantity = quantity - ? WHERE id = ? AND quantity >= ?"#;

/// Outcome of a successful placement.
#[derive(Debug, Clone)]
pub struct OrderReceipt {
    /// The persisted order's id.
    pub order_id: i64,
    /// The audit-log entry, including its assigned id.
    pub bill: Bill,
}

/// Places orders and reads order/bill history.
pub struct OrderService {
    pool: SqlitePool,
    orders: Store<Order>,
    products: Store<Product>,
    clients: Store<Client>,
    audit: AuditLog,
}

impl OrderService {
    /// Create the workflow service on a shared pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            orders: Store::new(),
            products: Store::new(),
            clients: Store::new(),
            audit: AuditLog::new(),
        }
    }

    /// Place an order: validate, decrement stock, persist the order,
    /// append the bill. All four steps commit together or roll back.
    ///
    /// The total price uses the unit price captured at validation
    /// time, and the order timestamp is captured at placement, not
    /// validation. Each call models a distinct purchase; repeating it
    /// produces another order and another decrement.
    pub async fn place_order(
        &self,
        client_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<OrderReceipt, ServiceError> {
        if quantity < 1 {
            return Err(ValidationError::NonPositiveOrderQuantity(quantity).into());
        }

        let mut tx = self.pool.begin().await.map_err(StoreError::from)?;

        if self
            .clients
            .find_by_id(&mut *tx, client_id)
            .await?
            .is_none()
        {
            return Err(ValidationError::UnknownClient(client_id).into());
        }
        let Some(product) = self.products.find_by_id(&mut *tx, product_id).await? else {
            return Err(ValidationError::UnknownProduct(product_id).into());
        };
        if quantity > product.quantity {
            return Err(ValidationError::InsufficientStock {
                requested: quantity,
                available: product.quantity,
            }
            .into());
        }

        let affected = sqlx::query(DECREMENT_STOCK_SQL)
            .bind(quantity)
            .bind(product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::from)?
            .rows_affected();
        if affected == 0 {
            return Err(ValidationError::InsufficientStock {
                requested: quantity,
                available: product.quantity,
            }
            .into());
        }

        let order = Order {
            id: 0,
            client_id,
            product_id,
            order_date: Utc::now(),
            quantity,
        };
        let order_id = self.orders.insert(&mut *tx, &order).await?;

        let mut bill = Bill {
            id: 0,
            order_id,
            client_id,
            product_id,
            quantity,
            total_price: product.price * Decimal::from(quantity),
            timestamp: order.order_date,
        };
        bill.id = self.audit.append(&mut *tx, &bill).await?;

        tx.commit().await.map_err(StoreError::from)?;

        tracing::info!(
            order_id,
            client_id,
            product_id,
            quantity,
            total = %bill.total_price,
            "order placed"
        );
        Ok(OrderReceipt { order_id, bill })
    }

    /// Fetch one order.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Order>, ServiceError> {
        Ok(self.orders.find_by_id(&self.pool, id).await?)
    }

    /// All orders in insertion order.
    pub async fn find_all(&self) -> Result<Vec<Order>, ServiceError> {
        Ok(self.orders.find_all(&self.pool).await?)
    }

    /// The full audit log of bills.
    pub async fn bill_history(&self) -> Result<Vec<Bill>, ServiceError> {
        Ok(self.audit.entries(&self.pool).await?)
    }
}
