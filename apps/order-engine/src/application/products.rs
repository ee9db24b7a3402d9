//! Product management service.

use sqlx::SqlitePool;

use super::ServiceError;
use crate::domain::{Product, ProductPriceValidator, ProductQuantityValidator, Validator};
use crate::infrastructure::persistence::Store;

/// Validates and persists products.
pub struct ProductService {
    pool: SqlitePool,
    store: Store<Product>,
    validators: Vec<Box<dyn Validator<Product>>>,
}

impl ProductService {
    /// Create a service with the standard price and quantity validators.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            store: Store::new(),
            validators: vec![
                Box::new(ProductPriceValidator::default()),
                Box::new(ProductQuantityValidator::default()),
            ],
        }
    }

    fn check(&self, product: &Product) -> Result<(), ServiceError> {
        for validator in &self.validators {
            validator.validate(product)?;
        }
        Ok(())
    }

    /// Validate and insert a product; returns the assigned id.
    pub async fn insert(&self, product: &Product) -> Result<i64, ServiceError> {
        self.check(product)?;
        let id = self.store.insert(&self.pool, product).await?;
        tracing::info!(product_id = id, "product created");
        Ok(id)
    }

    /// Validate and update an existing product.
    pub async fn update(&self, product: &Product) -> Result<(), ServiceError> {
        self.check(product)?;
        self.store.update(&self.pool, product).await?;
        tracing::info!(product_id = product.id, "product updated");
        Ok(())
    }

    /// Delete a product by id. Missing ids are a no-op.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.store.delete(&self.pool, id).await?;
        Ok(())
    }

    /// Fetch one product.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        Ok(self.store.find_by_id(&self.pool, id).await?)
    }

    /// All products in insertion order.
    pub async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.store.find_all(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::domain::ValidationError;
    use crate::infrastructure::persistence::schema;

    async fn service() -> ProductService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        schema::apply(&pool).await.unwrap();
        ProductService::new(pool)
    }

    fn widget() -> Product {
        Product {
            id: 0,
            name: "Widget".to_string(),
            price: dec!(10.0),
            quantity: 5,
        }
    }

    #[tokio::test]
    async fn insert_rejects_out_of_range_price() {
        let service = service().await;

        let mut overpriced = widget();
        overpriced.price = dec!(10000.01);
        let err = service.insert(&overpriced).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::PriceOutOfRange { .. })
        ));
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_rejects_out_of_range_quantity() {
        let service = service().await;

        let mut hoard = widget();
        hoard.quantity = 1001;
        let err = service.insert(&hoard).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::QuantityOutOfRange { .. })
        ));
    }

    #[tokio::test]
    async fn insert_update_delete_round_trip() {
        let service = service().await;

        let id = service.insert(&widget()).await.unwrap();
        let mut stored = service.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.price, dec!(10.0));

        stored.price = dec!(11.25);
        service.update(&stored).await.unwrap();
        assert_eq!(
            service.find_by_id(id).await.unwrap().unwrap().price,
            dec!(11.25)
        );

        service.delete(id).await.unwrap();
        assert!(service.find_by_id(id).await.unwrap().is_none());
    }
}
