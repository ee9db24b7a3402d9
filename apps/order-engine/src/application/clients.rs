//! Client management service.

use sqlx::SqlitePool;

use super::ServiceError;
use crate::domain::{Client, ClientAgeValidator, EmailValidator, Validator};
use crate::infrastructure::persistence::Store;

/// Validates and persists clients.
pub struct ClientService {
    pool: SqlitePool,
    store: Store<Client>,
    validators: Vec<Box<dyn Validator<Client>>>,
}

impl ClientService {
    /// Create a service with the standard email and age validators.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            store: Store::new(),
            validators: vec![
                Box::new(EmailValidator),
                Box::new(ClientAgeValidator::default()),
            ],
        }
    }

    fn check(&self, client: &Client) -> Result<(), ServiceError> {
        for validator in &self.validators {
            validator.validate(client)?;
        }
        Ok(())
    }

    /// Validate and insert a client; returns the assigned id.
    pub async fn insert(&self, client: &Client) -> Result<i64, ServiceError> {
        self.check(client)?;
        let id = self.store.insert(&self.pool, client).await?;
        tracing::info!(client_id = id, "client created");
        Ok(id)
    }

    /// Validate and update an existing client.
    pub async fn update(&self, client: &Client) -> Result<(), ServiceError> {
        self.check(client)?;
        self.store.update(&self.pool, client).await?;
        tracing::info!(client_id = client.id, "client updated");
        Ok(())
    }

    /// Delete a client by id. Missing ids are a no-op.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.store.delete(&self.pool, id).await?;
        Ok(())
    }

    /// Fetch one client.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Client>, ServiceError> {
        Ok(self.store.find_by_id(&self.pool, id).await?)
    }

    /// All clients in insertion order.
    pub async fn find_all(&self) -> Result<Vec<Client>, ServiceError> {
        Ok(self.store.find_all(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::domain::ValidationError;
    use crate::infrastructure::persistence::schema;

    async fn service() -> ClientService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        schema::apply(&pool).await.unwrap();
        ClientService::new(pool)
    }

    fn ana() -> Client {
        Client {
            id: 0,
            name: "Ana".to_string(),
            address: "1 Main St".to_string(),
            email: "ana@example.com".to_string(),
            age: 30,
        }
    }

    #[tokio::test]
    async fn insert_validates_before_writing() {
        let service = service().await;

        let mut minor = ana();
        minor.age = 3;
        let err = service.insert(&minor).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::AgeOutOfRange { age: 3, .. })
        ));
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_and_update_round_trip() {
        let service = service().await;

        let id = service.insert(&ana()).await.unwrap();
        let mut stored = service.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ana");

        stored.address = "2 Side St".to_string();
        service.update(&stored).await.unwrap();
        let updated = service.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(updated.address, "2 Side St");
    }

    #[tokio::test]
    async fn update_rejects_invalid_email() {
        let service = service().await;
        let id = service.insert(&ana()).await.unwrap();

        let mut stored = service.find_by_id(id).await.unwrap().unwrap();
        stored.email = "not-an-email".to_string();
        let err = service.update(&stored).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::InvalidEmail(_))
        ));

        // The stored row is untouched.
        let unchanged = service.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(unchanged.email, "ana@example.com");
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let service = service().await;
        let id = service.insert(&ana()).await.unwrap();

        service.delete(id).await.unwrap();
        assert!(service.find_by_id(id).await.unwrap().is_none());
    }
}
