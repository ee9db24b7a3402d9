//! Application layer - services orchestrating validation and storage.

/// Client management.
pub mod clients;

/// Order placement workflow and order/bill queries.
pub mod orders;

/// Product management.
pub mod products;

pub use clients::ClientService;
pub use orders::{OrderReceipt, OrderService};
pub use products::ProductService;

use thiserror::Error;

use crate::domain::ValidationError;
use crate::infrastructure::persistence::StoreError;

/// Failures surfaced by the application services.
///
/// Validation failures always abort before any write; store failures
/// abort the operation (and roll back any open transaction) rather
/// than being masked as empty results.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business invariant was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The persistence layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
