//! Persistence layer.
//!
//! The [`Record`] trait is a compile-time schema descriptor: table
//! name, column order, and key convention are fixed per type, once.
//! [`Store`] performs CRUD for any descriptor without type-specific
//! SQL; [`AuditLog`] is the independent append-only bill store.
//!
//! Backend failures are never masked: every operation returns a
//! [`StoreError`] variant that callers can tell apart from "no data".

mod audit;
mod record;
pub mod schema;
mod store;

pub use audit::AuditLog;
pub use record::{Record, SqliteQuery};
pub use store::Store;

use thiserror::Error;

/// Errors surfaced by the store and audit log.
///
/// `NotFound` and `Backend` are deliberately distinct: an unreachable
/// database must not look like an empty table to the workflow layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched where one was required (e.g. an update target).
    #[error("no {table} row with id {id}")]
    NotFound {
        /// Table that was queried.
        table: &'static str,
        /// Key that did not match.
        id: i64,
    },

    /// The backend rejected a statement or was unreachable.
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),

    /// A row could not be mapped back to its record type.
    #[error("could not rebuild {table} row: {reason}")]
    Reconstruction {
        /// Table the row came from.
        table: &'static str,
        /// Column-level cause.
        reason: String,
    },
}
