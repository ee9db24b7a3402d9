// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value
    )
)]

//! Order Engine - Core Library
//!
//! Transactional order management for the Orderdesk system.
//!
//! # Architecture
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: record types and business validation
//!   - `records`: Client, Product, Order, Bill as plain data
//!   - `validation`: pure per-record validators and the error taxonomy
//!
//! - **Application**: services orchestrating validation and storage
//!   - `clients` / `products`: validated CRUD
//!   - `orders`: the transactional place-order workflow
//!
//! - **Infrastructure**: adapters
//!   - `persistence`: record descriptors, the generic store, the
//!     append-only audit log, and schema bootstrap over SQLite
//!   - `http`: JSON API for the presentation layer
//!
//! The generic store maps any record type to its table from a
//! compile-time descriptor (table = type name, columns = fields in
//! declaration order, first field = primary key), so no per-type SQL
//! exists. The order workflow is the one multi-store operation and
//! runs inside a single transaction with a conditional stock
//! decrement, so concurrent placements cannot oversell.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - records and validation, no external dependencies.
pub mod domain;

/// Application layer - services and the order workflow.
pub mod application;

/// Infrastructure layer - persistence and HTTP adapters.
pub mod infrastructure;

/// Configuration loading.
pub mod config;

/// Tracing setup.
pub mod telemetry;

// Domain re-exports
pub use domain::{Bill, Client, Order, Product, ValidationError};

// Application re-exports
pub use application::{ClientService, OrderReceipt, OrderService, ProductService, ServiceError};

// Infrastructure re-exports
pub use infrastructure::http::{create_router, AppState};
pub use infrastructure::persistence::{schema, AuditLog, Record, Store, StoreError};
