//! Infrastructure layer - adapters around the domain.
//!
//! Persistence maps records to SQLite rows; the HTTP module exposes the
//! application services to the presentation layer.

/// Generic store, audit log, and schema management.
pub mod persistence;

/// HTTP/JSON API for the presentation layer.
pub mod http;
