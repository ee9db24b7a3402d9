//! Schema bootstrap.
//!
//! One table per record type, named after the type, columns in field
//! declaration order with `id` as the generated primary key. The audit
//! table `Log` has its own fixed shape and is not descriptor-driven.

use sqlx::SqlitePool;

use super::StoreError;

const TABLES: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS "Client" (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        name    TEXT    NOT NULL,
        address TEXT    NOT NULL,
        email   TEXT    NOT NULL,
        age     INTEGER NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Product" (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        name     TEXT    NOT NULL,
        price    TEXT    NOT NULL,
        quantity INTEGER NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Order" (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        client_id  INTEGER NOT NULL,
        product_id INTEGER NOT NULL,
        order_date TEXT    NOT NULL,
        quantity   INTEGER NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS "Log" (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id    INTEGER NOT NULL,
        client_id   INTEGER NOT NULL,
        product_id  INTEGER NOT NULL,
        quantity    INTEGER NOT NULL,
        total_price TEXT    NOT NULL,
        timestamp   TEXT    NOT NULL
    )"#,
];

/// Create any missing tables. Safe to run at every startup.
pub async fn apply(pool: &SqlitePool) -> Result<(), StoreError> {
    for statement in TABLES {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!(tables = TABLES.len(), "schema applied");
    Ok(())
}
