//! Record descriptor trait and implementations.
//!
//! Each record type declares, once, how it maps to its table: the
//! table is named after the type, columns follow field declaration
//! order, and the first column is the primary key. The generic store
//! builds every statement from this descriptor, so no per-type SQL
//! exists anywhere else.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};

use super::StoreError;
use crate::domain::{Client, Order, Product};

/// A parameterized SQLite statement under construction.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Compile-time schema descriptor for a persisted record type.
///
/// Contract: [`Record::COLUMNS`] must exactly match field declaration
/// order, with the primary key first, and [`Record::bind_non_key`]
/// must bind values in the same order the non-key columns are listed.
pub trait Record: Sized + Send + Unpin {
    /// Table name; by convention the type's simple name.
    const TABLE: &'static str;

    /// Column names in declaration order. The first entry is the
    /// primary key and is excluded from INSERT/UPDATE value lists.
    const COLUMNS: &'static [&'static str];

    /// Current primary key value (zero when not yet persisted).
    fn id(&self) -> i64;

    /// Bind every non-key field, in declaration order.
    fn bind_non_key<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;

    /// Rebuild a record from one row, reading columns by name.
    fn from_row(row: &SqliteRow) -> Result<Self, StoreError>;
}

/// Read one column, tagging failures with the table and column name.
fn column<'r, T>(row: &'r SqliteRow, table: &'static str, name: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get::<T, _>(name)
        .map_err(|e| StoreError::Reconstruction {
            table,
            reason: format!("{name}: {e}"),
        })
}

/// Decimals are persisted as TEXT; parse them back on the way out.
pub(crate) fn decimal_column(
    row: &SqliteRow,
    table: &'static str,
    name: &str,
) -> Result<Decimal, StoreError> {
    let text: String = column(row, table, name)?;
    Decimal::from_str(&text).map_err(|e| StoreError::Reconstruction {
        table,
        reason: format!("{name}: {e}"),
    })
}

impl Record for Client {
    const TABLE: &'static str = "Client";
    const COLUMNS: &'static [&'static str] = &["id", "name", "address", "email", "age"];

    fn id(&self) -> i64 {
        self.id
    }

    fn bind_non_key<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.clone())
            .bind(self.address.clone())
            .bind(self.email.clone())
            .bind(self.age)
    }

    fn from_row(row: &SqliteRow) -> Result<Self, StoreError> {
        Ok(Self {
            id: column(row, Self::TABLE, "id")?,
            name: column(row, Self::TABLE, "name")?,
            address: column(row, Self::TABLE, "address")?,
            email: column(row, Self::TABLE, "email")?,
            age: column(row, Self::TABLE, "age")?,
        })
    }
}

impl Record for Product {
    const TABLE: &'static str = "Product";
    const COLUMNS: &'static [&'static str] = &["id", "name", "price", "quantity"];

    fn id(&self) -> i64 {
        self.id
    }

    fn bind_non_key<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.clone())
            .bind(self.price.to_string())
            .bind(self.quantity)
    }

    fn from_row(row: &SqliteRow) -> Result<Self, StoreError> {
        Ok(Self {
            id: column(row, Self::TABLE, "id")?,
            name: column(row, Self::TABLE, "name")?,
            price: decimal_column(row, Self::TABLE, "price")?,
            quantity: column(row, Self::TABLE, "quantity")?,
        })
    }
}

impl Record for Order {
    const TABLE: &'static str = "Order";
    const COLUMNS: &'static [&'static str] =
        &["id", "client_id", "product_id", "order_date", "quantity"];

    fn id(&self) -> i64 {
        self.id
    }

    fn bind_non_key<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.client_id)
            .bind(self.product_id)
            .bind(self.order_date)
            .bind(self.quantity)
    }

    fn from_row(row: &SqliteRow) -> Result<Self, StoreError> {
        Ok(Self {
            id: column(row, Self::TABLE, "id")?,
            client_id: column(row, Self::TABLE, "client_id")?,
            product_id: column(row, Self::TABLE, "product_id")?,
            order_date: column::<DateTime<Utc>>(row, Self::TABLE, "order_date")?,
            quantity: column(row, Self::TABLE, "quantity")?,
        })
    }
}
