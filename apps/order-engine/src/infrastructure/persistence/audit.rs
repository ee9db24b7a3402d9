//! Append-only audit log of bills.
//!
//! The `Log` table has a fixed, independent shape and is deliberately
//! not descriptor-driven: bills never change once written, so rows are
//! rebuilt by known column names. There is no update or delete path.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{Sqlite, SqliteRow};

use super::record::decimal_column;
use super::StoreError;
use crate::domain::Bill;

const TABLE: &str = "Log";

const APPEND_SQL: &str = r#"INSERT INTO "Log"
    (order_id, client_id, product_id, quantity, total_price, timestamp)
    VALUES (?, ?, ?, ?, ?, ?)"#;

const SCAN_SQL: &str = r#"SELECT id, order_id, client_id, product_id, quantity, total_price, timestamp FROM "Log""#;

/// Append-only store of [`Bill`] entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLog;

impl AuditLog {
    /// Create an audit log handle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Append one bill; the key is backend-generated and returned.
    pub async fn append<'e, E>(&self, db: E, bill: &Bill) -> Result<i64, StoreError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(APPEND_SQL)
            .bind(bill.order_id)
            .bind(bill.client_id)
            .bind(bill.product_id)
            .bind(bill.quantity)
            .bind(bill.total_price.to_string())
            .bind(bill.timestamp)
            .execute(db)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Full history, in the order the backend returns it (insertion
    /// order; display sorting is a presentation concern).
    ///
    /// Rows that fail reconstruction are logged and skipped; the rest
    /// of the scan proceeds.
    pub async fn entries<'e, E>(&self, db: E) -> Result<Vec<Bill>, StoreError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query(SCAN_SQL).fetch_all(db).await?;
        let mut bills = Vec::with_capacity(rows.len());
        for row in &rows {
            match Self::bill_from_row(row) {
                Ok(bill) => bills.push(bill),
                Err(e) => {
                    tracing::warn!(table = TABLE, error = %e, "skipping unreadable row");
                }
            }
        }
        Ok(bills)
    }

    fn bill_from_row(row: &SqliteRow) -> Result<Bill, StoreError> {
        let get = |name: &str| -> Result<i64, StoreError> {
            row.try_get::<i64, _>(name)
                .map_err(|e| StoreError::Reconstruction {
                    table: TABLE,
                    reason: format!("{name}: {e}"),
                })
        };
        Ok(Bill {
            id: get("id")?,
            order_id: get("order_id")?,
            client_id: get("client_id")?,
            product_id: get("product_id")?,
            quantity: get("quantity")?,
            total_price: decimal_column(row, TABLE, "total_price")?,
            timestamp: row
                .try_get::<DateTime<Utc>, _>("timestamp")
                .map_err(|e| StoreError::Reconstruction {
                    table: TABLE,
                    reason: format!("timestamp: {e}"),
                })?,
        })
    }
}
