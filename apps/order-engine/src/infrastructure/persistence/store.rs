//! Generic CRUD store over any [`Record`] descriptor.
//!
//! Statements are built from the descriptor at call time and always
//! bind values as parameters. The store is stateless: it owns no
//! connection and borrows an executor per call, so the same methods
//! run against a pool or inside an open transaction.

use std::marker::PhantomData;

use sqlx::sqlite::Sqlite;

use super::record::Record;
use super::StoreError;

/// Generic store for one record type.
///
/// Zero-sized; `Store::<Product>::new()` is free to construct and
/// share. Records pass through by value, nothing is retained across
/// calls.
#[derive(Debug)]
pub struct Store<T: Record> {
    _marker: PhantomData<fn() -> T>,
}

// Manual impls: the phantom is the only field, so these must not
// require `T: Clone`.
impl<T: Record> Clone for Store<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Record> Copy for Store<T> {}

impl<T: Record> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Store<T> {
    /// Create a store handle for `T`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    fn key() -> &'static str {
        T::COLUMNS[0]
    }

    fn select_by_key_sql() -> String {
        format!(
            r#"SELECT {} FROM "{}" WHERE {} = ?"#,
            T::COLUMNS.join(", "),
            T::TABLE,
            Self::key(),
        )
    }

    fn select_all_sql() -> String {
        format!(
            r#"SELECT {} FROM "{}" ORDER BY {}"#,
            T::COLUMNS.join(", "),
            T::TABLE,
            Self::key(),
        )
    }

    fn insert_sql() -> String {
        let columns = &T::COLUMNS[1..];
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            r#"INSERT INTO "{}" ({}) VALUES ({})"#,
            T::TABLE,
            columns.join(", "),
            placeholders,
        )
    }

    fn update_sql() -> String {
        let assignments = T::COLUMNS[1..]
            .iter()
            .map(|c| format!("{c} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r#"UPDATE "{}" SET {} WHERE {} = ?"#,
            T::TABLE,
            assignments,
            Self::key(),
        )
    }

    fn delete_sql() -> String {
        format!(r#"DELETE FROM "{}" WHERE {} = ?"#, T::TABLE, Self::key())
    }

    /// Fetch one record by primary key.
    ///
    /// `Ok(None)` means no row matched; backend failures come back as
    /// `Err`, never as an absent result.
    pub async fn find_by_id<'e, E>(&self, db: E, id: i64) -> Result<Option<T>, StoreError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let sql = Self::select_by_key_sql();
        let row = sqlx::query(&sql).bind(id).fetch_optional(db).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Fetch every record, in primary-key (insertion) order.
    ///
    /// Rows that fail reconstruction are logged and skipped; the rest
    /// of the result proceeds.
    pub async fn find_all<'e, E>(&self, db: E) -> Result<Vec<T>, StoreError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let sql = Self::select_all_sql();
        let rows = sqlx::query(&sql).fetch_all(db).await?;
        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            match T::from_row(row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(table = T::TABLE, error = %e, "skipping unreadable row");
                }
            }
        }
        Ok(records)
    }

    /// Insert a record and return the backend-assigned primary key.
    ///
    /// The record's own id field is ignored; the key column is never
    /// part of the insert value list.
    pub async fn insert<'e, E>(&self, db: E, record: &T) -> Result<i64, StoreError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let sql = Self::insert_sql();
        let result = record.bind_non_key(sqlx::query(&sql)).execute(db).await?;
        Ok(result.last_insert_rowid())
    }

    /// Update every non-key column of the row matching the record's id.
    pub async fn update<'e, E>(&self, db: E, record: &T) -> Result<(), StoreError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let sql = Self::update_sql();
        let result = record
            .bind_non_key(sqlx::query(&sql))
            .bind(record.id())
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                table: T::TABLE,
                id: record.id(),
            });
        }
        Ok(())
    }

    /// Delete the row matching `id`. Deleting a missing id is not an
    /// error and leaves the store unchanged.
    pub async fn delete<'e, E>(&self, db: E, id: i64) -> Result<(), StoreError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let sql = Self::delete_sql();
        sqlx::query(&sql).bind(id).execute(db).await?;
        Ok(())
    }
}
