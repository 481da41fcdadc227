//! Relational-table sink.

use catalog_db::{connect_pool, replace_products_table, validate_table_name, DbError, PoolConfig};
use catalog_transform::CleanTable;

use crate::error::LoadError;
use crate::sink::{ensure_not_empty, SaveSummary};

pub struct PostgresSink {
    database_url: String,
    table: String,
    pool_config: PoolConfig,
}

impl PostgresSink {
    #[must_use]
    pub fn new(database_url: impl Into<String>, table: impl Into<String>, pool_config: PoolConfig) -> Self {
        Self {
            database_url: database_url.into(),
            table: table.into(),
            pool_config,
        }
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Replaces the configured table with `table`'s rows.
    ///
    /// The pool lives only for the duration of the call.
    ///
    /// # Errors
    ///
    /// - [`LoadError::EmptyTable`]: nothing to write; no connection is opened.
    /// - [`LoadError::Db`]: invalid table name, connection or statement failure.
    pub async fn try_save(&self, table: &CleanTable) -> Result<SaveSummary, LoadError> {
        ensure_not_empty(table)?;
        validate_table_name(&self.table)?;

        let pool = connect_pool(&self.database_url, self.pool_config)
            .await
            .map_err(DbError::from)?;
        let result = replace_products_table(&pool, &self.table, table.rows()).await;
        pool.close().await;
        let inserted = result?;

        Ok(SaveSummary {
            rows: usize::try_from(inserted).unwrap_or(usize::MAX),
            location: self.table.clone(),
            cells_updated: None,
        })
    }
}
