//! Whole-table replacement for the product catalog.

use catalog_core::CleanProductRecord;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::DbError;

/// Postgres identifier length limit in bytes.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Rows per `INSERT`; seven binds each keeps well under the 65535 limit.
const INSERT_BATCH_ROWS: usize = 1000;

const CREATE_COLUMNS: &str = "(\
    \"Title\" TEXT NOT NULL, \
    \"Price\" DOUBLE PRECISION NOT NULL, \
    \"Rating\" DOUBLE PRECISION NOT NULL, \
    \"Colors\" BIGINT NOT NULL, \
    \"Size\" TEXT NOT NULL, \
    \"Gender\" TEXT NOT NULL, \
    \"Timestamp\" TEXT NOT NULL)";

/// Checks that `name` can be spliced into DDL as an unquoted identifier.
///
/// # Errors
///
/// Returns [`DbError::InvalidTableName`] for empty, over-long, or
/// non-`[A-Za-z_][A-Za-z0-9_]*` names.
pub fn validate_table_name(name: &str) -> Result<(), DbError> {
    let invalid = |reason| DbError::InvalidTableName {
        name: name.to_owned(),
        reason,
    };

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("name is empty"));
    };
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(invalid("name exceeds 63 bytes"));
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(invalid("name must start with a letter or underscore"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("name may only contain letters, digits and underscores"));
    }
    Ok(())
}

/// Replaces `table_name` with exactly `rows`.
///
/// Drops and recreates the table, then inserts in batches, all inside one
/// transaction so readers never observe a half-written table.
///
/// Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError::InvalidTableName`] before touching the database if
/// the name is unusable, or [`DbError::Sqlx`] if any statement fails (the
/// transaction is rolled back).
pub async fn replace_products_table(
    pool: &PgPool,
    table_name: &str,
    rows: &[CleanProductRecord],
) -> Result<u64, DbError> {
    validate_table_name(table_name)?;

    let mut tx = pool.begin().await?;

    sqlx::query(&format!("DROP TABLE IF EXISTS {table_name}"))
        .execute(&mut *tx)
        .await?;
    sqlx::query(&format!("CREATE TABLE {table_name} {CREATE_COLUMNS}"))
        .execute(&mut *tx)
        .await?;

    let mut inserted = 0u64;
    for batch in rows.chunks(INSERT_BATCH_ROWS) {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {table_name} \
             (\"Title\", \"Price\", \"Rating\", \"Colors\", \"Size\", \"Gender\", \"Timestamp\") "
        ));
        builder.push_values(batch, |mut row, product| {
            row.push_bind(&product.title)
                .push_bind(product.price)
                .push_bind(product.rating)
                .push_bind(product.colors)
                .push_bind(&product.size)
                .push_bind(&product.gender)
                .push_bind(&product.timestamp);
        });
        inserted += builder.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    tracing::info!(table = table_name, rows = inserted, "replaced products table");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_table_name("products").is_ok());
        assert!(validate_table_name("_staging_2025").is_ok());
        assert!(validate_table_name("Products").is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(matches!(
            validate_table_name(""),
            Err(DbError::InvalidTableName { .. })
        ));
    }

    #[test]
    fn rejects_leading_digit() {
        assert!(validate_table_name("1products").is_err());
    }

    #[test]
    fn rejects_injection_attempts() {
        assert!(validate_table_name("products; DROP TABLE users").is_err());
        assert!(validate_table_name("products\"").is_err());
        assert!(validate_table_name("public.products").is_err());
    }

    #[test]
    fn rejects_over_long_names() {
        let name = "p".repeat(64);
        assert!(validate_table_name(&name).is_err());
        assert!(validate_table_name(&"p".repeat(63)).is_ok());
    }
}
