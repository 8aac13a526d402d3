use std::sync::LazyLock;

use common::result::{
    base::{FieldValue, NotebookRecord},
    enums::Column,
};
use regex::Regex;
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::{config::DatabaseConfig, errors::ExportError};

static TABLE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").expect("Regex should compile as nothing has changed")
});

/// "Gaming notebooks" -> "gaming_notebooks". Anything that is not a plain
/// identifier afterwards is rejected, since table names cannot be bound.
pub fn normalize_table_name(name: &str) -> Result<String, ExportError> {
    let normalized = name.trim().to_lowercase().replace(' ', "_");

    if !TABLE_NAME_REGEX.is_match(&normalized) {
        return Err(ExportError::InvalidTableName(name.into()));
    }

    Ok(normalized)
}

pub fn create_table_sql(table: &str) -> String {
    let columns: Vec<String> = Column::iter()
        .map(|column| {
            let kind = if column.is_integer() { "INT" } else { "TEXT" };

            format!("{} {kind} NOT NULL", column.sql_name())
        })
        .collect();

    format!(
        "CREATE TABLE {table} (id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, {})",
        columns.join(", ")
    )
}

pub fn insert_sql(table: &str) -> String {
    let names: Vec<&str> = Column::iter().map(|column| column.sql_name()).collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|index| format!("${index}")).collect();

    format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    )
}

pub struct PostgresConnector {
    pool: PgPool,
}

impl PostgresConnector {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, ExportError> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        debug!("Connected to {}:{}", config.host, config.port);

        Ok(Self { pool })
    }

    /// Drops `table` if it exists, recreates it and inserts every record, all
    /// in one transaction. Returns the normalized table name.
    pub async fn replace_table(
        &self,
        table: &str,
        records: &[NotebookRecord],
    ) -> Result<String, ExportError> {
        let table = normalize_table_name(table)?;
        let insert = insert_sql(&table);

        let mut transaction = self.pool.begin().await?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
            .execute(&mut *transaction)
            .await?;
        sqlx::query(&create_table_sql(&table))
            .execute(&mut *transaction)
            .await?;

        for record in records {
            let mut query = sqlx::query(&insert);

            for column in Column::iter() {
                query = match record.field(column) {
                    FieldValue::Integer(value) => query.bind(value),
                    FieldValue::Text(value) => query.bind(value),
                };
            }

            query.execute(&mut *transaction).await?;
        }

        transaction.commit().await?;

        info!("Inserted {} notebooks into {table}", records.len());

        Ok(table)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn table_names_are_normalized() {
        assert_eq!(
            normalize_table_name("Gaming notebooks").unwrap(),
            "gaming_notebooks"
        );
        assert_eq!(normalize_table_name(" laptops_2024 ").unwrap(), "laptops_2024");
    }

    #[test]
    fn unsafe_table_names_are_rejected() {
        for name in ["", "1st", "notebooks; DROP TABLE users", "ноутбуки", "a\"b"] {
            assert!(
                matches!(normalize_table_name(name), Err(ExportError::InvalidTableName(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn create_statement_has_fixed_schema() {
        let sql = create_table_sql("gaming_notebooks");

        assert!(sql.starts_with(
            "CREATE TABLE gaming_notebooks (id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, manufacturer TEXT NOT NULL"
        ));
        assert!(sql.contains("price INT NOT NULL, price_without_discount INT NOT NULL, discount INT NOT NULL"));
        assert!(sql.ends_with("url TEXT NOT NULL)"));
    }

    #[test]
    fn insert_statement_binds_every_column() {
        let sql = insert_sql("gaming_notebooks");

        assert!(sql.starts_with("INSERT INTO gaming_notebooks (manufacturer, model, price,"));
        assert!(sql.ends_with("$13, $14)"));
        assert!(!sql.contains("$15"));
    }
}
