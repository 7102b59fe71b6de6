//! Database boundary: catalog introspection and query execution.
//!
//! The inspector reads column metadata and foreign-key edges from the
//! `information_schema` views; the executor runs validated statements and
//! materializes every row as a column-name-keyed record. One connection is
//! held for the lifetime of a session and reused sequentially.

use indexmap::IndexMap;
use serde_json::{Value as JsonValue, json};
use sqlx::{
    Column, Row, TypeInfo,
    postgres::{PgPool, PgPoolOptions, PgRow}
};

use crate::{
    error::{AppResult, execution_error, schema_error},
    schema::{ColumnDescriptor, Relationship, SchemaSet}
};

/// A materialized result row: column name to value, in result-set order.
pub type ResultRow = IndexMap<String, JsonValue>;

const COLUMNS_QUERY: &str = "
    SELECT column_name, data_type, character_maximum_length
    FROM information_schema.columns
    WHERE table_name = $1
    ORDER BY ordinal_position
";

// Matches edges where the table is either the referencing or the referenced
// side of the constraint.
const FOREIGN_KEYS_QUERY: &str = "
    SELECT
        tc.table_name   AS source_table,
        kcu.column_name AS source_column,
        ccu.table_name  AS target_table,
        ccu.column_name AS target_column
    FROM information_schema.table_constraints AS tc
    JOIN information_schema.key_column_usage AS kcu
      ON tc.constraint_name = kcu.constraint_name
     AND tc.table_schema = kcu.table_schema
    JOIN information_schema.constraint_column_usage AS ccu
      ON ccu.constraint_name = tc.constraint_name
     AND ccu.table_schema = tc.table_schema
    WHERE tc.constraint_type = 'FOREIGN KEY'
      AND (tc.table_name = $1 OR ccu.table_name = $1)
";

/// Database session: schema inspector and query executor over one pool.
pub struct Database {
    pool: PgPool
}

impl Database {
    /// Connect to the database.
    ///
    /// A single connection is enough: the pipeline is sequential and assumes
    /// exactly one logical caller at a time.
    ///
    /// # Errors
    ///
    /// Returns error if the connection cannot be established
    pub async fn connect(url: &str) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|e| schema_error(format!("failed to connect: {}", e)))?;
        Ok(Self { pool })
    }

    /// Get the ordered column metadata for a table.
    ///
    /// A table unknown to the catalog yields an empty column list, not an
    /// error; callers decide whether that is acceptable.
    ///
    /// # Errors
    ///
    /// Returns error if the catalog query fails
    pub async fn get_table_schema(&self, table_name: &str) -> AppResult<Vec<ColumnDescriptor>> {
        let rows = sqlx::query(COLUMNS_QUERY)
            .bind(table_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| schema_error(format!("catalog lookup for '{}': {}", table_name, e)))?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(ColumnDescriptor {
                name:       row
                    .try_get("column_name")
                    .map_err(|e| schema_error(e.to_string()))?,
                data_type:  row
                    .try_get("data_type")
                    .map_err(|e| schema_error(e.to_string()))?,
                max_length: row
                    .try_get("character_maximum_length")
                    .map_err(|e| schema_error(e.to_string()))?
            });
        }
        Ok(columns)
    }

    /// Get schemas for several tables. Any catalog error aborts the whole
    /// lookup; no partial schema is returned.
    ///
    /// # Errors
    ///
    /// Returns error if any per-table lookup fails
    pub async fn get_multiple_table_schemas(&self, table_names: &[String]) -> AppResult<SchemaSet> {
        let mut schemas = SchemaSet::default();
        for table_name in table_names {
            let columns = self.get_table_schema(table_name).await?;
            schemas.tables.insert(table_name.clone(), columns);
        }
        Ok(schemas)
    }

    /// Get foreign-key edges touching a table, on either side.
    ///
    /// # Errors
    ///
    /// Returns error if the catalog query fails
    pub async fn get_foreign_keys(&self, table_name: &str) -> AppResult<Vec<Relationship>> {
        let rows = sqlx::query(FOREIGN_KEYS_QUERY)
            .bind(table_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| schema_error(format!("foreign keys for '{}': {}", table_name, e)))?;

        let mut relationships = Vec::with_capacity(rows.len());
        for row in rows {
            relationships.push(Relationship {
                source_table:  row
                    .try_get("source_table")
                    .map_err(|e| schema_error(e.to_string()))?,
                source_column: row
                    .try_get("source_column")
                    .map_err(|e| schema_error(e.to_string()))?,
                target_table:  row
                    .try_get("target_table")
                    .map_err(|e| schema_error(e.to_string()))?,
                target_column: row
                    .try_get("target_column")
                    .map_err(|e| schema_error(e.to_string()))?
            });
        }
        Ok(relationships)
    }

    /// Execute a validated statement and materialize every row.
    ///
    /// # Errors
    ///
    /// Returns error if the database rejects the statement
    pub async fn execute_query(&self, sql: &str) -> AppResult<Vec<ResultRow>> {
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| execution_error(e.to_string()))?;

        Ok(rows.iter().map(row_to_record).collect())
    }
}

/// Convert a row into a record keyed by column name, in result-set order.
///
/// Columns of types without a decoding arm come back as null rather than
/// failing the whole result set.
fn row_to_record(row: &PgRow) -> ResultRow {
    let mut record = ResultRow::with_capacity(row.columns().len());

    for column in row.columns() {
        let name = column.name();
        let type_name = column.type_info().name();

        let value: Option<JsonValue> = match type_name {
            "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => row
                .try_get::<Option<String>, _>(name)
                .ok()
                .flatten()
                .map(|s| json!(s)),
            "INT2" => row
                .try_get::<Option<i16>, _>(name)
                .ok()
                .flatten()
                .map(|i| json!(i)),
            "INT4" => row
                .try_get::<Option<i32>, _>(name)
                .ok()
                .flatten()
                .map(|i| json!(i)),
            "INT8" => row
                .try_get::<Option<i64>, _>(name)
                .ok()
                .flatten()
                .map(|i| json!(i)),
            "FLOAT4" | "FLOAT8" => row
                .try_get::<Option<f64>, _>(name)
                .ok()
                .flatten()
                .map(|f| json!(f)),
            "NUMERIC" => row
                .try_get::<Option<rust_decimal::Decimal>, _>(name)
                .ok()
                .flatten()
                .map(|d| json!(d.to_string())),
            "BOOL" => row
                .try_get::<Option<bool>, _>(name)
                .ok()
                .flatten()
                .map(|b| json!(b)),
            "UUID" => row
                .try_get::<Option<uuid::Uuid>, _>(name)
                .ok()
                .flatten()
                .map(|u| json!(u.to_string())),
            "JSON" | "JSONB" => row.try_get::<Option<JsonValue>, _>(name).ok().flatten(),
            "TIMESTAMPTZ" => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name)
                .ok()
                .flatten()
                .map(|dt| json!(dt.to_rfc3339())),
            "TIMESTAMP" => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(name)
                .ok()
                .flatten()
                .map(|dt| json!(dt.to_string())),
            "DATE" => row
                .try_get::<Option<chrono::NaiveDate>, _>(name)
                .ok()
                .flatten()
                .map(|d| json!(d.to_string())),
            _ => None
        };

        record.insert(name.to_string(), value.unwrap_or(JsonValue::Null));
    }

    record
}
