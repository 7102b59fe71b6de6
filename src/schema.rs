//! Schema and relationship data model.
//!
//! Column metadata and foreign-key edges are produced by database
//! introspection (see [`crate::db`]); relationship declarations can also be
//! supplied by the caller as free text in the form
//! `table1.column1 = table2.column2[, table3.column3 = table4.column4]`.
//!
//! # Example
//!
//! ```
//! use nl2sql::schema::parse_relationships;
//!
//! let rels = parse_relationships("orders.customer_id = customers.id").unwrap();
//! assert_eq!(rels.len(), 1);
//! assert_eq!(rels[0].to_string(), "orders.customer_id → customers.id");
//! ```

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::error::{AppResult, relationship_parse_error};

/// Column metadata from catalog introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name:       String,
    /// Declared SQL data type (e.g. "integer", "character varying")
    pub data_type:  String,
    /// Maximum character length for character types
    pub max_length: Option<i32>
}

impl ColumnDescriptor {
    /// Render the type, including the character length when known
    pub fn type_label(&self) -> String {
        match self.max_length {
            Some(len) => format!("{}({})", self.data_type, len),
            None => self.data_type.clone()
        }
    }
}

/// A foreign-key edge or user-declared join condition between two columns.
///
/// Stored directionally as discovered, but matched without regard to
/// direction: a table counts as related whether it appears on the source or
/// the target side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub source_table:  String,
    pub source_column: String,
    pub target_table:  String,
    pub target_column: String
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} → {}.{}",
            self.source_table, self.source_column, self.target_table, self.target_column
        )
    }
}

/// Introspected schemas for a set of tables.
///
/// Tables are stored in a `BTreeMap` for deterministic iteration order,
/// which keeps prompt construction byte-stable for identical inputs.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SchemaSet {
    /// Map of table name to its ordered column list
    pub tables: BTreeMap<String, Vec<ColumnDescriptor>>
}

impl SchemaSet {
    /// Names of requested tables for which introspection found no columns
    pub fn empty_tables(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|(_, columns)| columns.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Human-readable summary of all tables and columns
    pub fn to_summary(&self) -> String {
        let mut summary = String::new();
        for (name, columns) in &self.tables {
            summary.push_str(&format!("Table: {}\n", name));
            if columns.is_empty() {
                summary.push_str("  (no columns found)\n");
            }
            for col in columns {
                summary.push_str(&format!("  - {} {}\n", col.name, col.type_label()));
            }
            summary.push('\n');
        }
        summary
    }
}

/// Parse user-declared join conditions.
///
/// Input format: `table1.column1 = table2.column2`, comma-separated for
/// multiple declarations. Empty entries between commas are skipped; a
/// malformed entry (missing `=` or `.`, or an empty field) rejects the whole
/// declaration string rather than being silently dropped.
///
/// # Errors
///
/// Returns error if any entry does not match the declaration format
pub fn parse_relationships(input: &str) -> AppResult<Vec<Relationship>> {
    let mut relationships = Vec::new();

    for entry in input.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (left, right) = entry
            .split_once('=')
            .ok_or_else(|| relationship_parse_error(entry, "missing '='"))?;

        let (source_table, source_column) = parse_column_ref(entry, left)?;
        let (target_table, target_column) = parse_column_ref(entry, right)?;

        relationships.push(Relationship {
            source_table,
            source_column,
            target_table,
            target_column
        });
    }

    Ok(relationships)
}

fn parse_column_ref(entry: &str, text: &str) -> AppResult<(String, String)> {
    let (table, column) = text
        .trim()
        .split_once('.')
        .ok_or_else(|| relationship_parse_error(entry, "missing '.' in column reference"))?;

    let table = table.trim();
    let column = column.trim();
    if table.is_empty() || column.is_empty() {
        return Err(relationship_parse_error(entry, "empty table or column name"));
    }

    Ok((table.to_string(), column.to_string()))
}
