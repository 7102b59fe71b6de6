//! Prompt construction for SQL generation.
//!
//! A pure string transform: the same question, schemas and relationships
//! always produce a byte-identical prompt. No network or database access
//! happens here.

use crate::schema::{Relationship, SchemaSet};

/// Fixed instructional footer appended to every generation prompt.
const RULES: &str = "### Rules:
1. Return ONLY the SQL code, without explanations or comments
2. Use only the provided schema - NEVER invent columns
3. Use table aliases to qualify ambiguous column references
4. Use appropriate JOINs based on the relationships provided
5. For aggregations, use GROUP BY when necessary
6. Keep the query a single, efficient, well-formed statement";

/// Build the generation prompt from the user's request, the introspected
/// schemas and the known relationships.
///
/// Renders one labeled block per table listing column name and type, a
/// relationship block with one `source.column → target.column` line per
/// edge (omitted entirely when no relationships exist), the literal user
/// request, and the fixed rule footer.
pub fn build_prompt(nl_query: &str, schemas: &SchemaSet, relationships: &[Relationship]) -> String {
    let mut prompt = String::from(
        "You are a SQL expert. Convert the request below into a valid SQL query \
         using the following tables and their relationships:\n\n"
    );

    for (table, columns) in &schemas.tables {
        prompt.push_str(&format!("### Table {}:\n", table));
        for col in columns {
            prompt.push_str(&format!("- {} ({})\n", col.name, col.type_label()));
        }
        prompt.push('\n');
    }

    if !relationships.is_empty() {
        prompt.push_str("### Relationships:\n");
        for rel in relationships {
            prompt.push_str(&format!("{}\n", rel));
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!("### Request:\n{}\n\n", nl_query));
    prompt.push_str(RULES);
    prompt.push_str("\n\n### SQL:\n");

    prompt
}
