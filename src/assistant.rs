//! Pipeline orchestration: introspection → prompt → generation → sanitization
//! → validation → execution.
//!
//! Every stage runs to completion before the next begins, and a failure at
//! any stage short-circuits the rest. Interactive input never happens here:
//! when a multi-table request has no discoverable join conditions, the
//! pipeline returns [`AskOutcome::RelationshipsMissing`] and the caller
//! decides how to obtain declarations (prompt a human, supply a default).

use crate::{
    db::{Database, ResultRow},
    error::{AppResult, generation_error, schema_error},
    llm::ModelGateway,
    prompt::build_prompt,
    safety::{SafetyPolicy, clean_sql},
    schema::{Relationship, SchemaSet}
};

/// Outcome of a natural-language request.
#[derive(Debug)]
pub enum AskOutcome {
    /// The generated query executed; an empty row vector means it genuinely
    /// matched no rows.
    Rows {
        /// The validated statement that was executed
        sql:  String,
        rows: Vec<ResultRow>
    },
    /// Multiple tables were requested but no join conditions were found or
    /// declared. The caller should supply declarations and retry.
    RelationshipsMissing
}

/// Natural-language SQL assistant.
pub struct SqlAssistant {
    db:     Database,
    llm:    ModelGateway,
    policy: SafetyPolicy
}

impl SqlAssistant {
    pub fn new(db: Database, llm: ModelGateway, policy: SafetyPolicy) -> Self {
        Self { db, llm, policy }
    }

    /// The database session, for callers that want direct introspection
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Name of the model answering requests
    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Process a natural-language request against a set of tables.
    ///
    /// `declared` carries caller-supplied join conditions; they are appended
    /// to whatever foreign keys the catalog reports.
    ///
    /// # Errors
    ///
    /// Returns error if introspection fails or names an unknown table, if
    /// generation fails or produces nothing, if the generated statement is
    /// rejected by the safety policy, or if execution fails
    pub async fn ask(
        &self,
        question: &str,
        table_names: &[String],
        declared: &[Relationship]
    ) -> AppResult<AskOutcome> {
        let (schemas, relationships) = self.inspect(table_names, declared).await?;

        if relationship_gap(table_names.len(), &relationships) {
            return Ok(AskOutcome::RelationshipsMissing);
        }

        let sql = self.generate(question, &schemas, &relationships).await?;
        let rows = self.db.execute_query(&sql).await?;
        Ok(AskOutcome::Rows { sql, rows })
    }

    /// Build the prompt that would be sent to the model for a request.
    ///
    /// Returns `None` when join declarations are still missing; a prompt
    /// with a silently omitted join condition is never produced.
    ///
    /// # Errors
    ///
    /// Returns error if introspection fails or names an unknown table
    pub async fn preview_prompt(
        &self,
        question: &str,
        table_names: &[String],
        declared: &[Relationship]
    ) -> AppResult<Option<String>> {
        let (schemas, relationships) = self.inspect(table_names, declared).await?;

        if relationship_gap(table_names.len(), &relationships) {
            return Ok(None);
        }

        Ok(Some(build_prompt(question, &schemas, &relationships)))
    }

    async fn inspect(
        &self,
        table_names: &[String],
        declared: &[Relationship]
    ) -> AppResult<(SchemaSet, Vec<Relationship>)> {
        let schemas = self.db.get_multiple_table_schemas(table_names).await?;

        let empty = schemas.empty_tables();
        if !empty.is_empty() {
            return Err(schema_error(format!(
                "no columns found for table(s): {}",
                empty.join(", ")
            )));
        }

        let mut relationships = Vec::new();
        for table in table_names {
            for edge in self.db.get_foreign_keys(table).await? {
                // An edge between two requested tables is reported once per
                // endpoint; keep it once.
                if !relationships.contains(&edge) {
                    relationships.push(edge);
                }
            }
        }
        relationships.extend(declared.iter().cloned());

        Ok((schemas, relationships))
    }

    async fn generate(
        &self,
        question: &str,
        schemas: &SchemaSet,
        relationships: &[Relationship]
    ) -> AppResult<String> {
        let prompt = build_prompt(question, schemas, relationships);
        let raw = self.llm.generate(&prompt).await?;

        let sql = clean_sql(&raw);
        if sql.is_empty() {
            return Err(generation_error("model returned no SQL"));
        }

        self.policy.validate(&sql)?;
        Ok(sql)
    }
}

/// Whether a request still needs join declarations before a prompt can be
/// built: more than one table, and not a single known relationship. A
/// single-table request is complete with an empty relationship list.
pub fn relationship_gap(table_count: usize, relationships: &[Relationship]) -> bool {
    table_count > 1 && relationships.is_empty()
}
