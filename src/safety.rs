//! SQL output sanitization and read-only safety validation.
//!
//! Model output is free text that often wraps code in fenced blocks for
//! human readability; [`clean_sql`] recovers the bare statement.
//! [`SafetyPolicy`] then enforces the read-only contract: only a single
//! `SELECT` statement, containing none of the forbidden keywords, may reach
//! the executor.
//!
//! The keyword check is a deliberately coarse substring scan. It matches
//! inside identifiers and string literals too (a column named `created_at`
//! trips `CREATE`), so it over-rejects; it never under-rejects. The
//! `sqlparser` pass layered on top only tightens the policy further.
//!
//! # Example
//!
//! ```
//! use nl2sql::safety::{SafetyPolicy, clean_sql};
//!
//! let policy = SafetyPolicy::default();
//! let sql = clean_sql("```sql\nSELECT id FROM users\n```");
//! assert_eq!(sql, "SELECT id FROM users");
//! assert!(policy.is_safe(&sql));
//! assert!(!policy.is_safe("DROP TABLE users"));
//! ```

use sqlparser::{ast::Statement, dialect::GenericDialect, parser::Parser};

use crate::{
    config::SafetyConfig,
    error::{AppResult, validation_rejection}
};

/// Strip generation artifacts from model output.
///
/// If the text contains a fenced code block, the content of the first block
/// is extracted (a ```` ```sql ```` fence takes precedence over a bare
/// ```` ``` ```` fence); otherwise surrounding whitespace is trimmed.
/// Idempotent on already-clean text.
pub fn clean_sql(text: &str) -> String {
    let body = if let Some((_, rest)) = text.split_once("```sql") {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = text.split_once("```") {
        rest.split("```").next().unwrap_or(rest)
    } else {
        text
    };
    body.trim().to_string()
}

/// Read-only statement policy.
///
/// A statement is safe iff, after uppercasing, it starts with `SELECT` and
/// contains none of the forbidden keywords as a substring anywhere.
#[derive(Debug, Clone)]
pub struct SafetyPolicy {
    forbidden: Vec<String>
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        Self::new(&SafetyConfig::default())
    }
}

impl SafetyPolicy {
    /// Create a policy from the configured forbidden-keyword list
    pub fn new(config: &SafetyConfig) -> Self {
        Self {
            forbidden: config
                .forbidden_keywords
                .iter()
                .map(|k| k.to_uppercase())
                .collect()
        }
    }

    /// Check the substring policy: `SELECT` prefix, no forbidden keywords
    pub fn is_safe(&self, sql: &str) -> bool {
        let upper = sql.to_uppercase();

        if !upper.starts_with("SELECT") {
            return false;
        }

        !self.forbidden.iter().any(|k| upper.contains(k.as_str()))
    }

    /// Validate a statement for execution.
    ///
    /// On top of [`is_safe`](Self::is_safe), the text must parse as exactly
    /// one `SELECT` statement. Rejection is an explicit error; nothing that
    /// fails here may be executed.
    ///
    /// # Errors
    ///
    /// Returns error if the statement is empty, fails the keyword policy,
    /// does not parse, or is not a single SELECT
    pub fn validate(&self, sql: &str) -> AppResult<()> {
        if sql.trim().is_empty() {
            return Err(validation_rejection("empty statement"));
        }

        let upper = sql.to_uppercase();
        if !upper.starts_with("SELECT") {
            return Err(validation_rejection("only SELECT statements are allowed"));
        }

        if let Some(keyword) = self.forbidden.iter().find(|k| upper.contains(k.as_str())) {
            return Err(validation_rejection(format!(
                "forbidden keyword '{}' present",
                keyword
            )));
        }

        let statements = Parser::parse_sql(&GenericDialect {}, sql)
            .map_err(|e| validation_rejection(format!("statement does not parse: {}", e)))?;

        match statements.as_slice() {
            [Statement::Query(_)] => Ok(()),
            [_] => Err(validation_rejection("statement is not a SELECT query")),
            _ => Err(validation_rejection("expected exactly one statement"))
        }
    }
}
