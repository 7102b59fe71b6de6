//! # nl2sql
//!
//! Ask questions against a relational database in plain language. A locally
//! hosted model (Ollama) translates the question into SQL, a safety policy
//! restricts execution to read-only SELECT statements, and the results are
//! printed as a table, JSON, or YAML.
//!
//! # Pipeline
//!
//! 1. **Schema introspection** - column metadata and foreign keys for the
//!    requested tables are read from the database catalog.
//! 2. **Prompt construction** - schemas, relationships, the question, and a
//!    fixed rule set are rendered into a deterministic prompt.
//! 3. **Generation** - the prompt is sent to the model with a low sampling
//!    temperature.
//! 4. **Sanitization** - code-fence artifacts are stripped from the output.
//! 5. **Validation** - only a single SELECT statement, free of forbidden
//!    keywords, may proceed. Nothing that fails validation is executed.
//! 6. **Execution** - rows come back keyed by column name.
//!
//! # Quick Start
//!
//! ```bash
//! # Single table
//! nl2sql ask "how many customers signed up this year?" -t customers
//!
//! # Multiple tables; joins come from foreign keys when present
//! nl2sql ask "total order value per customer" -t orders,customers
//!
//! # Declare the join yourself when the catalog has no foreign keys
//! nl2sql ask "total order value per customer" -t orders,customers \
//!     -r "orders.customer_id = customers.id"
//!
//! # Inspect what the model would be asked
//! nl2sql ask "..." -t orders --dry-run
//!
//! # Show introspected schema
//! nl2sql schema -t orders,customers
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence): command-line
//! arguments, environment variables (`DATABASE_URL`, `OLLAMA_URL`,
//! `LLM_MODEL`, `LLM_TEMPERATURE`), `.nl2sql.toml` in the current
//! directory, then `~/.config/nl2sql/config.toml`.
//!
//! # Exit Codes
//!
//! - `0` - Success (including a query that matched no rows)
//! - `1` - Any failure: schema, generation, validation, or execution

use std::{
    io::{self, BufRead, Write},
    process,
    time::Duration
};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::main;

use nl2sql::{
    assistant::{AskOutcome, SqlAssistant},
    cli::{Cli, Commands, Format},
    config::Config,
    db::Database,
    error::{AppResult, config_error, error_message},
    llm::ModelGateway,
    output::{OutputFormat, OutputOptions, format_rows},
    safety::SafetyPolicy,
    schema::{Relationship, parse_relationships}
};

#[main]
async fn main() {
    match run().await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", error_message(&e));
            process::exit(1);
        }
    }
}

async fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Ask {
            question,
            tables,
            relationships,
            database_url,
            model,
            ollama_url,
            temperature,
            output_format,
            dry_run,
            verbose,
            no_color
        } => {
            let url = database_url.or(config.database.url.clone()).ok_or_else(|| {
                config_error("Database URL required (use --database-url or DATABASE_URL)")
            })?;

            let mut llm_config = config.llm.clone();
            if model.is_some() {
                llm_config.model = model;
            }
            if ollama_url.is_some() {
                llm_config.ollama_url = ollama_url;
            }
            if temperature.is_some() {
                llm_config.temperature = temperature;
            }

            let mut declared = match relationships {
                Some(input) => parse_relationships(&input)?,
                None => Vec::new()
            };

            let db = Database::connect(&url).await?;
            let gateway = ModelGateway::new(&llm_config);
            let policy = SafetyPolicy::new(&config.safety);
            let assistant = SqlAssistant::new(db, gateway, policy);

            let output_opts = OutputOptions {
                format:  match output_format {
                    Format::Text => OutputFormat::Text,
                    Format::Json => OutputFormat::Json,
                    Format::Yaml => OutputFormat::Yaml
                },
                colored: !no_color
            };

            if dry_run {
                let prompt = loop {
                    match assistant.preview_prompt(&question, &tables, &declared).await? {
                        Some(prompt) => break prompt,
                        None => declared = elicit_relationships(&tables)?
                    }
                };
                println!("=== DRY RUN - Would send to model ===\n");
                println!("{}", prompt);
                return Ok(0);
            }

            let outcome = loop {
                let pb = spinner(&format!("Generating SQL with {}...", assistant.model()));
                let result = assistant.ask(&question, &tables, &declared).await;
                pb.finish_and_clear();

                match result? {
                    AskOutcome::RelationshipsMissing => {
                        if !declared.is_empty() {
                            return Err(config_error(
                                "No relationships available for a multi-table request"
                            ));
                        }
                        declared = elicit_relationships(&tables)?;
                    }
                    outcome => break outcome
                }
            };

            if let AskOutcome::Rows { sql, rows } = outcome {
                if verbose {
                    if no_color {
                        eprintln!("SQL: {}", sql);
                    } else {
                        eprintln!("{} {}", "SQL:".cyan().bold(), sql);
                    }
                }
                println!("{}", format_rows(&rows, &output_opts));
            }

            Ok(0)
        }

        Commands::Schema {
            tables,
            database_url
        } => {
            let url = database_url.or(config.database.url.clone()).ok_or_else(|| {
                config_error("Database URL required (use --database-url or DATABASE_URL)")
            })?;

            let db = Database::connect(&url).await?;
            let schemas = db.get_multiple_table_schemas(&tables).await?;
            print!("{}", schemas.to_summary());

            let mut edges: Vec<Relationship> = Vec::new();
            for table in &tables {
                for edge in db.get_foreign_keys(table).await? {
                    if !edges.contains(&edge) {
                        edges.push(edge);
                    }
                }
            }
            if !edges.is_empty() {
                println!("Foreign keys:");
                for edge in &edges {
                    println!("  {}", edge);
                }
            }

            Ok(0)
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Ask the user for join declarations when the catalog has none. This lives
/// at the binary boundary; the pipeline itself never blocks on input.
fn elicit_relationships(tables: &[String]) -> AppResult<Vec<Relationship>> {
    eprintln!(
        "No relationships found between tables: {}",
        tables.join(", ")
    );
    eprint!(
        "Enter join conditions as 'table1.column1 = table2.column2' \
         (comma-separated for more than one):\n> "
    );
    io::stderr().flush().ok();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| config_error(format!("Failed to read relationships: {}", e)))?;

    let declared = parse_relationships(&line)?;
    if declared.is_empty() {
        return Err(config_error(
            "No relationships provided for a multi-table request"
        ));
    }
    Ok(declared)
}
