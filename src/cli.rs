use clap::{Parser, Subcommand, ValueEnum};

/// nl2sql - Ask questions against your database in natural language
#[derive(Parser, Debug)]
#[command(name = "nl2sql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a natural-language question into SQL and run it
    Ask {
        /// The question, in plain language
        question: String,

        /// Tables the question is about (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        tables: Vec<String>,

        /// Join declarations when the catalog has no foreign keys,
        /// e.g. "orders.customer_id = customers.id"
        #[arg(short, long)]
        relationships: Option<String>,

        /// Database connection URL
        #[arg(short, long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Model name
        #[arg(short, long)]
        model: Option<String>,

        /// Ollama base URL
        #[arg(long)]
        ollama_url: Option<String>,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f64>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Show the prompt that would be sent to the model without calling it
        #[arg(long)]
        dry_run: bool,

        /// Print the generated SQL before executing it
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// Show introspected columns and foreign keys for tables
    Schema {
        /// Tables to inspect (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        tables: Vec<String>,

        /// Database connection URL
        #[arg(short, long, env = "DATABASE_URL")]
        database_url: Option<String>
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
