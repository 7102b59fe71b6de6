use clap::Parser;
use nl2sql::cli::{Cli, Commands};

#[test]
fn test_parse_ask_command() {
    let cli = Cli::try_parse_from([
        "nl2sql",
        "ask",
        "how many orders?",
        "--tables",
        "orders"
    ])
    .unwrap();

    match cli.command {
        Commands::Ask {
            question, tables, ..
        } => {
            assert_eq!(question, "how many orders?");
            assert_eq!(tables, vec!["orders"]);
        }
        _ => panic!("expected ask command")
    }
}

#[test]
fn test_tables_are_comma_separated() {
    let cli = Cli::try_parse_from([
        "nl2sql",
        "ask",
        "q",
        "-t",
        "orders,customers"
    ])
    .unwrap();

    match cli.command {
        Commands::Ask { tables, .. } => {
            assert_eq!(tables, vec!["orders", "customers"]);
        }
        _ => panic!("expected ask command")
    }
}

#[test]
fn test_ask_requires_tables() {
    assert!(Cli::try_parse_from(["nl2sql", "ask", "q"]).is_err());
}

#[test]
fn test_ask_accepts_relationships_and_flags() {
    let cli = Cli::try_parse_from([
        "nl2sql",
        "ask",
        "q",
        "-t",
        "a,b",
        "-r",
        "a.x = b.y",
        "--dry-run",
        "-f",
        "json"
    ])
    .unwrap();

    match cli.command {
        Commands::Ask {
            relationships,
            dry_run,
            ..
        } => {
            assert_eq!(relationships.as_deref(), Some("a.x = b.y"));
            assert!(dry_run);
        }
        _ => panic!("expected ask command")
    }
}

#[test]
fn test_parse_schema_command() {
    let cli = Cli::try_parse_from(["nl2sql", "schema", "-t", "orders,customers"]).unwrap();

    match cli.command {
        Commands::Schema { tables, .. } => {
            assert_eq!(tables, vec!["orders", "customers"]);
        }
        _ => panic!("expected schema command")
    }
}

#[test]
fn test_unknown_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["nl2sql", "analyze"]).is_err());
}
