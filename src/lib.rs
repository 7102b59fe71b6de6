//! # nl2sql Library
//!
//! Natural-language to SQL translation against a live database, backed by a
//! locally-hosted model.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod output;
pub mod prompt;
pub mod safety;
pub mod schema;
