//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Starload - turn a flat shipment extract into a star schema
#[derive(Parser, Debug)]
#[command(name = "starload")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to starload.yml (default: ./starload.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the database path (`:memory:` for a throwaway database)
    #[arg(short, long, global = true, env = "STARLOAD_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest a CSV extract, build the star schema and load it
    Load(LoadArgs),

    /// Show the drop, create and insert order for the schema
    Plan(PlanArgs),

    /// Run a SQL query against the loaded schema
    Query(QueryArgs),

    /// Load, then run every configured report query
    Report(ReportArgs),
}

/// Input selection shared by commands that run the pipeline
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// CSV extract to load (overrides `input` in starload.yml)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Fail the run when any row references an unknown parent value
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print row counts as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: PlanOutput,
}

/// Plan output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutput {
    /// Step-by-step table
    Table,
    /// JSON lifecycle plan
    Json,
    /// CREATE TABLE statements in create order
    Ddl,
}

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// SQL to execute
    pub sql: String,

    /// Print rows as JSON objects
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print each result as JSON objects
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
