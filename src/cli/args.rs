//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs,
    csv::CsvArgs,
    glimpse::GlimpseArgs,
    schema::SchemaArgs,
    show::ShowArgs,
    slice::SliceArgs,
    sql::SqlArgs,
    FileArg,
};

#[derive(Parser)]
#[command(name = "pqview")]
#[command(author, version, about = "View Parquet file contents using Polars.")]
#[command(
    long_about = "View Parquet file contents using Polars.\n\n\
                  Invoked with just a file path, pqview runs the `show` command."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalOpts,

    /// Print the completion script for SHELL (detected from $SHELL when omitted)
    #[arg(long, value_name = "SHELL", num_args = 0..=1, conflicts_with = "install_completion")]
    pub show_completion: Option<Option<Shell>>,

    /// Install the completion script for SHELL (detected from $SHELL when omitted)
    #[arg(long, value_name = "SHELL", num_args = 0..=1)]
    pub install_completion: Option<Option<Shell>>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Enable verbose (debug) logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file (default: the user config directory's pqview/config.yaml)
    #[arg(long, global = true, env = "PQVIEW_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show first and last n/2 rows of the Parquet file (the default command)
    Show(ShowArgs),

    /// Display the schema: column names and data types
    Schema(SchemaArgs),

    /// Show the number of records/rows in the Parquet file
    Height(FileArg),

    /// Dense preview: one line per column with name, type and first values
    Glimpse(GlimpseArgs),

    /// Show the first N rows of the Parquet file
    Head(SliceArgs),

    /// Show the last N rows of the Parquet file
    Tail(SliceArgs),

    /// Show the results of a SQL query against the Parquet file
    #[command(after_help = "Example:\n  \
        pqview sql --query \"select PassengerId,Sex,Age,Fare from self where Survived=1\" titanic.parquet")]
    Sql(SqlArgs),

    /// Write the contents of the Parquet file as CSV to stdout
    Csv(CsvArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
