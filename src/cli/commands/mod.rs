//! CLI command implementations

use std::path::PathBuf;

pub mod completions;
pub mod csv;
pub mod glimpse;
pub mod height;
pub mod schema;
pub mod show;
pub mod slice;
pub mod sql;

/// Positional Parquet file argument shared by every data command
#[derive(clap::Args, Debug, Clone)]
pub struct FileArg {
    /// Parquet file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
