//! `pqview glimpse` command - Dense preview, one line per column
//!
//! Wide files display cleanly because each column becomes a row: the column
//! name, its data type, and the first few values.

use miette::{IntoDiagnostic, Result};

use crate::cli::commands::FileArg;
use crate::core::glimpse::{glimpse, GlimpseOptions};
use crate::core::{Config, ParquetSource};

#[derive(clap::Args, Debug)]
pub struct GlimpseArgs {
    #[command(flatten)]
    pub input: FileArg,

    /// Values to show per column (default: 15, or `glimpse_max_items` from config)
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Truncate column names longer than this
    #[arg(long, default_value_t = 50)]
    pub max_colname_length: usize,
}

pub fn run(args: GlimpseArgs, config: &Config) -> Result<()> {
    let df = ParquetSource::new(args.input.file).collect()?;
    let options = GlimpseOptions {
        max_items: args.max_items.unwrap_or_else(|| config.glimpse_max_items()),
        max_colname_length: args.max_colname_length,
    };
    print!("{}", glimpse(&df, options).into_diagnostic()?);
    Ok(())
}
