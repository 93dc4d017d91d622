//! `pqview sql` command - Query the file with SQL
//!
//! The file is registered as the table `self`, so queries read like
//! `select name, age from self where age > 30`.

use miette::Result;

use crate::cli::commands::show::TableOpts;
use crate::cli::commands::FileArg;
use crate::core::display;
use crate::core::{Config, ParquetSource};

#[derive(clap::Args, Debug)]
pub struct SqlArgs {
    #[command(flatten)]
    pub input: FileArg,

    /// SQL query to run against the Parquet file
    #[arg(long, short = 'q')]
    pub query: String,

    #[command(flatten)]
    pub table: TableOpts,
}

pub fn run(args: SqlArgs, config: &Config) -> Result<()> {
    let source = ParquetSource::new(args.input.file);
    let df = source.sql(&args.query)?;
    println!("{}", display::render(&df, &args.table.display_options(config)));
    Ok(())
}
