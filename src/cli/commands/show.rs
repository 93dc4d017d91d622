//! `pqview show` command - Render the whole file as a table
//!
//! Prints the first and last `nrows / 2` rows. This is the command run when
//! pqview is invoked with just a file path.

use miette::Result;

use crate::cli::commands::FileArg;
use crate::core::display::{self, DisplayOptions, Preset};
use crate::core::{Config, ParquetSource};

/// Row and column display options shared by `show` and `sql`
#[derive(clap::Args, Debug, Clone)]
pub struct TableOpts {
    /// Number of rows to show
    #[arg(long, default_value_t = 10)]
    pub nrows: usize,

    /// Number of cols to show
    #[arg(long, default_value_t = 8)]
    pub ncols: usize,

    /// Show all rows
    #[arg(long)]
    pub all: bool,
}

impl TableOpts {
    /// Display options for row-oriented output (`--all` shows everything)
    pub fn display_options(&self, config: &Config) -> DisplayOptions {
        DisplayOptions::from_preset(Preset::for_rows(self.all), self.nrows, self.ncols, config)
    }
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: FileArg,

    #[command(flatten)]
    pub table: TableOpts,
}

pub fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let source = ParquetSource::new(args.input.file);
    let df = source.collect()?;
    println!("{}", display::render(&df, &args.table.display_options(config)));
    Ok(())
}
