//! `pqview head` / `pqview tail` commands - Show the first or last N rows

use miette::Result;

use crate::cli::commands::FileArg;
use crate::core::display::{self, DisplayOptions, Preset};
use crate::core::{Config, ParquetSource};

/// Which end of the file to take rows from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Head,
    Tail,
}

#[derive(clap::Args, Debug)]
pub struct SliceArgs {
    #[command(flatten)]
    pub input: FileArg,

    /// Number of rows to show
    #[arg(long, default_value_t = 5)]
    pub nrows: usize,

    /// Number of cols to show
    #[arg(long, default_value_t = 8)]
    pub ncols: usize,

    /// Show all cols
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: SliceArgs, end: End, config: &Config) -> Result<()> {
    let source = ParquetSource::new(args.input.file);
    let df = match end {
        End::Head => source.head(args.nrows)?,
        End::Tail => source.tail(args.nrows)?,
    };
    let options = DisplayOptions::from_preset(Preset::for_cols(args.all), args.nrows, args.ncols, config);
    println!("{}", display::render(&df, &options));
    Ok(())
}
