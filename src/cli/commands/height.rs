//! `pqview height` command - Print the number of rows

use miette::Result;

use crate::cli::commands::FileArg;
use crate::core::ParquetSource;

pub fn run(args: FileArg) -> Result<()> {
    let height = ParquetSource::new(args.file).height()?;
    println!("{}", height);
    Ok(())
}
