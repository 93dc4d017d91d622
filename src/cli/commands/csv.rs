//! `pqview csv` command - Export the file as delimited text on stdout

use miette::Result;
use std::io::{self, BufWriter, Write};

use crate::cli::commands::FileArg;
use crate::core::source::SourceError;
use crate::core::{CsvOptions, ParquetSource};

#[derive(clap::Args, Debug)]
pub struct CsvArgs {
    #[command(flatten)]
    pub input: FileArg,

    /// Field separator (a single byte; `\t` is accepted for tab)
    #[arg(long, short = 's', default_value = "\t", value_parser = parse_separator, hide_default_value = true)]
    pub separator: u8,

    /// Include a header row (default)
    #[arg(long, overrides_with = "no_header")]
    pub header: bool,

    /// Omit the header row
    #[arg(long = "no-header", overrides_with = "header")]
    pub no_header: bool,
}

impl CsvArgs {
    pub fn options(&self) -> CsvOptions {
        CsvOptions {
            separator: self.separator,
            include_header: !self.no_header,
        }
    }
}

/// Parse a field separator into the single byte the CSV writer needs
pub fn parse_separator(value: &str) -> std::result::Result<u8, String> {
    match value.as_bytes() {
        [byte] => Ok(*byte),
        b"\\t" => Ok(b'\t'),
        [] => Err("separator must not be empty".to_string()),
        _ => Err(format!("separator must be a single byte, got '{}'", value)),
    }
}

pub fn run(args: CsvArgs) -> Result<()> {
    let options = args.options();
    let source = ParquetSource::new(args.input.file);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    source.write_csv(&mut out, options)?;
    out.flush().map_err(SourceError::Io)?;
    Ok(())
}
