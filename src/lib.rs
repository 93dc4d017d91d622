//! pqview: a command-line viewer for Parquet files
//!
//! Prints rows, schema, row counts, a dense per-column glimpse, head/tail
//! slices, SQL query results and CSV exports, with Polars doing all of the
//! reading, querying and table rendering.

pub mod cli;
pub mod core;
