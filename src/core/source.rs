//! Parquet data source backed by the Polars lazy engine
//!
//! Every operation starts from a fresh lazy scan of the file, so nothing is
//! read until a command asks for it. Engine errors are passed through with
//! their original message attached as the diagnostic source.

use std::io::Write;
use std::path::PathBuf;

use polars::prelude::*;
use polars::sql::SQLContext;
use thiserror::Error;

/// Name under which the file is visible to SQL queries
pub const SQL_TABLE_NAME: &str = "self";

/// Rows collected per window when streaming CSV output
const CSV_WINDOW_ROWS: usize = 64 * 1024;

/// Errors raised by data access
#[derive(Debug, Error, miette::Diagnostic)]
pub enum SourceError {
    #[error("Could not read {}", path.display())]
    #[diagnostic(code(pqview::input))]
    Input {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("SQL query failed: {query}")]
    #[diagnostic(
        code(pqview::query),
        help("the file is available as the table `self`")
    )]
    Query {
        query: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to write output")]
    #[diagnostic(code(pqview::output))]
    Write(#[source] PolarsError),

    #[error("Failed to write output")]
    #[diagnostic(code(pqview::output))]
    Io(#[from] std::io::Error),
}

/// Options for delimited-text output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub separator: u8,
    pub include_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: b'\t',
            include_header: true,
        }
    }
}

/// A single Parquet file opened for viewing
#[derive(Debug, Clone)]
pub struct ParquetSource {
    path: PathBuf,
}

impl ParquetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn input_error(&self, source: PolarsError) -> SourceError {
        SourceError::Input {
            path: self.path.clone(),
            source,
        }
    }

    /// Build a lazy scan over the file
    pub fn scan(&self) -> Result<LazyFrame, SourceError> {
        tracing::debug!(path = %self.path.display(), "scanning parquet file");
        LazyFrame::scan_parquet(&self.path, ScanArgsParquet::default())
            .map_err(|e| self.input_error(e))
    }

    fn collect_input(&self, lf: LazyFrame) -> Result<DataFrame, SourceError> {
        let df = lf.collect().map_err(|e| self.input_error(e))?;
        tracing::debug!(rows = df.height(), cols = df.width(), "collected");
        Ok(df)
    }

    /// Materialize the whole file
    pub fn collect(&self) -> Result<DataFrame, SourceError> {
        self.collect_input(self.scan()?)
    }

    /// Column names and data types, read from file metadata only
    pub fn schema(&self) -> Result<SchemaRef, SourceError> {
        self.scan()?
            .collect_schema()
            .map_err(|e| self.input_error(e))
    }

    /// Total row count, computed without materializing row content
    pub fn height(&self) -> Result<usize, SourceError> {
        let counted = self.collect_input(self.scan()?.select([len()]))?;
        let count = counted
            .column("len")
            .and_then(|c| c.as_materialized_series().idx().map(|ca| ca.get(0)))
            .map_err(|e| self.input_error(e))?;
        Ok(count.map_or(0, |n| n as usize))
    }

    /// The first `n` rows in file order
    pub fn head(&self, n: usize) -> Result<DataFrame, SourceError> {
        self.collect_input(self.scan()?.limit(to_idx(n)))
    }

    /// The last `n` rows in file order
    pub fn tail(&self, n: usize) -> Result<DataFrame, SourceError> {
        self.collect_input(self.scan()?.tail(to_idx(n)))
    }

    /// Run a SQL query with the file registered as [`SQL_TABLE_NAME`]
    pub fn sql(&self, query: &str) -> Result<DataFrame, SourceError> {
        let query_error = |source| SourceError::Query {
            query: query.to_string(),
            source,
        };

        let mut ctx = SQLContext::new();
        ctx.register(SQL_TABLE_NAME, self.scan()?);
        tracing::debug!(query, "executing sql");
        let df = ctx
            .execute(query)
            .and_then(|lf| lf.collect())
            .map_err(query_error)?;
        tracing::debug!(rows = df.height(), cols = df.width(), "query complete");
        Ok(df)
    }

    /// Stream the whole file to `out` as delimited text
    ///
    /// Rows are collected one window at a time, so memory stays bounded by
    /// the window size rather than the file size. The header is written once,
    /// with the first window, even when the file has no rows.
    pub fn write_csv<W: Write>(&self, out: W, options: CsvOptions) -> Result<usize, SourceError> {
        self.write_csv_windowed(out, options, CSV_WINDOW_ROWS)
    }

    fn write_csv_windowed<W: Write>(
        &self,
        out: W,
        options: CsvOptions,
        window_rows: usize,
    ) -> Result<usize, SourceError> {
        let lf = self.scan()?;
        let schema = lf.clone().collect_schema().map_err(|e| self.input_error(e))?;
        let total = self.height()?;

        let mut writer = CsvWriter::new(out)
            .include_header(options.include_header)
            .with_separator(options.separator)
            .batched(&schema)
            .map_err(SourceError::Write)?;

        let mut offset = 0;
        loop {
            let window = self.collect_input(lf.clone().slice(offset as i64, to_idx(window_rows)))?;
            writer.write_batch(&window).map_err(SourceError::Write)?;
            offset += window.height();
            if offset >= total || window.height() == 0 {
                break;
            }
        }

        tracing::debug!(rows = offset, "csv written");
        Ok(offset)
    }
}

fn to_idx(n: usize) -> IdxSize {
    IdxSize::try_from(n).unwrap_or(IdxSize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir) -> PathBuf {
        let mut df = df!(
            "id" => &[1i64, 2, 3, 4, 5],
            "name" => &["ada", "brian", "cleo", "dmitri", "eve"],
            "active" => &[true, false, true, true, false],
        )
        .unwrap();
        let path = dir.path().join("people.parquet");
        let mut file = std::fs::File::create(&path).unwrap();
        ParquetWriter::new(&mut file).finish(&mut df).unwrap();
        path
    }

    fn ids(df: &DataFrame) -> Vec<i64> {
        df.column("id")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn test_height_matches_collect() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        assert_eq!(source.height().unwrap(), 5);
        assert_eq!(source.collect().unwrap().height(), 5);
    }

    #[test]
    fn test_schema_in_column_order() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        let schema = source.schema().unwrap();
        let names: Vec<&str> = schema.iter_names().map(|n| n.as_str()).collect();
        assert_eq!(names, ["id", "name", "active"]);
        assert_eq!(schema.get("id"), Some(&DataType::Int64));
        assert_eq!(schema.get("name"), Some(&DataType::String));
        assert_eq!(schema.get("active"), Some(&DataType::Boolean));
    }

    #[test]
    fn test_head_and_tail_keep_file_order() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        assert_eq!(ids(&source.head(2).unwrap()), [1, 2]);
        assert_eq!(ids(&source.tail(2).unwrap()), [4, 5]);
        assert_eq!(ids(&source.head(50).unwrap()), [1, 2, 3, 4, 5]);
        assert_eq!(ids(&source.tail(50).unwrap()), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_rows_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        assert_eq!(source.head(0).unwrap().height(), 0);
        assert_eq!(source.tail(0).unwrap().height(), 0);
    }

    #[test]
    fn test_sql_select_all_equals_collect() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        let via_sql = source.sql("select * from self").unwrap();
        let collected = source.collect().unwrap();
        assert!(via_sql.equals(&collected));
    }

    #[test]
    fn test_sql_filter() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        let df = source.sql("select id from self where active = true").unwrap();
        assert_eq!(ids(&df), [1, 3, 4]);
    }

    #[test]
    fn test_sql_unknown_column_is_query_error() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        let err = source.sql("select nope from self").unwrap_err();
        assert!(matches!(err, SourceError::Query { .. }));
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(tmp.path().join("missing.parquet"));
        assert!(matches!(source.collect(), Err(SourceError::Input { .. })));
    }

    #[test]
    fn test_write_csv_with_header() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        let mut buf = Vec::new();
        let options = CsvOptions {
            separator: b',',
            include_header: true,
        };
        let rows = source.write_csv(&mut buf, options).unwrap();
        assert_eq!(rows, 5);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,name,active"));
        assert_eq!(lines.next(), Some("1,ada,true"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_write_csv_without_header() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        let mut buf = Vec::new();
        let options = CsvOptions {
            include_header: false,
            ..CsvOptions::default()
        };
        source.write_csv(&mut buf, options).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some("1\tada\ttrue"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_write_csv_empty_file_writes_header_only() {
        let tmp = TempDir::new().unwrap();
        let mut df = df!(
            "a" => Vec::<i64>::new(),
            "b" => Vec::<&str>::new(),
        )
        .unwrap();
        let path = tmp.path().join("empty.parquet");
        let mut file = std::fs::File::create(&path).unwrap();
        ParquetWriter::new(&mut file).finish(&mut df).unwrap();

        let mut buf = Vec::new();
        let options = CsvOptions {
            separator: b',',
            include_header: true,
        };
        let rows = ParquetSource::new(path).write_csv(&mut buf, options).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\n");
    }

    #[test]
    fn test_write_csv_across_windows_keeps_order() {
        let tmp = TempDir::new().unwrap();
        let source = ParquetSource::new(write_fixture(&tmp));
        let mut buf = Vec::new();
        let options = CsvOptions {
            separator: b',',
            include_header: true,
        };
        let rows = source.write_csv_windowed(&mut buf, options, 2).unwrap();
        assert_eq!(rows, 5);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.iter().filter(|l| **l == "id,name,active").count(), 1);
        let ids: Vec<&str> = lines[1..]
            .iter()
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_write_csv_larger_than_one_window() {
        let tmp = TempDir::new().unwrap();
        let total = CSV_WINDOW_ROWS + 10;
        let mut df = df!("n" => (0..total as i64).collect::<Vec<_>>()).unwrap();
        let path = tmp.path().join("big.parquet");
        let mut file = std::fs::File::create(&path).unwrap();
        ParquetWriter::new(&mut file).finish(&mut df).unwrap();

        let mut buf = Vec::new();
        let rows = ParquetSource::new(path)
            .write_csv(&mut buf, CsvOptions::default())
            .unwrap();
        assert_eq!(rows, total);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("n"));
        assert!(lines.enumerate().all(|(i, l)| l == i.to_string()));
        assert_eq!(text.lines().count(), total + 1);
    }
}
