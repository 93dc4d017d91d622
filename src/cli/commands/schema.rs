//! `pqview schema` command - Display column names and data types
//!
//! Only the file metadata is read. The mapping keeps column order in every
//! output format.

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use polars::prelude::{DataType, Schema};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::FileArg;
use crate::core::ParquetSource;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Structured mapping, one `"name": Type` entry per line
    #[default]
    Auto,
    /// JSON object
    Json,
    /// YAML mapping
    Yaml,
    /// Tab-separated name and type (for piping)
    Tsv,
    /// Markdown table
    Md,
}

#[derive(clap::Args, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub input: FileArg,

    /// Output format
    #[arg(long, short = 'f', default_value = "auto")]
    pub format: SchemaFormat,
}

/// Ordered view of a schema for printing
pub struct SchemaView<'a> {
    entries: Vec<(&'a str, &'a DataType)>,
}

impl<'a> SchemaView<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            entries: schema.iter().map(|(name, dtype)| (name.as_str(), dtype)).collect(),
        }
    }

    pub fn render(&self, format: SchemaFormat) -> Result<String> {
        let out = match format {
            SchemaFormat::Auto => format!("{:#?}\n", self),
            SchemaFormat::Json => {
                let mut json = serde_json::to_string_pretty(self).into_diagnostic()?;
                json.push('\n');
                json
            }
            SchemaFormat::Yaml => serde_yml::to_string(self).into_diagnostic()?,
            SchemaFormat::Tsv => self
                .entries
                .iter()
                .map(|(name, dtype)| format!("{}\t{:?}\n", name, dtype))
                .collect(),
            SchemaFormat::Md => {
                let mut builder = Builder::default();
                builder.push_record(["Column", "Type"]);
                for (name, dtype) in &self.entries {
                    builder.push_record([name.to_string(), format!("{:?}", dtype)]);
                }
                let mut table = builder.build().with(Style::markdown()).to_string();
                table.push('\n');
                table
            }
        };
        Ok(out)
    }
}

impl fmt::Debug for SchemaView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, dtype)| (name, dtype)))
            .finish()
    }
}

impl Serialize for SchemaView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, dtype) in &self.entries {
            map.serialize_entry(name, &format!("{:?}", dtype))?;
        }
        map.end()
    }
}

pub fn run(args: SchemaArgs) -> Result<()> {
    let schema = ParquetSource::new(args.input.file).schema()?;
    print!("{}", SchemaView::new(&schema).render(args.format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample() -> SchemaRef {
        let df = df!("zeta" => &[1i64], "alpha" => &["a"]).unwrap();
        df.lazy().collect_schema().unwrap()
    }

    #[test]
    fn test_auto_keeps_column_order() {
        let schema = sample();
        let out = SchemaView::new(&schema).render(SchemaFormat::Auto).unwrap();
        assert_eq!(out, "{\n    \"zeta\": Int64,\n    \"alpha\": String,\n}\n");
    }

    #[test]
    fn test_json_keeps_column_order() {
        let schema = sample();
        let out = SchemaView::new(&schema).render(SchemaFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"zeta\": \"Int64\",\n  \"alpha\": \"String\"\n}\n");
    }

    #[test]
    fn test_yaml() {
        let schema = sample();
        let out = SchemaView::new(&schema).render(SchemaFormat::Yaml).unwrap();
        assert_eq!(out, "zeta: Int64\nalpha: String\n");
    }

    #[test]
    fn test_tsv() {
        let schema = sample();
        let out = SchemaView::new(&schema).render(SchemaFormat::Tsv).unwrap();
        assert_eq!(out, "zeta\tInt64\nalpha\tString\n");
    }

    #[test]
    fn test_markdown_table() {
        let schema = sample();
        let out = SchemaView::new(&schema).render(SchemaFormat::Md).unwrap();
        assert!(out.starts_with("| Column | Type   |"));
        assert!(out.contains("| zeta   | Int64  |"));
    }
}
