//! Dense one-line-per-column preview of a DataFrame
//!
//! Output layout:
//!
//! ```text
//! Rows: 3
//! Columns: 2
//! $ id   <i64> 1, 2, 3
//! $ name <str> "ada", "brian", null
//! ```
//!
//! Names are left-aligned and types right-aligned to the widest entry.

use polars::prelude::*;

/// Limits for [`glimpse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlimpseOptions {
    /// Leading values shown per column
    pub max_items: usize,
    /// Column names longer than this are cut and end with an ellipsis
    pub max_colname_length: usize,
}

impl Default for GlimpseOptions {
    fn default() -> Self {
        Self {
            max_items: 15,
            max_colname_length: 50,
        }
    }
}

/// Render the glimpse preview of `df`
pub fn glimpse(df: &DataFrame, options: GlimpseOptions) -> PolarsResult<String> {
    let n_values = options.max_items.min(df.height());

    let mut lines = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let name = truncate_name(column.name().as_str(), options.max_colname_length);
        let dtype = format!("<{}>", column.dtype());
        let mut values = Vec::with_capacity(n_values);
        for idx in 0..n_values {
            values.push(format_value(&column.get(idx)?));
        }
        lines.push((name, dtype, values.join(", ")));
    }

    let name_width = lines.iter().map(|(n, _, _)| n.chars().count()).max().unwrap_or(0);
    let dtype_width = lines.iter().map(|(_, d, _)| d.chars().count()).max().unwrap_or(0);

    let mut out = format!("Rows: {}\nColumns: {}\n", df.height(), df.width());
    for (name, dtype, values) in lines {
        let line = format!("$ {name:<name_width$} {dtype:>dtype_width$} {values}");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(max_len.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn format_value(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => "null".to_string(),
        AnyValue::String(s) => format!("{s:?}"),
        AnyValue::StringOwned(s) => format!("{:?}", s.as_str()),
        other => other.to_string(),
    }
}
