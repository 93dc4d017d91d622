//! Display presets and scoped table-formatting configuration
//!
//! The Polars table renderer reads its settings from `POLARS_FMT_*` and
//! `POLARS_TABLE_*` environment variables at format time. A [`DisplayScope`]
//! sets those variables for the duration of one render and restores the
//! previous values when dropped, so a preset never outlives the call that
//! asked for it.

use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

use polars::prelude::DataFrame;

use crate::core::config::Config;

const FMT_MAX_ROWS: &str = "POLARS_FMT_MAX_ROWS";
const FMT_MAX_COLS: &str = "POLARS_FMT_MAX_COLS";
const FMT_STR_LEN: &str = "POLARS_FMT_STR_LEN";
const FMT_TABLE_FORMATTING: &str = "POLARS_FMT_TABLE_FORMATTING";
const TABLE_WIDTH: &str = "POLARS_TABLE_WIDTH";

/// Renderer value meaning "no limit" for row and column counts
const UNBOUNDED: &str = "-1";

/// Serializes renders; the renderer settings are process-wide
static DISPLAY_LOCK: Mutex<()> = Mutex::new(());

/// Named display configurations, in increasing order of verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Row and column limits from the command options
    Default,
    /// Row limit from the command options, every column
    AllColumns,
    /// Every row, every column, long strings
    ShowEverything,
}

impl Preset {
    /// Preset for commands where `--all` means "show all rows" (show, sql)
    pub fn for_rows(all: bool) -> Self {
        if all {
            Preset::ShowEverything
        } else {
            Preset::Default
        }
    }

    /// Preset for commands where `--all` means "show all cols" (head, tail)
    pub fn for_cols(all: bool) -> Self {
        if all {
            Preset::AllColumns
        } else {
            Preset::Default
        }
    }
}

/// A resolved set of renderer settings; `None` limits are unbounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub max_rows: Option<usize>,
    pub max_cols: Option<usize>,
    /// String truncation length (`None` keeps the engine default)
    pub str_len: Option<usize>,
    pub table_formatting: String,
}

impl DisplayOptions {
    /// Resolve a preset against the command's row/column options and config
    pub fn from_preset(preset: Preset, nrows: usize, ncols: usize, config: &Config) -> Self {
        let (max_rows, max_cols, str_len) = match preset {
            Preset::Default => (Some(nrows), Some(ncols), config.str_len),
            Preset::AllColumns => (Some(nrows), None, config.str_len),
            Preset::ShowEverything => (None, None, Some(config.full_str_len())),
        };
        Self {
            max_rows,
            max_cols,
            str_len,
            table_formatting: config.table_formatting().to_string(),
        }
    }

    /// Environment assignments for this configuration; `None` means "unset"
    fn env_pairs(&self) -> [(&'static str, Option<String>); 5] {
        // The renderer parses limits as i64 and ignores anything larger
        let limit = |n: Option<usize>| match n.and_then(|n| i64::try_from(n).ok()) {
            Some(n) => n.to_string(),
            None => UNBOUNDED.to_string(),
        };
        [
            (FMT_MAX_ROWS, Some(limit(self.max_rows))),
            (FMT_MAX_COLS, Some(limit(self.max_cols))),
            (FMT_STR_LEN, self.str_len.map(|n| n.to_string())),
            (FMT_TABLE_FORMATTING, Some(self.table_formatting.clone())),
            // The table is never wrapped to the terminal
            (TABLE_WIDTH, Some(u16::MAX.to_string())),
        ]
    }
}

/// Guard holding a display configuration active until dropped
pub struct DisplayScope {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl DisplayScope {
    /// Apply `options`, remembering whatever was set before
    pub fn enter(options: &DisplayOptions) -> Self {
        let lock = DISPLAY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let mut saved = Vec::new();
        for (key, value) in options.env_pairs() {
            saved.push((key, std::env::var_os(key)));
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
        tracing::debug!(?options, "display configuration applied");

        Self { saved, _lock: lock }
    }
}

impl Drop for DisplayScope {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..) {
            match previous {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

/// Render a DataFrame as a text table under the given configuration
pub fn render(df: &DataFrame, options: &DisplayOptions) -> String {
    let _scope = DisplayScope::enter(options);
    df.to_string()
}
