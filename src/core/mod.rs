//! Core module - data access, display configuration and rendering

pub mod config;
pub mod display;
pub mod glimpse;
pub mod source;

pub use config::{Config, ConfigError};
pub use display::{DisplayOptions, DisplayScope, Preset};
pub use glimpse::GlimpseOptions;
pub use source::{CsvOptions, ParquetSource, SourceError};
