//! argtable - Permissive command-line flag table with typed accessors.
//!
//! This library turns a raw argument vector into an immutable table of
//! `-name[=value]` entries, applying `--name` normalization and `-noname`
//! negation, and exposes boolean, string, and integer getters that fall back
//! to defaults instead of failing.

pub mod accessors;
pub mod config;
pub mod output;
pub mod parser;

pub use accessors::{Lookup, Resolution};
pub use config::{ConfigError, ParserConfig, Precedence};
pub use output::{render, render_json, render_text, Format};
pub use parser::{parse_args, ArgTable, Entry, Origin};
