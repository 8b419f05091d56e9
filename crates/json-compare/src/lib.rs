//! json-compare — content-aware comparison of JSON documents.
//!
//! Re-exports the core engine and adds the plain-text report plus the thin
//! CLI seam where documents are parsed and parse failures become user-facing
//! errors.

pub mod cli;
pub mod report;

pub use json_compare_core::{
    diff, locate, parse_path, strip_brackets, ArrayKeySetting, ArrayKeySettings, Comparison,
    DiffOptions, Difference, DifferenceKind, PathError, PathSegment, PropertyRecord, Selection,
    Span,
};

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
