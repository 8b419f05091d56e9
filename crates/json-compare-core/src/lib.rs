//! Core comparison primitives for json-compare-rs.
//!
//! Compares two JSON trees into a structured difference list, restricted to
//! a selected subset of property paths, with arrays of objects reconciled by
//! identity keys instead of position. The position locator maps a reported
//! path back to a byte range in pretty-printed text.

pub mod path;
pub mod selection;
pub mod keys;
pub mod stable;
pub mod pretty;
pub mod diff;
pub mod locate;
pub mod scan;
pub mod normalize;

pub use diff::{diff, Comparison, Difference, DifferenceKind};
pub use keys::{ArrayKeySetting, ArrayKeySettings, DiffOptions};
pub use locate::{locate, Span};
pub use path::{parse_path, strip_brackets, PathError, PathSegment};
pub use scan::PropertyRecord;
pub use selection::Selection;

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
