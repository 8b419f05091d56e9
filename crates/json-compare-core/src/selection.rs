//! Selection Set: which property paths participate in a comparison.
//!
//! Members are bracket-free dot-paths declared once per array, regardless of
//! element count or identity. The dual `is_selected` / `has_selected_descendant`
//! test lets the engine walk through an unselected parent (e.g. `user`) to
//! reach a selected child (e.g. `user.email`) while suppressing a difference
//! report on the parent itself.

use indexmap::IndexSet;

use crate::path::strip_brackets;

/// A snapshot of the user's property selection.
///
/// `All` is the sentinel for "compare everything". An explicit selection
/// holds bracket-free dot-paths only; the owning UI constructs a fresh
/// snapshot per comparison, the core never mutates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Explicit(IndexSet<String>),
}

impl Selection {
    /// Explicit selection from an iterator of bracket-free dot-paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Explicit(paths.into_iter().map(Into::into).collect())
    }

    /// True when differences at `path` should be reported.
    ///
    /// Array segments are ignored, so selecting `results.user.email` covers
    /// `results[0].user.email` and `results[id=7].user.email` alike.
    pub fn is_selected(&self, path: &str) -> bool {
        let set = match self {
            Self::All => return true,
            Self::Explicit(set) => set,
        };
        if set.contains(path) {
            return true;
        }
        set.contains(strip_brackets(path).as_str())
    }

    /// True when some selected path lies strictly below `path`.
    ///
    /// Used to decide whether a non-selected object/array still has to be
    /// traversed to reach a selected descendant.
    pub fn has_selected_descendant(&self, path: &str) -> bool {
        let set = match self {
            Self::All => return true,
            Self::Explicit(set) => set,
        };
        if path.is_empty() {
            return !set.is_empty();
        }
        let mut prefix = strip_brackets(path);
        prefix.push('.');
        set.iter().any(|member| member.starts_with(&prefix))
    }

    /// `is_selected || has_selected_descendant` — whether the engine should
    /// descend into `path` at all.
    pub fn should_traverse(&self, path: &str) -> bool {
        self.is_selected(path) || self.has_selected_descendant(path)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::All
    }
}
