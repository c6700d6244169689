//! Document algebra.
//!
//! Six primitives are enough to describe every SQL layout we produce:
//!
//! ```text
//! Text    atomic string, never broken
//! Line    horizontal concatenation
//! Stack   vertical concatenation, one part per line
//! Indent  shifts a subtree right by one indentation unit
//! Wrap    items joined by a separator, or one per line when they don't fit
//! Choice  compact candidate if it fits, full candidate otherwise
//! ```
//!
//! Both candidates of a `Choice` must print the same tokens; only whitespace
//! may differ.

/// A layout document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doc {
    Text(String),
    Line(Vec<Doc>),
    Stack(Vec<Doc>),
    Indent(Box<Doc>),
    Wrap { items: Vec<Doc>, sep: String },
    Choice { compact: Box<Doc>, full: Box<Doc> },
}

impl Doc {
    pub fn text(text: impl Into<String>) -> Self {
        Doc::Text(text.into())
    }

    pub fn empty() -> Self {
        Doc::Text(String::new())
    }

    pub fn line(parts: impl IntoIterator<Item = Doc>) -> Self {
        Doc::Line(parts.into_iter().collect())
    }

    pub fn stack(parts: impl IntoIterator<Item = Doc>) -> Self {
        Doc::Stack(parts.into_iter().collect())
    }

    pub fn indent(doc: Doc) -> Self {
        Doc::Indent(Box::new(doc))
    }

    pub fn wrap(items: impl IntoIterator<Item = Doc>, sep: impl Into<String>) -> Self {
        Doc::Wrap {
            items: items.into_iter().collect(),
            sep: sep.into(),
        }
    }

    pub fn choice(compact: Doc, full: Doc) -> Self {
        Doc::Choice {
            compact: Box::new(compact),
            full: Box::new(full),
        }
    }

    /// Append `suffix` to the end of this document.
    ///
    /// Flattens into an existing `Line` instead of nesting a new one.
    pub fn append(self, suffix: Doc) -> Self {
        match self {
            Doc::Line(mut parts) => {
                parts.push(suffix);
                Doc::Line(parts)
            }
            other => Doc::Line(vec![other, suffix]),
        }
    }

    /// Whether this document contains a `Choice` anywhere.
    pub fn has_choice(&self) -> bool {
        match self {
            Doc::Text(_) => false,
            Doc::Line(parts) | Doc::Stack(parts) => parts.iter().any(Doc::has_choice),
            Doc::Wrap { items, .. } => items.iter().any(Doc::has_choice),
            Doc::Indent(inner) => inner.has_choice(),
            Doc::Choice { .. } => true,
        }
    }
}

impl From<&str> for Doc {
    fn from(text: &str) -> Self {
        Doc::text(text)
    }
}

impl From<String> for Doc {
    fn from(text: String) -> Self {
        Doc::Text(text)
    }
}
