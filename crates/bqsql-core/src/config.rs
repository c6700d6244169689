//! Configuration for the renderer.

/// Target width and indentation unit used when linearizing a [`Doc`](crate::Doc).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Maximum line width in characters.
    pub width: usize,
    /// Spaces added by every [`Doc::Indent`](crate::Doc::Indent).
    pub indent: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 80,
            indent: 2,
        }
    }
}

impl LayoutConfig {
    /// Config that never wraps: every `Choice` resolves to its compact candidate.
    pub const UNBOUNDED: Self = Self {
        width: usize::MAX,
        indent: 2,
    };

    /// Create a new LayoutConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum line width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the indentation unit.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
