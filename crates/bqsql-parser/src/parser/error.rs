//! Syntax error types and rendering utilities.

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::{TextRange, TextSize};
use serde::{Serialize, Serializer};

/// A positioned parse failure.
///
/// The message reads ``expected `X`, found `Y` `` for grammar failures and
/// ``unrecognized input `Y` `` for lexical ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    #[serde(serialize_with = "serialize_text_range")]
    pub range: TextRange,
    pub message: String,
}

fn serialize_text_range<S: Serializer>(range: &TextRange, s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;
    let mut state = s.serialize_struct("TextRange", 2)?;
    state.serialize_field("start", &u32::from(range.start()))?;
    state.serialize_field("end", &u32::from(range.end()))?;
    state.end()
}

impl SyntaxError {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }

    pub fn at_offset(offset: TextSize, message: impl Into<String>) -> Self {
        Self::new(TextRange::empty(offset), message)
    }

    /// 1-based line and column (in characters) of the error start within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let start = usize::from(self.range.start()).min(source.len());
        let before = source.get(..start).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "at {}..{}: {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Render syntax errors using annotate-snippets for nice diagnostic output.
pub fn render_errors(
    source: &str,
    errors: &[SyntaxError],
    path: Option<&str>,
    colored: bool,
) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let renderer = if colored {
        Renderer::styled()
    } else {
        Renderer::plain()
    };
    let mut output = String::new();

    for (i, err) in errors.iter().enumerate() {
        let start: usize = err.range.start().into();
        let end: usize = err.range.end().into();
        // Errors at end of input have nothing to underline; point at the last char instead.
        let (start, end) = if start == end {
            match source[start..].chars().next() {
                Some(c) => (start, start + c.len_utf8()),
                None => {
                    let last = source.char_indices().next_back().map_or(0, |(i, _)| i);
                    (last, source.len())
                }
            }
        } else {
            (start, end)
        };

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(start..end).label(&err.message));

        if let Some(p) = path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&err.message).element(snippet)];

        if i > 0 {
            output.push('\n');
        }
        output.push_str(&renderer.render(&report).to_string());
    }

    output
}
