//! SQL formatting.
//!
//! Every node produces a [`Doc`] in one of two modes. With `compact` set the
//! document is single-line oriented and contains no `Choice`, so a parent
//! that already committed to its compact form never re-decides for its
//! children. Otherwise the document is a `Choice` between that compact form
//! and an expanded, indented one, built from the children's own full
//! documents. Both candidates always spell the same tokens.

mod expr;
mod query;
mod statement;

pub(crate) mod types;

#[cfg(test)]
mod query_tests;
#[cfg(test)]
mod statement_tests;

use bqsql_core::Doc;

pub use statement::script_doc;

pub trait Format {
    fn doc(&self, compact: bool) -> Doc;
}

impl<T: Format> Format for Box<T> {
    fn doc(&self, compact: bool) -> Doc {
        (**self).doc(compact)
    }
}

pub(crate) fn text(s: impl Into<String>) -> Doc {
    Doc::text(s)
}

/// Compact candidate alone, or a choice between it and `full`.
pub(crate) fn choice(compact: bool, compact_doc: Doc, full: impl FnOnce() -> Doc) -> Doc {
    if compact {
        compact_doc
    } else {
        Doc::choice(compact_doc, full())
    }
}

pub(crate) fn docs<'a, T: Format + 'a>(
    items: impl IntoIterator<Item = &'a T>,
    compact: bool,
) -> Vec<Doc> {
    items.into_iter().map(|item| item.doc(compact)).collect()
}

/// `a, b, c` on one line.
pub(crate) fn comma_line(docs: Vec<Doc>) -> Doc {
    let mut parts = Vec::with_capacity(docs.len() * 2);
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            parts.push(text(", "));
        }
        parts.push(doc);
    }
    Doc::Line(parts)
}

/// Every item but the last followed by `,`; the last followed by `tail`.
pub(crate) fn with_commas(docs: Vec<Doc>, tail: &str) -> Vec<Doc> {
    let count = docs.len();
    docs.into_iter()
        .enumerate()
        .map(|(i, doc)| {
            let suffix = if i + 1 == count { tail } else { "," };
            if suffix.is_empty() {
                doc
            } else {
                doc.append(text(suffix))
            }
        })
        .collect()
}

/// Items joined on one line when they fit, one per line otherwise.
pub(crate) fn comma_wrap(docs: Vec<Doc>, tail: &str) -> Doc {
    if docs.is_empty() {
        return text(tail);
    }
    Doc::wrap(with_commas(docs, tail), " ")
}

/// Items one per line.
pub(crate) fn comma_stack(docs: Vec<Doc>) -> Doc {
    Doc::stack(with_commas(docs, ""))
}

/// `head` + comma-separated arguments + `tail`.
///
/// The expanded form keeps `head` in place and wraps the arguments at the
/// column after it.
pub(crate) fn call(head: &str, tail: &str, compact: bool, args: impl Fn(bool) -> Vec<Doc>) -> Doc {
    let compact_doc = Doc::line([text(head), comma_line(args(true)), text(tail)]);
    choice(compact, compact_doc, || {
        Doc::line([text(head), comma_wrap(args(false), tail)])
    })
}

/// `KEYWORD body` on one line, or the keyword above its indented body.
pub(crate) fn clause(keyword: &str, compact: bool, body: impl Fn(bool) -> Doc) -> Doc {
    let line = Doc::line([text(format!("{keyword} ")), body(true)]);
    choice(compact, line, || {
        Doc::stack([text(keyword), Doc::indent(body(false))])
    })
}

/// `head`, the query, `tail`; expanded, the query is indented between them.
pub(crate) fn enclosed(head: &str, inner: &impl Format, tail: Doc, compact: bool) -> Doc {
    let compact_doc = Doc::line([text(head), inner.doc(true), tail.clone()]);
    choice(compact, compact_doc, || {
        Doc::stack([text(head), Doc::indent(inner.doc(false)), tail])
    })
}

/// Comments, one per line.
pub(crate) fn comments_doc(comments: &[String]) -> Vec<Doc> {
    comments.iter().map(|c| text(c.as_str())).collect()
}

/// Joins the non-empty parts with single spaces.
pub(crate) fn spaced(parts: Vec<Doc>) -> Doc {
    let mut out = Vec::with_capacity(parts.len() * 2);
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            out.push(text(" "));
        }
        out.push(part);
    }
    Doc::Line(out)
}
