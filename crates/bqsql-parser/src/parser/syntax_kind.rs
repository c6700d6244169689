//! Token kinds for BigQuery Standard SQL.
//!
//! Logos derives token recognition directly on this enum. Keywords are not
//! separate kinds: every keyword lexes as a `Word` and the cursor matches it
//! case-insensitively, which keeps non-reserved keywords usable as names.

use logos::{Lexer, Logos};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(".")]
    Dot,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("=")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("<>")]
    LtGt,

    #[token("<")]
    Lt,

    /// A lone `>`. Shift-right is two adjacent `>` joined by the parser, so
    /// `ARRAY<ARRAY<INT64>>` closes both brackets.
    #[token(">")]
    Gt,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<<")]
    ShiftLeft,

    #[token("||")]
    Concat,

    #[token("|")]
    Pipe,

    #[token("&")]
    Ampersand,

    #[token("^")]
    Caret,

    #[token("~")]
    Tilde,

    #[token("@")]
    At,

    #[token("?")]
    Question,

    #[token(":")]
    Colon,

    /// Keyword or bare identifier.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"`(?:[^`\\]|\\.)*`")]
    QuotedIdent,

    /// String or bytes literal, including `r`/`b` prefixes and triple quotes.
    #[regex(r#"[rRbB]{0,2}"(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"[rRbB]{0,2}'(?:[^'\\\n]|\\.)*'")]
    #[regex(r#"[rRbB]{0,2}""""#, triple_quoted)]
    #[regex(r"[rRbB]{0,2}'''", triple_quoted)]
    String,

    #[regex(r"[0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+(?:[eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Number,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"--[^\n]*", allow_greedy = true)]
    #[regex(r"#[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*(?:[^*]|\*[^/])*\*/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, LineComment | BlockComment)
    }

    /// Operators and delimiters: the kinds a non-word pattern may match.
    #[inline]
    pub fn is_punct(self) -> bool {
        !matches!(
            self,
            Word | QuotedIdent | String | Number | Whitespace | LineComment | BlockComment | Garbage
        )
    }
}

/// Extends a triple-quote opener up to its matching closer.
fn triple_quoted(lex: &mut Lexer<SyntaxKind>) -> bool {
    let closer = if lex.slice().ends_with('\'') {
        "'''"
    } else {
        "\"\"\""
    };
    match find_closer(lex.remainder(), closer) {
        Some(end) => {
            lex.bump(end);
            true
        }
        None => false,
    }
}

/// Byte offset just past `closer` in `rest`, skipping backslash escapes.
fn find_closer(rest: &str, closer: &str) -> Option<usize> {
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if rest[i..].starts_with(closer) {
            return Some(i + closer.len());
        }
    }
    None
}
