//! Lexer for BigQuery Standard SQL.
//!
//! Produces span-based tokens without storing text; text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters into single `Garbage` tokens rather
//! than producing one error per character. [`tokenize`] turns the first of them into
//! [`Error::Lexical`], since the grammar never recovers.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::error::SyntaxError;
use super::syntax_kind::SyntaxKind;
use crate::{Error, Result};

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// A comment set aside from the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment {
    /// Index of the first significant token after the comment.
    pub before: usize,
    pub span: TextRange,
}

/// Significant tokens plus the comments found between them.
#[derive(Debug, Clone, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens, trivia included.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Splits the token stream into significant tokens and a comment side channel.
///
/// Whitespace is dropped. Any `Garbage` token fails the whole input.
pub fn tokenize(source: &str) -> Result<Lexed> {
    let mut lexed = Lexed::default();
    for token in lex(source) {
        match token.kind {
            SyntaxKind::Garbage => {
                let text = token_text(source, &token);
                return Err(Error::Lexical(SyntaxError::new(
                    token.span,
                    format!("unrecognized input `{text}`"),
                )));
            }
            kind if kind.is_comment() => lexed.comments.push(Comment {
                before: lexed.tokens.len(),
                span: token.span,
            }),
            SyntaxKind::Whitespace => {}
            _ => lexed.tokens.push(token),
        }
    }
    Ok(lexed)
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
