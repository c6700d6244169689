//! Token cursor shared by every grammar rule.
//!
//! The cursor is an index into the significant tokens, so saving and
//! restoring a position is a copy. Comments live in a side channel keyed by
//! the index of the token that follows them; [`Cursor::get_comments`] drains
//! every comment the cursor has moved past.
//!
//! Patterns are plain strings. A pattern starting with a letter or `_`
//! matches a `Word` token case-insensitively; any other pattern matches an
//! operator or delimiter token exactly. Literals and backquoted identifiers
//! never match a pattern.

use std::collections::HashMap;

use rowan::{TextRange, TextSize};

use super::MAX_DEPTH;
use super::error::SyntaxError;
use super::lexer::{Comment, Lexed, Token, token_text, tokenize};
use super::syntax_kind::SyntaxKind;
use crate::ast::Query;
use crate::{Error, Result};

/// Saved cursor position, restored with [`Cursor::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pos: usize,
    drained: usize,
}

#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    /// Index of the next significant token.
    pos: usize,
    /// Number of comments already handed out.
    drained: usize,
    depth: u32,
    /// Outcome of `( query )` keyed by the position of its `(`.
    subqueries: HashMap<usize, Option<(Query, Mark)>>,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Result<Self> {
        let Lexed { tokens, comments } = tokenize(source)?;
        Ok(Self {
            source,
            tokens,
            comments,
            pos: 0,
            drained: 0,
            depth: 0,
            subqueries: HashMap::new(),
        })
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    fn nth(&self, lookahead: usize) -> Option<&Token> {
        self.tokens.get(self.pos + lookahead)
    }

    fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn peek_kind(&self) -> Option<SyntaxKind> {
        self.nth_kind(0)
    }

    pub fn nth_kind(&self, lookahead: usize) -> Option<SyntaxKind> {
        self.nth(lookahead).map(|t| t.kind)
    }

    pub fn peek_text(&self) -> Option<&'src str> {
        self.nth(0).map(|t| self.text(t))
    }

    /// Span of the next token, or an empty range at end of input.
    pub fn span(&self) -> TextRange {
        self.nth(0)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub fn offset(&self) -> TextSize {
        self.span().start()
    }

    fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    fn matches(&self, lookahead: usize, pattern: &str) -> bool {
        let Some(token) = self.nth(lookahead) else {
            return false;
        };
        let text = self.text(token);
        if is_word_pattern(pattern) {
            token.kind == SyntaxKind::Word && text.eq_ignore_ascii_case(pattern)
        } else {
            token.kind.is_punct() && text == pattern
        }
    }

    pub fn peek(&self, pattern: &str) -> bool {
        self.matches(0, pattern)
    }

    pub fn peek_nth(&self, lookahead: usize, pattern: &str) -> bool {
        self.matches(lookahead, pattern)
    }

    /// True if the next tokens match `patterns` one for one.
    pub fn peek_seq(&self, patterns: &[&str]) -> bool {
        patterns
            .iter()
            .enumerate()
            .all(|(i, pattern)| self.matches(i, pattern))
    }

    pub fn peek_any(&self, patterns: &[&str]) -> bool {
        patterns.iter().any(|pattern| self.peek(pattern))
    }

    /// Advance past the next token, returning its text.
    pub fn bump(&mut self) -> Option<&'src str> {
        let text = self.peek_text()?;
        self.pos += 1;
        Some(text)
    }

    pub fn consume(&mut self, pattern: &str) -> Option<&'src str> {
        if self.peek(pattern) { self.bump() } else { None }
    }

    /// Consume a whole token sequence or nothing. Returns the first token's text.
    pub fn consume_seq(&mut self, patterns: &[&str]) -> Option<&'src str> {
        if patterns.is_empty() || !self.peek_seq(patterns) {
            return None;
        }
        let first = self.peek_text();
        self.pos += patterns.len();
        first
    }

    /// First matching pattern wins.
    pub fn consume_any(&mut self, patterns: &[&str]) -> Option<&'src str> {
        patterns.iter().find_map(|pattern| self.consume(pattern))
    }

    pub fn consume_kind(&mut self, kind: SyntaxKind) -> Option<&'src str> {
        if self.peek_kind() == Some(kind) {
            self.bump()
        } else {
            None
        }
    }

    /// Like [`peek_seq`](Self::peek_seq), but the tokens must also touch.
    pub fn peek_joined(&self, patterns: &[&str]) -> bool {
        self.peek_seq(patterns)
            && (1..patterns.len()).all(|i| match (self.nth(i - 1), self.nth(i)) {
                (Some(prev), Some(next)) => prev.span.end() == next.span.start(),
                _ => false,
            })
    }

    /// Consume adjacent tokens as one operator, returning the joined source text.
    pub fn consume_joined(&mut self, patterns: &[&str]) -> Option<&'src str> {
        if patterns.is_empty() || !self.peek_joined(patterns) {
            return None;
        }
        let start = self.nth(0)?.span.start();
        let end = self.nth(patterns.len() - 1)?.span.end();
        self.pos += patterns.len();
        Some(&self.source[TextRange::new(start, end)])
    }

    pub fn expect(&mut self, pattern: &str) -> Result<&'src str> {
        self.consume(pattern)
            .ok_or_else(|| self.error(&format!("`{pattern}`")))
    }

    /// Syntax error at the next token: ``expected {expected}, found `…` ``.
    pub fn error(&self, expected: &str) -> Error {
        let found = match self.peek_text() {
            Some(text) => format!("found `{text}`"),
            None => "found end of input".to_owned(),
        };
        Error::Syntax(SyntaxError::new(
            self.span(),
            format!("expected {expected}, {found}"),
        ))
    }

    /// Drain the text of every comment that precedes the cursor.
    pub fn get_comments(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(comment) = self.comments.get(self.drained) {
            if comment.before > self.pos {
                break;
            }
            out.push(self.source[comment.span].trim_end().to_owned());
            self.drained += 1;
        }
        out
    }

    pub fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            drained: self.drained,
        }
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.drained = mark.drained;
    }

    /// Run one alternative. When it yields `Ok(None)` the cursor is restored,
    /// so a failed alternative never leaks partial consumption.
    pub fn attempt<T>(
        &mut self,
        alternative: impl FnOnce(&mut Self) -> Result<Option<T>>,
    ) -> Result<Option<T>> {
        let mark = self.mark();
        let result = alternative(self)?;
        if result.is_none() {
            self.reset(mark);
        }
        Ok(result)
    }

    /// Run the `( query )` rule at most once per position. Later calls at
    /// the same position replay the stored outcome. Only one rule may go
    /// through here, since the position alone keys the outcome.
    pub fn memo_subquery(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<Option<Query>>,
    ) -> Result<Option<Query>> {
        let start = self.pos;
        if let Some(outcome) = self.subqueries.get(&start).cloned() {
            return Ok(outcome.map(|(query, end)| {
                self.reset(end);
                query
            }));
        }
        let result = self.attempt(rule)?;
        let outcome = result.clone().map(|query| (query, self.mark()));
        self.subqueries.insert(start, outcome);
        Ok(result)
    }

    /// Run a recursive rule one nesting level deeper.
    pub fn descend<T>(&mut self, rule: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::RecursionLimitExceeded(SyntaxError::new(
                self.span(),
                format!("nesting exceeds {MAX_DEPTH} levels"),
            )));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}

fn is_word_pattern(pattern: &str) -> bool {
    pattern
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
}
