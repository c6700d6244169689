//! bqsql: parser and formatter for BigQuery Standard SQL.
//!
//! # Example
//!
//! ```
//! use bqsql_parser::{FormatOptions, parse, render_with};
//!
//! let script = parse("select a,b from t where x=1").expect("valid SQL");
//! let sql = render_with(&script, &FormatOptions::default());
//! assert_eq!(sql, "SELECT a, b FROM t WHERE x = 1");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod format;
mod grammar;
pub mod parser;
pub mod printer;
pub mod tables;
pub mod visitor;

#[cfg(test)]
mod printer_tests;
#[cfg(test)]
mod roundtrip_tests;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod visitor_tests;

use bqsql_core::{LayoutConfig, Renderer};

use ast::{Expr, Script};
use grammar::Consume;
use parser::{Cursor, SyntaxError};

pub use printer::TreePrinter;
pub use tables::TableRefs;

/// Errors that can occur while reading SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input contains characters no token can start with.
    #[error("lexical error {0}")]
    Lexical(SyntaxError),

    /// Tokens don't form a statement.
    #[error("syntax error {0}")]
    Syntax(SyntaxError),

    /// Input nested deeper than [`parser::MAX_DEPTH`].
    #[error("recursion limit exceeded {0}")]
    RecursionLimitExceeded(SyntaxError),
}

impl Error {
    /// Location and message of the failure.
    pub fn syntax_error(&self) -> &SyntaxError {
        match self {
            Error::Lexical(err) | Error::Syntax(err) | Error::RecursionLimitExceeded(err) => err,
        }
    }
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a script of `;`-separated statements.
pub fn parse(source: &str) -> Result<Script> {
    let mut cur = Cursor::new(source)?;
    grammar::script(&mut cur)
}

/// Parse a single expression spanning the whole input.
pub fn parse_expr(source: &str) -> Result<Expr> {
    let mut cur = Cursor::new(source)?;
    let expr = Expr::parse(&mut cur)?;
    if !cur.at_eof() {
        return Err(cur.error("end of input"));
    }
    Ok(expr)
}

/// How [`render_with`] lays out SQL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Print every statement on as few lines as possible, ignoring width.
    pub compact: bool,
    pub layout: LayoutConfig,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.layout = self.layout.with_width(width);
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.layout = self.layout.with_indent(indent);
        self
    }

    fn renderer(&self) -> Renderer {
        if self.compact {
            Renderer::new(LayoutConfig::UNBOUNDED)
        } else {
            Renderer::new(self.layout)
        }
    }
}

/// Render a script with the default width.
pub fn render(script: &Script, compact: bool) -> String {
    render_with(script, &FormatOptions::new().with_compact(compact))
}

pub fn render_with(script: &Script, options: &FormatOptions) -> String {
    let doc = format::script_doc(script, options.compact);
    options.renderer().render(&doc)
}

pub fn render_expr(expr: &Expr, options: &FormatOptions) -> String {
    use format::Format;
    options.renderer().render(&expr.doc(options.compact))
}

/// Parse and re-render in one step.
pub fn format_source(source: &str, options: &FormatOptions) -> Result<String> {
    let script = parse(source)?;
    Ok(render_with(&script, options))
}

/// Indented dump of the syntax tree, one node per line.
pub fn render_tree(script: &Script) -> String {
    TreePrinter::new(script).dump()
}
