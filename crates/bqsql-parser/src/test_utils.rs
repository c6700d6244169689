//! Test helpers shared by the grammar and formatter tests.

use crate::ast::Script;
use crate::printer::dump_expr;
use crate::{FormatOptions, parse, parse_expr, render_expr, render_tree, render_with};

pub fn script(sql: &str) -> Script {
    match parse(sql) {
        Ok(script) => script,
        Err(err) => panic!("failed to parse {sql:?}: {err}"),
    }
}

/// Parse and re-render on as few lines as possible.
pub fn compact(sql: &str) -> String {
    render_with(&script(sql), &FormatOptions::new().with_compact(true))
}

/// Parse and re-render at `width`.
pub fn pretty(sql: &str, width: usize) -> String {
    render_with(&script(sql), &FormatOptions::new().with_width(width))
}

pub fn tree(sql: &str) -> String {
    render_tree(&script(sql))
}

pub fn expr_tree(sql: &str) -> String {
    match parse_expr(sql) {
        Ok(expr) => dump_expr(&expr),
        Err(err) => panic!("failed to parse {sql:?}: {err}"),
    }
}

pub fn expr_compact(sql: &str) -> String {
    match parse_expr(sql) {
        Ok(expr) => render_expr(&expr, &FormatOptions::new().with_compact(true)),
        Err(err) => panic!("failed to parse {sql:?}: {err}"),
    }
}

pub fn expr_pretty(sql: &str, width: usize) -> String {
    match parse_expr(sql) {
        Ok(expr) => render_expr(&expr, &FormatOptions::new().with_width(width)),
        Err(err) => panic!("failed to parse {sql:?}: {err}"),
    }
}

/// Display text of the error `sql` fails with.
pub fn error(sql: &str) -> String {
    match parse(sql) {
        Ok(script) => panic!("expected {sql:?} to fail, got {script:?}"),
        Err(err) => err.to_string(),
    }
}
