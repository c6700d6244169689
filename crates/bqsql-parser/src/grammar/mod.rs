//! Grammar rules: one `consume` per node, tried in a fixed order.
//!
//! Every rule follows the same contract. `Ok(Some(node))` means the rule
//! matched and the cursor sits after it. `Ok(None)` means "not this
//! alternative"; callers wrap alternatives in [`Cursor::attempt`] so nothing
//! stays consumed. `Err` is a hard failure that aborts the whole parse.

mod ident;
mod query;
mod statement;
mod types;

pub(crate) mod aggregate;
pub(crate) mod expr;

#[cfg(test)]
mod aggregate_tests;
#[cfg(test)]
mod statement_tests;
#[cfg(test)]
mod types_tests;

pub(crate) use statement::script;

use crate::Result;
use crate::ast::NodeList;
use crate::parser::Cursor;

/// A node that knows how to read itself from a token cursor.
pub trait Consume: Sized {
    /// Description used in "expected …" messages.
    const EXPECTED: &'static str;

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>>;

    /// Like [`consume`](Self::consume), but absence is a syntax error.
    fn parse(cur: &mut Cursor<'_>) -> Result<Self> {
        match Self::consume(cur)? {
            Some(node) => Ok(node),
            None => Err(cur.error(Self::EXPECTED)),
        }
    }
}

/// One or more `item`s separated by commas.
pub(crate) fn comma_separated<'src, T>(
    cur: &mut Cursor<'src>,
    mut item: impl FnMut(&mut Cursor<'src>) -> Result<T>,
) -> Result<NodeList<T>> {
    let mut items = vec![item(cur)?];
    while cur.consume(",").is_some() {
        items.push(item(cur)?);
    }
    Ok(items.into())
}

/// `( item, … )`, possibly empty.
pub(crate) fn parenthesized<'src, T>(
    cur: &mut Cursor<'src>,
    item: impl FnMut(&mut Cursor<'src>) -> Result<T>,
) -> Result<NodeList<T>> {
    cur.expect("(")?;
    if cur.consume(")").is_some() {
        return Ok(NodeList::new());
    }
    let items = comma_separated(cur, item)?;
    cur.expect(")")?;
    Ok(items)
}
