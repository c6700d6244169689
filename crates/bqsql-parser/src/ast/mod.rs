//! Typed syntax tree for BigQuery Standard SQL.
//!
//! Nodes own their children outright and never change after parsing. No
//! spans are stored, so two trees compare equal exactly when they describe
//! the same SQL, however it was laid out.

mod expr;
mod ident;
mod query;
mod statement;
mod types;

pub use expr::{
    Accessor, Analytic, ArrayAgg, ArrayLiteral, BinaryOp, CaseExpr, Direction, Expr, Frame,
    FrameBound, FrameExtent, FrameUnit, FunctionCall, InTarget, IndexKind, IsValue, NullHandling,
    NullsOrder, OrderItem, OrderLimitOffset, StringAgg, StringFunction, StructExpr, StructItem,
    UnaryOp, WhenClause,
};
pub use ident::{Constant, ConstantKind, Identifier, IdentifierPath};
pub use query::{
    Cte, JoinConstraint, JoinKind, Query, ReplaceItem, Select, SelectAs, SelectItem, SetExpr,
    SetOperator, SetQuantifier, TableExpr, With,
};
pub use statement::{
    CreateTable, CreateView, FunctionBody, FunctionDef, Insert, InsertSource, OptionItem,
    QueryStatement, Script, Statement, TempKeyword,
};
pub use types::{NamedType, StructField, Type};

/// Insertion-ordered list of nodes, used for every comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeList<T>(Vec<T>);

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> NodeList<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn push(&mut self, node: T) {
        self.0.push(node);
    }
}

impl<T> From<Vec<T>> for NodeList<T> {
    fn from(nodes: Vec<T>) -> Self {
        Self(nodes)
    }
}

impl<T> FromIterator<T> for NodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> std::ops::Index<usize> for NodeList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}
