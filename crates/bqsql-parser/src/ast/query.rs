use super::NodeList;
use super::expr::{Expr, OrderLimitOffset};
use super::ident::{Identifier, IdentifierPath};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub with: Option<With>,
    pub body: SetExpr,
    pub order_limit_offset: Option<OrderLimitOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct With {
    pub recursive: bool,
    pub ctes: NodeList<Cte>,
}

/// `name AS (query)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cte {
    pub name: Identifier,
    pub query: Query,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetExpr {
    Select(Box<Select>),
    /// Parenthesized query used as a set operand.
    Paren(Box<Query>),
    SetOperation {
        op: SetOperator,
        quantifier: Option<SetQuantifier>,
        left: Box<SetExpr>,
        right: Box<SetExpr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl SetOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::Intersect => "INTERSECT",
            SetOperator::Except => "EXCEPT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    All,
    Distinct,
}

impl SetQuantifier {
    pub fn as_str(self) -> &'static str {
        match self {
            SetQuantifier::All => "ALL",
            SetQuantifier::Distinct => "DISTINCT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAs {
    Struct,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub distinct: bool,
    pub select_as: Option<SelectAs>,
    pub items: NodeList<SelectItem>,
    pub from: Option<TableExpr>,
    pub where_clause: Option<Expr>,
    pub group_by: NodeList<Expr>,
    pub having: Option<Expr>,
    pub qualify: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    /// `*`, `t.*`, optionally with `EXCEPT (…)` and `REPLACE (…)`.
    Wildcard {
        qualifier: Option<IdentifierPath>,
        except: NodeList<Identifier>,
        replace: NodeList<ReplaceItem>,
    },
    Expr {
        expr: Expr,
        alias: Option<Identifier>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceItem {
    pub expr: Expr,
    pub alias: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableExpr {
    Table {
        name: IdentifierPath,
        alias: Option<Identifier>,
    },
    Subquery {
        query: Box<Query>,
        alias: Option<Identifier>,
    },
    Unnest {
        expr: Box<Expr>,
        alias: Option<Identifier>,
        /// `WITH OFFSET [AS alias]`; the inner option is the offset alias.
        with_offset: Option<Option<Identifier>>,
    },
    Join {
        left: Box<TableExpr>,
        kind: JoinKind,
        right: Box<TableExpr>,
        constraint: Option<JoinConstraint>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `a, b`
    Comma,
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinKind::Comma => ",",
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinConstraint {
    On(Expr),
    Using(NodeList<Identifier>),
}
