use super::NodeList;
use super::ident::{Constant, Identifier, IdentifierPath};
use super::query::Query;
use super::types::{StructField, Type};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Constant(Constant),
    Path(IdentifierPath),
    /// `*` as a function argument, as in `COUNT(*)`.
    Star,
    Function(FunctionCall),
    ArrayLiteral(ArrayLiteral),
    /// `ARRAY(subquery)`
    ArraySelect(Box<Query>),
    ArrayAgg(Box<ArrayAgg>),
    StringAgg(Box<StringAgg>),
    WithAnalytic {
        expr: Box<Expr>,
        analytic: Box<Analytic>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Paren(Box<Expr>),
    Subquery(Box<Query>),
    Exists(Box<Query>),
    Struct(StructExpr),
    Cast {
        safe: bool,
        expr: Box<Expr>,
        ty: Type,
    },
    Extract {
        part: Box<Expr>,
        expr: Box<Expr>,
        time_zone: Option<Box<Expr>>,
    },
    Case(Box<CaseExpr>),
    Interval {
        value: Box<Expr>,
        unit: Identifier,
    },
    In {
        expr: Box<Expr>,
        negated: bool,
        target: InTarget,
    },
    Between {
        expr: Box<Expr>,
        negated: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    Is {
        expr: Box<Expr>,
        negated: bool,
        value: IsValue,
    },
    /// `expr[OFFSET(i)]` and friends; `kind` is `None` for plain `expr[i]`.
    Index {
        expr: Box<Expr>,
        kind: Option<IndexKind>,
        index: Box<Expr>,
    },
    /// Field access on something other than a bare path: `f(x).y`.
    Field {
        expr: Box<Expr>,
        name: Identifier,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    LtGt,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    BitOr,
    BitXor,
    BitAnd,
    ShiftLeft,
    ShiftRight,
    Plus,
    Minus,
    Multiply,
    Divide,
    Concat,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "OR",
            BinaryOp::And => "AND",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "!=",
            BinaryOp::LtGt => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Concat => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Minus,
    Plus,
    BitNot,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "NOT",
            UnaryOp::Minus => "-",
            UnaryOp::Plus => "+",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Plain call: `name([DISTINCT] args… [IGNORE NULLS])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: IdentifierPath,
    pub distinct: bool,
    pub args: NodeList<Expr>,
    pub nulls: Option<NullHandling>,
}

/// `[a, b]`, `ARRAY[a, b]` or `ARRAY<T>[a, b]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayLiteral {
    pub ty: Option<Type>,
    pub items: NodeList<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullHandling {
    Ignore,
    Respect,
}

impl NullHandling {
    pub fn as_str(self) -> &'static str {
        match self {
            NullHandling::Ignore => "IGNORE NULLS",
            NullHandling::Respect => "RESPECT NULLS",
        }
    }
}

/// `ARRAY_AGG(…)` with its modifiers, in grammar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayAgg {
    pub distinct: bool,
    pub expr: Expr,
    pub nulls: Option<NullHandling>,
    pub order_limit_offset: Option<OrderLimitOffset>,
    pub analytic: Option<Analytic>,
    /// Trailing `[OFFSET(n)]`.
    pub offset: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFunction {
    StringAgg,
    Split,
}

impl StringFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            StringFunction::StringAgg => "STRING_AGG",
            StringFunction::Split => "SPLIT",
        }
    }
}

/// `STRING_AGG(…)` or `SPLIT(…)` with their modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringAgg {
    pub function: StringFunction,
    pub distinct: bool,
    pub expr: Expr,
    pub delimiter: Option<Constant>,
    pub nulls: Option<NullHandling>,
    pub order_limit_offset: Option<OrderLimitOffset>,
    pub analytic: Option<Analytic>,
    pub accessor: Option<Accessor>,
}

/// Trailing `[NAME(n)]` or `[n]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub name: Option<Identifier>,
    pub index: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Offset,
    Ordinal,
    SafeOffset,
    SafeOrdinal,
}

impl IndexKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IndexKind::Offset => "OFFSET",
            IndexKind::Ordinal => "ORDINAL",
            IndexKind::SafeOffset => "SAFE_OFFSET",
            IndexKind::SafeOrdinal => "SAFE_ORDINAL",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        [
            IndexKind::Offset,
            IndexKind::Ordinal,
            IndexKind::SafeOffset,
            IndexKind::SafeOrdinal,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(word))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub expr: Expr,
    pub direction: Option<Direction>,
    pub nulls: Option<NullsOrder>,
}

/// `ORDER BY … LIMIT … OFFSET …`; at least one part is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLimitOffset {
    pub order_by: NodeList<OrderItem>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

/// `OVER (PARTITION BY … ORDER BY … frame)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analytic {
    pub partition_by: NodeList<Expr>,
    pub order_by: NodeList<OrderItem>,
    pub frame: Option<Frame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUnit {
    Rows,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub unit: FrameUnit,
    pub extent: FrameExtent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameExtent {
    Single(FrameBound),
    Between(FrameBound, FrameBound),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameBound {
    UnboundedPreceding,
    UnboundedFollowing,
    CurrentRow,
    Preceding(Constant),
    Following(Constant),
}

/// `STRUCT(a AS x, b)` or `STRUCT<x INT64, y STRING>(a, b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructExpr {
    pub fields: Option<NodeList<StructField>>,
    pub items: NodeList<StructItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructItem {
    pub expr: Expr,
    pub alias: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseExpr {
    pub operand: Option<Expr>,
    pub branches: Vec<WhenClause>,
    pub else_result: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhenClause {
    pub condition: Expr,
    pub result: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InTarget {
    List(NodeList<Expr>),
    Query(Box<Query>),
    Unnest(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsValue {
    Null,
    True,
    False,
}

impl IsValue {
    pub fn as_str(self) -> &'static str {
        match self {
            IsValue::Null => "NULL",
            IsValue::True => "TRUE",
            IsValue::False => "FALSE",
        }
    }
}
