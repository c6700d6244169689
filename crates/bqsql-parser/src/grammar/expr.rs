//! Expressions.
//!
//! Operators are parsed by precedence climbing, lowest binding first:
//!
//! ```text
//! OR
//! AND
//! NOT
//! = != <> < > <= >=  [NOT] LIKE  [NOT] IN  [NOT] BETWEEN  IS [NOT]
//! |
//! ^
//! &
//! << >>
//! + -
//! * / ||
//! unary - + ~
//! postfix [..] .field
//! primary
//! ```
//!
//! Primaries are resolved by ordered alternation; see [`PRIMARY`].

use super::aggregate::function_nulls;
use super::ident::{alias, name_segment};
use super::query::parenthesized_query;
use super::types::struct_fields;
use super::{Consume, comma_separated, parenthesized};
use crate::Result;
use crate::ast::{
    Analytic, ArrayAgg, ArrayLiteral, BinaryOp, CaseExpr, Constant, Expr, FunctionCall,
    Identifier, IdentifierPath, InTarget, IndexKind, IsValue, NodeList, Query, StringAgg,
    StructExpr, StructItem, Type, UnaryOp, WhenClause,
};
use crate::parser::Cursor;
use crate::parser::keywords::is_callable_keyword;
use crate::parser::syntax_kind::SyntaxKind;

type Rule = fn(&mut Cursor<'_>) -> Result<Option<Expr>>;

/// Primary alternatives in priority order. The first match wins.
const PRIMARY: &[Rule] = &[
    constant,
    array_literal,
    array_agg,
    string_agg,
    array_select,
    custom_function,
    identifier_path,
];

/// Names that turn a following string literal into a one-argument call.
const TYPED_LITERALS: &[&str] = &["DATE", "DATETIME", "TIME", "TIMESTAMP"];

impl Consume for Expr {
    const EXPECTED: &'static str = "an expression";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        cur.descend(parse_or)
    }
}

fn required(cur: &mut Cursor<'_>, rule: Rule) -> Result<Expr> {
    match rule(cur)? {
        Some(expr) => Ok(expr),
        None => Err(cur.error(Expr::EXPECTED)),
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Left-associative level: `next (op next)*`.
fn left_assoc(
    cur: &mut Cursor<'_>,
    next: Rule,
    operator: fn(&mut Cursor<'_>) -> Option<BinaryOp>,
) -> Result<Option<Expr>> {
    let Some(mut left) = next(cur)? else {
        return Ok(None);
    };
    while let Some(op) = operator(cur) {
        let right = required(cur, next)?;
        left = binary(op, left, right);
    }
    Ok(Some(left))
}

fn parse_or(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    left_assoc(cur, parse_and, |cur| cur.consume("OR").map(|_| BinaryOp::Or))
}

fn parse_and(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    left_assoc(cur, parse_not, |cur| cur.consume("AND").map(|_| BinaryOp::And))
}

fn parse_not(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    if cur.consume("NOT").is_none() {
        return parse_comparison(cur);
    }
    let expr = cur.descend(|cur| required(cur, parse_not))?;
    Ok(Some(Expr::Unary {
        op: UnaryOp::Not,
        expr: Box::new(expr),
    }))
}

fn comparison_op(cur: &mut Cursor<'_>) -> Option<BinaryOp> {
    const OPS: &[(&str, BinaryOp)] = &[
        ("=", BinaryOp::Eq),
        ("!=", BinaryOp::NotEq),
        ("<>", BinaryOp::LtGt),
        ("<=", BinaryOp::LtEq),
        (">=", BinaryOp::GtEq),
        ("<", BinaryOp::Lt),
        (">", BinaryOp::Gt),
    ];
    OPS.iter()
        .find_map(|(pattern, op)| cur.consume(pattern).map(|_| *op))
}

fn parse_comparison(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    let Some(mut left) = parse_bitor(cur)? else {
        return Ok(None);
    };
    loop {
        if let Some(op) = comparison_op(cur) {
            let right = required(cur, parse_bitor)?;
            left = binary(op, left, right);
            continue;
        }
        if cur.consume("IS").is_some() {
            let negated = cur.consume("NOT").is_some();
            let value = if cur.consume("NULL").is_some() {
                IsValue::Null
            } else if cur.consume("TRUE").is_some() {
                IsValue::True
            } else if cur.consume("FALSE").is_some() {
                IsValue::False
            } else {
                return Err(cur.error("`NULL`, `TRUE` or `FALSE`"));
            };
            left = Expr::Is {
                expr: Box::new(left),
                negated,
                value,
            };
            continue;
        }
        let negated =
            cur.peek("NOT") && ["LIKE", "IN", "BETWEEN"].iter().any(|kw| cur.peek_nth(1, kw));
        if negated {
            cur.bump();
        }
        if cur.consume("LIKE").is_some() {
            let op = if negated {
                BinaryOp::NotLike
            } else {
                BinaryOp::Like
            };
            let right = required(cur, parse_bitor)?;
            left = binary(op, left, right);
        } else if cur.consume("IN").is_some() {
            let target = in_target(cur)?;
            left = Expr::In {
                expr: Box::new(left),
                negated,
                target,
            };
        } else if cur.consume("BETWEEN").is_some() {
            let low = required(cur, parse_bitor)?;
            cur.expect("AND")?;
            let high = required(cur, parse_bitor)?;
            left = Expr::Between {
                expr: Box::new(left),
                negated,
                low: Box::new(low),
                high: Box::new(high),
            };
        } else {
            return Ok(Some(left));
        }
    }
}

fn in_target(cur: &mut Cursor<'_>) -> Result<InTarget> {
    if cur.consume_seq(&["UNNEST", "("]).is_some() {
        let array = Expr::parse(cur)?;
        cur.expect(")")?;
        return Ok(InTarget::Unnest(Box::new(array)));
    }
    if cur.peek("(") && (cur.peek_nth(1, "SELECT") || cur.peek_nth(1, "WITH")) {
        cur.expect("(")?;
        let query = Query::parse(cur)?;
        cur.expect(")")?;
        return Ok(InTarget::Query(Box::new(query)));
    }
    cur.expect("(")?;
    let items = comma_separated(cur, Expr::parse)?;
    cur.expect(")")?;
    Ok(InTarget::List(items))
}

fn parse_bitor(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    left_assoc(cur, parse_bitxor, |cur| {
        cur.consume("|").map(|_| BinaryOp::BitOr)
    })
}

fn parse_bitxor(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    left_assoc(cur, parse_bitand, |cur| {
        cur.consume("^").map(|_| BinaryOp::BitXor)
    })
}

fn parse_bitand(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    left_assoc(cur, parse_shift, |cur| {
        cur.consume("&").map(|_| BinaryOp::BitAnd)
    })
}

fn parse_shift(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    left_assoc(cur, parse_additive, |cur| {
        if cur.consume("<<").is_some() {
            Some(BinaryOp::ShiftLeft)
        } else {
            cur.consume_joined(&[">", ">"]).map(|_| BinaryOp::ShiftRight)
        }
    })
}

fn parse_additive(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    left_assoc(cur, parse_multiplicative, |cur| {
        if cur.consume("+").is_some() {
            Some(BinaryOp::Plus)
        } else {
            cur.consume("-").map(|_| BinaryOp::Minus)
        }
    })
}

fn parse_multiplicative(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    left_assoc(cur, parse_unary, |cur| {
        if cur.consume("*").is_some() {
            Some(BinaryOp::Multiply)
        } else if cur.consume("/").is_some() {
            Some(BinaryOp::Divide)
        } else {
            cur.consume("||").map(|_| BinaryOp::Concat)
        }
    })
}

fn parse_unary(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    let op = if cur.consume("-").is_some() {
        UnaryOp::Minus
    } else if cur.consume("+").is_some() {
        UnaryOp::Plus
    } else if cur.consume("~").is_some() {
        UnaryOp::BitNot
    } else {
        return parse_postfix(cur);
    };
    let expr = cur.descend(|cur| required(cur, parse_unary))?;
    Ok(Some(Expr::Unary {
        op,
        expr: Box::new(expr),
    }))
}

fn parse_postfix(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    let Some(mut expr) = parse_primary(cur)? else {
        return Ok(None);
    };
    loop {
        if cur.consume("[").is_some() {
            let (kind, index) = subscript(cur)?;
            expr = Expr::Index {
                expr: Box::new(expr),
                kind,
                index: Box::new(index),
            };
            continue;
        }
        let field = cur.attempt(|cur| {
            if cur.consume(".").is_none() {
                return Ok(None);
            }
            Ok(name_segment(cur))
        })?;
        match field {
            Some(name) => {
                expr = Expr::Field {
                    expr: Box::new(expr),
                    name,
                }
            }
            None => return Ok(Some(expr)),
        }
    }
}

/// Body of `[…]` after the opening bracket: `OFFSET(i)`-style or a bare index.
fn subscript(cur: &mut Cursor<'_>) -> Result<(Option<IndexKind>, Expr)> {
    let kind = cur
        .peek_text()
        .filter(|_| cur.peek_kind() == Some(SyntaxKind::Word) && cur.peek_nth(1, "("))
        .and_then(IndexKind::from_keyword);
    let index = match kind {
        Some(_) => {
            cur.bump();
            cur.expect("(")?;
            let index = Expr::parse(cur)?;
            cur.expect(")")?;
            index
        }
        None => Expr::parse(cur)?,
    };
    cur.expect("]")?;
    Ok((kind, index))
}

fn parse_primary(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    let mut found = None;
    for alternative in PRIMARY {
        if let Some(expr) = cur.attempt(*alternative)? {
            found = Some(expr);
            break;
        }
    }
    let Some(expr) = found else {
        return Ok(None);
    };
    let expr = match expr {
        Expr::Path(path) => call_or_path(cur, path)?,
        other => other,
    };
    Ok(Some(match Analytic::consume(cur)? {
        Some(analytic) => Expr::WithAnalytic {
            expr: Box::new(expr),
            analytic: Box::new(analytic),
        },
        None => expr,
    }))
}

/// A path followed by `(` is a call; `DATE '…'` and friends become one too.
fn call_or_path(cur: &mut Cursor<'_>, path: IdentifierPath) -> Result<Expr> {
    if cur.consume("(").is_some() {
        let distinct = cur.consume("DISTINCT").is_some();
        let mut args = NodeList::new();
        let mut nulls = None;
        if distinct || cur.consume(")").is_none() {
            args = comma_separated(cur, function_arg)?;
            nulls = function_nulls(cur)?;
            cur.expect(")")?;
        }
        return Ok(Expr::Function(FunctionCall {
            name: path,
            distinct,
            args,
            nulls,
        }));
    }
    let typed_literal = path.is_single()
        && TYPED_LITERALS
            .iter()
            .any(|name| path.first().as_str().eq_ignore_ascii_case(name))
        && cur.peek_kind() == Some(SyntaxKind::String);
    if typed_literal {
        let literal = Constant::parse(cur)?;
        return Ok(Expr::Function(FunctionCall {
            name: path,
            distinct: false,
            args: vec![Expr::Constant(literal)].into(),
            nulls: None,
        }));
    }
    Ok(Expr::Path(path))
}

fn function_arg(cur: &mut Cursor<'_>) -> Result<Expr> {
    if cur.consume("*").is_some() {
        return Ok(Expr::Star);
    }
    Expr::parse(cur)
}

fn constant(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    Ok(Constant::consume(cur)?.map(Expr::Constant))
}

fn array_literal(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    let ty = if cur.consume_seq(&["ARRAY", "<"]).is_some() {
        let ty = Type::parse(cur)?;
        cur.expect(">")?;
        cur.expect("[")?;
        Some(ty)
    } else if cur.consume_seq(&["ARRAY", "["]).is_some() || cur.consume("[").is_some() {
        None
    } else {
        return Ok(None);
    };
    let items = if cur.consume("]").is_some() {
        NodeList::new()
    } else {
        let items = comma_separated(cur, Expr::parse)?;
        cur.expect("]")?;
        items
    };
    Ok(Some(Expr::ArrayLiteral(ArrayLiteral { ty, items })))
}

fn array_agg(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    Ok(ArrayAgg::consume(cur)?.map(|agg| Expr::ArrayAgg(Box::new(agg))))
}

fn string_agg(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    Ok(StringAgg::consume(cur)?.map(|agg| Expr::StringAgg(Box::new(agg))))
}

fn array_select(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    if cur.consume_seq(&["ARRAY", "("]).is_none() {
        return Ok(None);
    }
    let query = Query::parse(cur)?;
    cur.expect(")")?;
    Ok(Some(Expr::ArraySelect(Box::new(query))))
}

/// Built-ins with their own syntax, plus parentheses.
fn custom_function(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    if cur.peek("(") {
        return parenthesized_expr(cur).map(Some);
    }
    if cur.peek_kind() != Some(SyntaxKind::Word) {
        return Ok(None);
    }
    let word = cur.peek_text().unwrap_or_default().to_ascii_uppercase();
    let call = cur.peek_nth(1, "(");
    match word.as_str() {
        "CAST" | "SAFE_CAST" if call => cast(cur).map(Some),
        "EXTRACT" if call => extract(cur).map(Some),
        "EXISTS" if call => {
            cur.bump();
            cur.expect("(")?;
            let query = Query::parse(cur)?;
            cur.expect(")")?;
            Ok(Some(Expr::Exists(Box::new(query))))
        }
        "CASE" => case(cur).map(Some),
        "STRUCT" => struct_expr(cur).map(Some),
        "INTERVAL" => {
            cur.bump();
            let value = required(cur, parse_unary)?;
            let unit = Identifier::parse(cur)?;
            Ok(Some(Expr::Interval {
                value: Box::new(value),
                unit,
            }))
        }
        _ => Ok(None),
    }
}

/// `(query)` when a whole query fits between the parentheses, else `(expr)`.
fn parenthesized_expr(cur: &mut Cursor<'_>) -> Result<Expr> {
    if let Some(query) = parenthesized_query(cur)? {
        return Ok(Expr::Subquery(Box::new(query)));
    }
    cur.expect("(")?;
    let inner = Expr::parse(cur)?;
    cur.expect(")")?;
    Ok(Expr::Paren(Box::new(inner)))
}

fn cast(cur: &mut Cursor<'_>) -> Result<Expr> {
    let safe = cur.consume("SAFE_CAST").is_some();
    if !safe {
        cur.expect("CAST")?;
    }
    cur.expect("(")?;
    let expr = Expr::parse(cur)?;
    cur.expect("AS")?;
    let ty = Type::parse(cur)?;
    cur.expect(")")?;
    Ok(Expr::Cast {
        safe,
        expr: Box::new(expr),
        ty,
    })
}

fn extract(cur: &mut Cursor<'_>) -> Result<Expr> {
    cur.expect("EXTRACT")?;
    cur.expect("(")?;
    let part = Expr::parse(cur)?;
    cur.expect("FROM")?;
    let expr = Expr::parse(cur)?;
    let time_zone = if cur.consume_seq(&["AT", "TIME", "ZONE"]).is_some() {
        Some(Box::new(Expr::parse(cur)?))
    } else {
        None
    };
    cur.expect(")")?;
    Ok(Expr::Extract {
        part: Box::new(part),
        expr: Box::new(expr),
        time_zone,
    })
}

fn case(cur: &mut Cursor<'_>) -> Result<Expr> {
    cur.expect("CASE")?;
    let operand = if cur.peek("WHEN") {
        None
    } else {
        Some(Expr::parse(cur)?)
    };
    let mut branches = Vec::new();
    while cur.consume("WHEN").is_some() {
        let condition = Expr::parse(cur)?;
        cur.expect("THEN")?;
        let result = Expr::parse(cur)?;
        branches.push(WhenClause { condition, result });
    }
    if branches.is_empty() {
        return Err(cur.error("`WHEN`"));
    }
    let else_result = if cur.consume("ELSE").is_some() {
        Some(Expr::parse(cur)?)
    } else {
        None
    };
    cur.expect("END")?;
    Ok(Expr::Case(Box::new(CaseExpr {
        operand,
        branches,
        else_result,
    })))
}

fn struct_expr(cur: &mut Cursor<'_>) -> Result<Expr> {
    cur.expect("STRUCT")?;
    let fields = if cur.consume("<>").is_some() {
        Some(NodeList::new())
    } else if cur.consume("<").is_some() {
        Some(struct_fields(cur)?)
    } else {
        None
    };
    let items = parenthesized(cur, |cur| {
        let expr = Expr::parse(cur)?;
        let alias = alias(cur)?;
        Ok(StructItem { expr, alias })
    })?;
    Ok(Expr::Struct(StructExpr { fields, items }))
}

fn identifier_path(cur: &mut Cursor<'_>) -> Result<Option<Expr>> {
    let callable = cur.peek_kind() == Some(SyntaxKind::Word)
        && cur.peek_text().is_some_and(is_callable_keyword)
        && cur.peek_nth(1, "(");
    if callable {
        return Ok(cur
            .bump()
            .map(|name| Expr::Path(IdentifierPath::new(Identifier::new(name), []))));
    }
    Ok(IdentifierPath::consume(cur)?.map(Expr::Path))
}
