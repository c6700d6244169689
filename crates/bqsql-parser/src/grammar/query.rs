use super::ident::alias;
use super::{Consume, comma_separated, parenthesized};
use crate::Result;
use crate::ast::{
    Cte, Expr, Identifier, IdentifierPath, JoinConstraint, JoinKind, NodeList, OrderLimitOffset,
    Query, ReplaceItem, Select, SelectAs, SelectItem, SetExpr, SetOperator, SetQuantifier,
    TableExpr, With,
};
use crate::parser::Cursor;

impl Consume for Query {
    const EXPECTED: &'static str = "a query";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        if !cur.peek_any(&["SELECT", "WITH", "("]) {
            return Ok(None);
        }
        cur.descend(|cur| {
            cur.attempt(|cur| {
                let with = With::consume(cur)?;
                let body = match SetExpr::consume(cur)? {
                    Some(body) => body,
                    None if with.is_some() => return Err(cur.error(Self::EXPECTED)),
                    None => return Ok(None),
                };
                let order_limit_offset = OrderLimitOffset::consume(cur)?;
                Ok(Some(Query {
                    with,
                    body,
                    order_limit_offset,
                }))
            })
        })
    }
}

impl Consume for With {
    const EXPECTED: &'static str = "`WITH`";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        if cur.consume("WITH").is_none() {
            return Ok(None);
        }
        let recursive = cur.consume("RECURSIVE").is_some();
        let ctes = comma_separated(cur, Cte::parse)?;
        Ok(Some(With { recursive, ctes }))
    }
}

impl Consume for Cte {
    const EXPECTED: &'static str = "a common table expression";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let Some(name) = Identifier::consume(cur)? else {
            return Ok(None);
        };
        cur.expect("AS")?;
        cur.expect("(")?;
        let query = Query::parse(cur)?;
        cur.expect(")")?;
        Ok(Some(Cte { name, query }))
    }
}

impl Consume for SetExpr {
    const EXPECTED: &'static str = "`SELECT` or `(`";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let Some(mut left) = set_operand(cur)? else {
            return Ok(None);
        };
        loop {
            let op = if cur.consume("UNION").is_some() {
                SetOperator::Union
            } else if cur.consume("INTERSECT").is_some() {
                SetOperator::Intersect
            } else if cur.consume("EXCEPT").is_some() {
                SetOperator::Except
            } else {
                return Ok(Some(left));
            };
            let quantifier = if cur.consume("ALL").is_some() {
                Some(SetQuantifier::All)
            } else if cur.consume("DISTINCT").is_some() {
                Some(SetQuantifier::Distinct)
            } else {
                None
            };
            let right = match set_operand(cur)? {
                Some(right) => right,
                None => return Err(cur.error(Self::EXPECTED)),
            };
            left = SetExpr::SetOperation {
                op,
                quantifier,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }
}

fn set_operand(cur: &mut Cursor<'_>) -> Result<Option<SetExpr>> {
    if let Some(select) = Select::consume(cur)? {
        return Ok(Some(SetExpr::Select(Box::new(select))));
    }
    Ok(parenthesized_query(cur)?.map(|query| SetExpr::Paren(Box::new(query))))
}

/// `( query )`. Set operands, subquery expressions and derived tables all
/// start this way, so the outcome is remembered per position.
pub(super) fn parenthesized_query(cur: &mut Cursor<'_>) -> Result<Option<Query>> {
    if !cur.peek("(") {
        return Ok(None);
    }
    cur.memo_subquery(|cur| {
        cur.bump();
        let Some(query) = Query::consume(cur)? else {
            return Ok(None);
        };
        Ok(cur.consume(")").map(|_| query))
    })
}

/// Keywords that end a select list, which BigQuery lets follow a trailing comma.
const SELECT_LIST_END: &[&str] = &[")", ";", "FROM"];

impl Consume for Select {
    const EXPECTED: &'static str = "`SELECT`";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        if cur.consume("SELECT").is_none() {
            return Ok(None);
        }
        let distinct = cur.consume("DISTINCT").is_some();
        let select_as = if cur.consume_seq(&["AS", "STRUCT"]).is_some() {
            Some(SelectAs::Struct)
        } else if cur.consume_seq(&["AS", "VALUE"]).is_some() {
            Some(SelectAs::Value)
        } else {
            None
        };

        let mut items = vec![SelectItem::parse(cur)?];
        while cur.consume(",").is_some() {
            if cur.at_eof() || cur.peek_any(SELECT_LIST_END) {
                break;
            }
            items.push(SelectItem::parse(cur)?);
        }

        let from = if cur.consume("FROM").is_some() {
            Some(TableExpr::parse(cur)?)
        } else {
            None
        };
        let where_clause = clause_expr(cur, &["WHERE"])?;
        let group_by = if cur.consume_seq(&["GROUP", "BY"]).is_some() {
            comma_separated(cur, Expr::parse)?
        } else {
            NodeList::new()
        };
        let having = clause_expr(cur, &["HAVING"])?;
        let qualify = clause_expr(cur, &["QUALIFY"])?;

        Ok(Some(Select {
            distinct,
            select_as,
            items: items.into(),
            from,
            where_clause,
            group_by,
            having,
            qualify,
        }))
    }
}

fn clause_expr(cur: &mut Cursor<'_>, keyword: &[&str]) -> Result<Option<Expr>> {
    if cur.consume_seq(keyword).is_none() {
        return Ok(None);
    }
    Expr::parse(cur).map(Some)
}

impl Consume for SelectItem {
    const EXPECTED: &'static str = "a select item";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        if let Some(wildcard) = cur.attempt(wildcard)? {
            return Ok(Some(wildcard));
        }
        let Some(expr) = Expr::consume(cur)? else {
            return Ok(None);
        };
        let alias = alias(cur)?;
        Ok(Some(SelectItem::Expr { expr, alias }))
    }
}

/// `*` or `path.*`, with optional `EXCEPT (…)` and `REPLACE (…)`.
fn wildcard(cur: &mut Cursor<'_>) -> Result<Option<SelectItem>> {
    let qualifier = if cur.consume("*").is_some() {
        None
    } else {
        let Some(path) = IdentifierPath::consume(cur)? else {
            return Ok(None);
        };
        if cur.consume_seq(&[".", "*"]).is_none() {
            return Ok(None);
        }
        Some(path)
    };
    let except = if cur.peek_seq(&["EXCEPT", "("]) {
        cur.bump();
        parenthesized(cur, Identifier::parse)?
    } else {
        NodeList::new()
    };
    let replace = if cur.peek_seq(&["REPLACE", "("]) {
        cur.bump();
        parenthesized(cur, |cur| {
            let expr = Expr::parse(cur)?;
            cur.expect("AS")?;
            let alias = Identifier::parse(cur)?;
            Ok(ReplaceItem { expr, alias })
        })?
    } else {
        NodeList::new()
    };
    Ok(Some(SelectItem::Wildcard {
        qualifier,
        except,
        replace,
    }))
}

impl Consume for TableExpr {
    const EXPECTED: &'static str = "a table";

    /// Joins associate to the left: `a JOIN b JOIN c` is `(a JOIN b) JOIN c`.
    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let Some(mut left) = table_factor(cur)? else {
            return Ok(None);
        };
        while let Some(kind) = join_kind(cur)? {
            let right = match table_factor(cur)? {
                Some(right) => right,
                None => return Err(cur.error(Self::EXPECTED)),
            };
            let constraint = match kind {
                JoinKind::Comma | JoinKind::Cross => None,
                _ => join_constraint(cur)?,
            };
            left = TableExpr::Join {
                left: Box::new(left),
                kind,
                right: Box::new(right),
                constraint,
            };
        }
        Ok(Some(left))
    }
}

fn join_kind(cur: &mut Cursor<'_>) -> Result<Option<JoinKind>> {
    if cur.consume(",").is_some() {
        return Ok(Some(JoinKind::Comma));
    }
    let kind = if cur.consume("CROSS").is_some() {
        JoinKind::Cross
    } else if cur.consume("INNER").is_some() {
        JoinKind::Inner
    } else if cur.consume("LEFT").is_some() {
        JoinKind::Left
    } else if cur.consume("RIGHT").is_some() {
        JoinKind::Right
    } else if cur.consume("FULL").is_some() {
        JoinKind::Full
    } else if cur.peek("JOIN") {
        JoinKind::Inner
    } else {
        return Ok(None);
    };
    if matches!(kind, JoinKind::Left | JoinKind::Right | JoinKind::Full) {
        cur.consume("OUTER");
    }
    cur.expect("JOIN")?;
    Ok(Some(kind))
}

fn join_constraint(cur: &mut Cursor<'_>) -> Result<Option<JoinConstraint>> {
    if cur.consume("ON").is_some() {
        return Expr::parse(cur).map(|expr| Some(JoinConstraint::On(expr)));
    }
    if cur.consume("USING").is_some() {
        return parenthesized(cur, Identifier::parse).map(|cols| Some(JoinConstraint::Using(cols)));
    }
    Ok(None)
}

fn table_factor(cur: &mut Cursor<'_>) -> Result<Option<TableExpr>> {
    if cur.consume_seq(&["UNNEST", "("]).is_some() {
        let expr = Expr::parse(cur)?;
        cur.expect(")")?;
        let table_alias = alias(cur)?;
        let with_offset = if cur.consume_seq(&["WITH", "OFFSET"]).is_some() {
            Some(alias(cur)?)
        } else {
            None
        };
        return Ok(Some(TableExpr::Unnest {
            expr: Box::new(expr),
            alias: table_alias,
            with_offset,
        }));
    }
    if let Some(query) = parenthesized_query(cur)? {
        let alias = alias(cur)?;
        return Ok(Some(TableExpr::Subquery {
            query: Box::new(query),
            alias,
        }));
    }
    let Some(name) = IdentifierPath::consume(cur)? else {
        return Ok(None);
    };
    let alias = alias(cur)?;
    Ok(Some(TableExpr::Table { name, alias }))
}
