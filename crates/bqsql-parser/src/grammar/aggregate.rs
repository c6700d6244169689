//! Aggregates with modifiers, analytic clauses and `ORDER BY … LIMIT … OFFSET`.
//!
//! Modifiers are optional but their order is fixed:
//! `[DISTINCT] expr [, delimiter] [IGNORE|RESPECT NULLS] [ORDER BY …] [LIMIT …] [OVER (…)]`.

use super::ident::name_segment;
use super::{Consume, comma_separated};
use crate::Result;
use crate::ast::{
    Accessor, Analytic, ArrayAgg, Constant, Direction, Expr, Frame, FrameBound,
    FrameExtent, FrameUnit, NodeList, NullHandling, NullsOrder, OrderItem, OrderLimitOffset,
    StringAgg, StringFunction,
};
use crate::parser::Cursor;
use crate::parser::syntax_kind::SyntaxKind;

/// `IGNORE NULLS` or `RESPECT NULLS`.
pub(crate) fn function_nulls(cur: &mut Cursor<'_>) -> Result<Option<NullHandling>> {
    let nulls = if cur.consume("IGNORE").is_some() {
        NullHandling::Ignore
    } else if cur.consume("RESPECT").is_some() {
        NullHandling::Respect
    } else {
        return Ok(None);
    };
    cur.expect("NULLS")?;
    Ok(Some(nulls))
}

impl Consume for OrderItem {
    const EXPECTED: &'static str = "a sort key";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let Some(expr) = Expr::consume(cur)? else {
            return Ok(None);
        };
        let direction = if cur.consume("ASC").is_some() {
            Some(Direction::Asc)
        } else if cur.consume("DESC").is_some() {
            Some(Direction::Desc)
        } else {
            None
        };
        let nulls = if cur.consume("NULLS").is_some() {
            if cur.consume("FIRST").is_some() {
                Some(NullsOrder::First)
            } else if cur.consume("LAST").is_some() {
                Some(NullsOrder::Last)
            } else {
                return Err(cur.error("`FIRST` or `LAST`"));
            }
        } else {
            None
        };
        Ok(Some(OrderItem {
            expr,
            direction,
            nulls,
        }))
    }
}

/// `ORDER BY key, …` or nothing.
fn order_by(cur: &mut Cursor<'_>) -> Result<NodeList<OrderItem>> {
    if cur.consume("ORDER").is_none() {
        return Ok(NodeList::new());
    }
    cur.expect("BY")?;
    comma_separated(cur, OrderItem::parse)
}

impl Consume for OrderLimitOffset {
    const EXPECTED: &'static str = "`ORDER BY` or `LIMIT`";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let order_by = order_by(cur)?;
        let mut limit = None;
        let mut offset = None;
        if cur.consume("LIMIT").is_some() {
            limit = Some(Expr::parse(cur)?);
            if cur.consume("OFFSET").is_some() {
                offset = Some(Expr::parse(cur)?);
            }
        }
        if order_by.is_empty() && limit.is_none() {
            return Ok(None);
        }
        Ok(Some(OrderLimitOffset {
            order_by,
            limit,
            offset,
        }))
    }
}

impl Consume for Analytic {
    const EXPECTED: &'static str = "`OVER`";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        if cur.consume("OVER").is_none() {
            return Ok(None);
        }
        cur.expect("(")?;
        let partition_by = if cur.consume("PARTITION").is_some() {
            cur.expect("BY")?;
            comma_separated(cur, Expr::parse)?
        } else {
            NodeList::new()
        };
        let order_by = order_by(cur)?;
        let frame = Frame::consume(cur)?;
        cur.expect(")")?;
        Ok(Some(Analytic {
            partition_by,
            order_by,
            frame,
        }))
    }
}

impl Consume for Frame {
    const EXPECTED: &'static str = "`ROWS` or `RANGE`";

    /// Once `ROWS`/`RANGE` is seen the frame is committed: a bad boundary
    /// is an error, not a non-match.
    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let unit = if cur.consume("ROWS").is_some() {
            FrameUnit::Rows
        } else if cur.consume("RANGE").is_some() {
            FrameUnit::Range
        } else {
            return Ok(None);
        };
        let extent = if cur.consume("BETWEEN").is_some() {
            let start = frame_bound(cur)?;
            cur.expect("AND")?;
            let end = frame_bound(cur)?;
            FrameExtent::Between(start, end)
        } else {
            FrameExtent::Single(frame_bound(cur)?)
        };
        Ok(Some(Frame { unit, extent }))
    }
}

fn frame_bound(cur: &mut Cursor<'_>) -> Result<FrameBound> {
    if cur.consume("UNBOUNDED").is_some() {
        return if cur.consume("PRECEDING").is_some() {
            Ok(FrameBound::UnboundedPreceding)
        } else if cur.consume("FOLLOWING").is_some() {
            Ok(FrameBound::UnboundedFollowing)
        } else {
            Err(cur.error("`PRECEDING` or `FOLLOWING`"))
        };
    }
    if cur.consume("CURRENT").is_some() {
        cur.expect("ROW")?;
        return Ok(FrameBound::CurrentRow);
    }
    if cur.peek_kind() != Some(SyntaxKind::Number) {
        return Err(cur.error("a frame boundary"));
    }
    let count = Constant::parse(cur)?;
    if cur.consume("PRECEDING").is_some() {
        Ok(FrameBound::Preceding(count))
    } else if cur.consume("FOLLOWING").is_some() {
        Ok(FrameBound::Following(count))
    } else {
        Err(cur.error("`PRECEDING` or `FOLLOWING`"))
    }
}

impl Consume for ArrayAgg {
    const EXPECTED: &'static str = "`ARRAY_AGG`";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        if cur.consume_seq(&["ARRAY_AGG", "("]).is_none() {
            return Ok(None);
        }
        let distinct = cur.consume("DISTINCT").is_some();
        let expr = Expr::parse(cur)?;
        let nulls = function_nulls(cur)?;
        let order_limit_offset = OrderLimitOffset::consume(cur)?;
        let analytic = Analytic::consume(cur)?;
        cur.expect(")")?;
        let offset = if cur.consume_seq(&["[", "OFFSET"]).is_some() {
            cur.expect("(")?;
            let index = Expr::parse(cur)?;
            cur.expect(")")?;
            cur.expect("]")?;
            Some(index)
        } else {
            None
        };
        Ok(Some(ArrayAgg {
            distinct,
            expr,
            nulls,
            order_limit_offset,
            analytic,
            offset,
        }))
    }
}

impl Consume for StringAgg {
    const EXPECTED: &'static str = "`STRING_AGG` or `SPLIT`";

    fn consume(cur: &mut Cursor<'_>) -> Result<Option<Self>> {
        let function = if cur.consume_seq(&["STRING_AGG", "("]).is_some() {
            StringFunction::StringAgg
        } else if cur.consume_seq(&["SPLIT", "("]).is_some() {
            StringFunction::Split
        } else {
            return Ok(None);
        };
        let distinct = cur.consume("DISTINCT").is_some();
        let expr = Expr::parse(cur)?;
        let delimiter = if cur.consume(",").is_some() {
            Some(Constant::parse(cur)?)
        } else {
            None
        };
        let nulls = function_nulls(cur)?;
        let order_limit_offset = OrderLimitOffset::consume(cur)?;
        let analytic = Analytic::consume(cur)?;
        cur.expect(")")?;
        let accessor = if cur.consume("[").is_some() {
            let accessor = if cur.peek_nth(1, "(") {
                let name = name_segment(cur);
                cur.expect("(")?;
                let index = Expr::parse(cur)?;
                cur.expect(")")?;
                Accessor { name, index }
            } else {
                Accessor {
                    name: None,
                    index: Expr::parse(cur)?,
                }
            };
            cur.expect("]")?;
            Some(accessor)
        } else {
            None
        };
        Ok(Some(StringAgg {
            function,
            distinct,
            expr,
            delimiter,
            nulls,
            order_limit_offset,
            analytic,
            accessor,
        }))
    }
}
