use bqsql_core::Doc;

use super::types::{struct_fields_sql, type_sql};
use super::{Format, call, choice, clause, comma_line, comma_stack, docs, enclosed, spaced, text};
use crate::ast::{
    Accessor, Analytic, ArrayAgg, ArrayLiteral, BinaryOp, CaseExpr, Direction, Expr, Frame,
    FrameBound, FrameExtent, FrameUnit, FunctionCall, InTarget, NullHandling, NullsOrder,
    OrderItem, OrderLimitOffset, StringAgg, StructExpr, StructItem, UnaryOp,
};

impl Format for Expr {
    fn doc(&self, compact: bool) -> Doc {
        match self {
            Expr::Constant(constant) => constant.doc(compact),
            Expr::Path(path) => path.doc(compact),
            Expr::Star => text("*"),
            Expr::Function(call) => call.doc(compact),
            Expr::ArrayLiteral(array) => array.doc(compact),
            Expr::ArraySelect(query) => enclosed("ARRAY(", query, text(")"), compact),
            Expr::ArrayAgg(agg) => agg.doc(compact),
            Expr::StringAgg(agg) => agg.doc(compact),
            Expr::WithAnalytic { expr, analytic } => {
                let line = Doc::line([expr.doc(true), text(" "), analytic.doc(true)]);
                choice(compact, line, || {
                    Doc::stack([expr.doc(false), analytic.doc(false)])
                })
            }
            Expr::Binary { op, left, right } => binary(*op, left, right, compact),
            Expr::Unary { op, expr } => unary(*op, expr, compact),
            Expr::Paren(inner) => {
                let line = Doc::line([text("("), inner.doc(true), text(")")]);
                choice(compact, line, || {
                    Doc::stack([text("("), Doc::indent(inner.doc(false)), text(")")])
                })
            }
            Expr::Subquery(query) => enclosed("(", query, text(")"), compact),
            Expr::Exists(query) => enclosed("EXISTS(", query, text(")"), compact),
            Expr::Struct(expr) => expr.doc(compact),
            Expr::Cast { safe, expr, ty } => {
                let head = if *safe { "SAFE_CAST(" } else { "CAST(" };
                call(head, ")", compact, |c| {
                    vec![Doc::line([expr.doc(c), text(format!(" AS {}", type_sql(ty)))])]
                })
            }
            Expr::Extract {
                part,
                expr,
                time_zone,
            } => call("EXTRACT(", ")", compact, |c| {
                let mut parts = vec![part.doc(c), text(" FROM "), expr.doc(c)];
                if let Some(tz) = time_zone {
                    parts.push(text(" AT TIME ZONE "));
                    parts.push(tz.doc(c));
                }
                vec![Doc::Line(parts)]
            }),
            Expr::Case(case) => case.doc(compact),
            Expr::Interval { value, unit } => Doc::line([
                text("INTERVAL "),
                value.doc(compact),
                text(format!(" {}", unit.as_str())),
            ]),
            Expr::In {
                expr,
                negated,
                target,
            } => {
                let keyword = if *negated { " NOT IN " } else { " IN " };
                Doc::line([expr.doc(compact), text(keyword), in_target(target, compact)])
            }
            Expr::Between {
                expr,
                negated,
                low,
                high,
            } => {
                let keyword = if *negated { " NOT BETWEEN " } else { " BETWEEN " };
                Doc::line([
                    expr.doc(compact),
                    text(keyword),
                    low.doc(compact),
                    text(" AND "),
                    high.doc(compact),
                ])
            }
            Expr::Is {
                expr,
                negated,
                value,
            } => {
                let keyword = if *negated { " IS NOT " } else { " IS " };
                Doc::line([expr.doc(compact), text(keyword), text(value.as_str())])
            }
            Expr::Index { expr, kind, index } => {
                let mut parts = vec![expr.doc(compact), text("[")];
                match kind {
                    Some(kind) => {
                        parts.push(text(format!("{}(", kind.as_str())));
                        parts.push(index.doc(compact));
                        parts.push(text(")]"));
                    }
                    None => {
                        parts.push(index.doc(compact));
                        parts.push(text("]"));
                    }
                }
                Doc::Line(parts)
            }
            Expr::Field { expr, name } => {
                Doc::line([expr.doc(compact), text(format!(".{}", name.as_str()))])
            }
        }
    }
}

/// Operands of a left-deep chain of `op`, leftmost first.
fn chain<'a>(op: BinaryOp, mut expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    let mut rights = Vec::new();
    while let Expr::Binary {
        op: inner,
        left,
        right,
    } = expr
        && *inner == op
    {
        rights.push(&**right);
        expr = left;
    }
    out.push(expr);
    out.extend(rights.into_iter().rev());
}

fn binary(op: BinaryOp, left: &Expr, right: &Expr, compact: bool) -> Doc {
    let line = Doc::line([
        left.doc(true),
        text(format!(" {} ", op.as_str())),
        right.doc(true),
    ]);
    choice(compact, line, || {
        let mut operands = Vec::new();
        chain(op, left, &mut operands);
        operands.push(right);
        let mut parts = Vec::with_capacity(operands.len());
        for (i, operand) in operands.into_iter().enumerate() {
            if i == 0 {
                parts.push(operand.doc(false));
            } else {
                parts.push(Doc::line([text(format!("{} ", op.as_str())), operand.doc(false)]));
            }
        }
        Doc::Stack(parts)
    })
}

fn unary(op: UnaryOp, expr: &Expr, compact: bool) -> Doc {
    let head = match op {
        UnaryOp::Not => "NOT ".to_owned(),
        // `- -x` must not collapse into a `--` comment.
        _ if matches!(expr, Expr::Unary { op: inner, .. } if *inner != UnaryOp::Not) => {
            format!("{} ", op.as_str())
        }
        _ => op.as_str().to_owned(),
    };
    Doc::line([text(head), expr.doc(compact)])
}

fn in_target(target: &InTarget, compact: bool) -> Doc {
    match target {
        InTarget::List(items) => call("(", ")", compact, |c| docs(items, c)),
        InTarget::Query(query) => enclosed("(", query, text(")"), compact),
        InTarget::Unnest(expr) => call("UNNEST(", ")", compact, |c| vec![expr.doc(c)]),
    }
}

impl Format for FunctionCall {
    fn doc(&self, compact: bool) -> Doc {
        let head = format!("{}(", self.name.dotted());
        call(&head, ")", compact, |c| {
            let mut args = docs(&self.args, c);
            if self.distinct
                && let Some(first) = args.first_mut()
            {
                *first = Doc::line([text("DISTINCT "), std::mem::replace(first, Doc::empty())]);
            }
            if let Some(nulls) = self.nulls
                && let Some(last) = args.pop()
            {
                args.push(last.append(text(format!(" {}", nulls.as_str()))));
            }
            args
        })
    }
}

impl Format for ArrayLiteral {
    fn doc(&self, compact: bool) -> Doc {
        let head = match &self.ty {
            Some(ty) => format!("ARRAY<{}>[", type_sql(ty)),
            None => "[".to_owned(),
        };
        call(&head, "]", compact, |c| docs(&self.items, c))
    }
}

fn nulls_doc(nulls: Option<NullHandling>) -> Option<Doc> {
    nulls.map(|n| text(n.as_str()))
}

/// Body of `ARRAY_AGG(...)` and friends: each modifier after the argument.
fn aggregate(
    head: &str,
    first: impl Fn(bool) -> Doc,
    nulls: Option<NullHandling>,
    order_limit_offset: Option<&OrderLimitOffset>,
    analytic: Option<&Analytic>,
    compact: bool,
) -> Doc {
    let modifiers = |c: bool| {
        let mut parts = vec![first(c)];
        parts.extend(nulls_doc(nulls));
        parts.extend(order_limit_offset.map(|olo| olo.doc(c)));
        parts.extend(analytic.map(|a| a.doc(c)));
        parts
    };
    let line = Doc::line([text(head), spaced(modifiers(true)), text(")")]);
    choice(compact, line, || {
        Doc::stack([text(head), Doc::indent(Doc::Stack(modifiers(false))), text(")")])
    })
}

fn distinct_prefix(distinct: bool, doc: Doc) -> Doc {
    if distinct {
        Doc::line([text("DISTINCT "), doc])
    } else {
        doc
    }
}

impl Format for ArrayAgg {
    fn doc(&self, compact: bool) -> Doc {
        let body = aggregate(
            "ARRAY_AGG(",
            |c| distinct_prefix(self.distinct, self.expr.doc(c)),
            self.nulls,
            self.order_limit_offset.as_ref(),
            self.analytic.as_ref(),
            compact,
        );
        match &self.offset {
            Some(offset) => Doc::line([
                body,
                text("[OFFSET("),
                offset.doc(compact),
                text(")]"),
            ]),
            None => body,
        }
    }
}

impl Format for StringAgg {
    fn doc(&self, compact: bool) -> Doc {
        let body = aggregate(
            &format!("{}(", self.function.as_str()),
            |c| {
                let expr = distinct_prefix(self.distinct, self.expr.doc(c));
                match &self.delimiter {
                    Some(delimiter) => Doc::line([expr, text(format!(", {}", delimiter.text))]),
                    None => expr,
                }
            },
            self.nulls,
            self.order_limit_offset.as_ref(),
            self.analytic.as_ref(),
            compact,
        );
        match &self.accessor {
            Some(accessor) => Doc::line([body, accessor_doc(accessor, compact)]),
            None => body,
        }
    }
}

fn accessor_doc(accessor: &Accessor, compact: bool) -> Doc {
    match &accessor.name {
        Some(name) => Doc::line([
            text(format!("[{}(", name.as_str())),
            accessor.index.doc(compact),
            text(")]"),
        ]),
        None => Doc::line([text("["), accessor.index.doc(compact), text("]")]),
    }
}

impl Format for OrderItem {
    fn doc(&self, compact: bool) -> Doc {
        let mut doc = self.expr.doc(compact);
        match self.direction {
            Some(Direction::Asc) => doc = doc.append(text(" ASC")),
            Some(Direction::Desc) => doc = doc.append(text(" DESC")),
            None => {}
        }
        match self.nulls {
            Some(NullsOrder::First) => doc = doc.append(text(" NULLS FIRST")),
            Some(NullsOrder::Last) => doc = doc.append(text(" NULLS LAST")),
            None => {}
        }
        doc
    }
}

/// `ORDER BY`, `PARTITION BY` and similar clauses over a list.
pub(crate) fn list_clause<T: Format>(keyword: &str, items: &[T], compact: bool) -> Doc {
    clause(keyword, compact, |c| {
        if c {
            comma_line(docs(items, true))
        } else {
            comma_stack(docs(items, false))
        }
    })
}

impl Format for OrderLimitOffset {
    fn doc(&self, compact: bool) -> Doc {
        let parts = |c: bool| {
            let mut parts = Vec::new();
            if !self.order_by.is_empty() {
                parts.push(list_clause("ORDER BY", self.order_by.as_slice(), c));
            }
            if let Some(limit) = &self.limit {
                parts.push(Doc::line([text("LIMIT "), limit.doc(c)]));
            }
            if let Some(offset) = &self.offset {
                parts.push(Doc::line([text("OFFSET "), offset.doc(c)]));
            }
            parts
        };
        choice(compact, spaced(parts(true)), || Doc::Stack(parts(false)))
    }
}

impl Format for Analytic {
    fn doc(&self, compact: bool) -> Doc {
        let clauses = |c: bool| {
            let mut parts = Vec::new();
            if !self.partition_by.is_empty() {
                parts.push(list_clause("PARTITION BY", self.partition_by.as_slice(), c));
            }
            if !self.order_by.is_empty() {
                parts.push(list_clause("ORDER BY", self.order_by.as_slice(), c));
            }
            if let Some(frame) = &self.frame {
                parts.push(text(frame_sql(frame)));
            }
            parts
        };
        let line = Doc::line([text("OVER ("), spaced(clauses(true)), text(")")]);
        if clauses(true).is_empty() {
            return line;
        }
        choice(compact, line, || {
            Doc::stack([text("OVER ("), Doc::indent(Doc::Stack(clauses(false))), text(")")])
        })
    }
}

fn frame_sql(frame: &Frame) -> String {
    let unit = match frame.unit {
        FrameUnit::Rows => "ROWS",
        FrameUnit::Range => "RANGE",
    };
    match &frame.extent {
        FrameExtent::Single(bound) => format!("{unit} {}", bound_sql(bound)),
        FrameExtent::Between(start, end) => {
            format!("{unit} BETWEEN {} AND {}", bound_sql(start), bound_sql(end))
        }
    }
}

fn bound_sql(bound: &FrameBound) -> String {
    match bound {
        FrameBound::UnboundedPreceding => "UNBOUNDED PRECEDING".to_owned(),
        FrameBound::UnboundedFollowing => "UNBOUNDED FOLLOWING".to_owned(),
        FrameBound::CurrentRow => "CURRENT ROW".to_owned(),
        FrameBound::Preceding(n) => format!("{} PRECEDING", n.text),
        FrameBound::Following(n) => format!("{} FOLLOWING", n.text),
    }
}

impl Format for StructItem {
    fn doc(&self, compact: bool) -> Doc {
        match &self.alias {
            Some(alias) => self.expr.doc(compact).append(text(format!(" AS {}", alias.as_str()))),
            None => self.expr.doc(compact),
        }
    }
}

impl Format for StructExpr {
    fn doc(&self, compact: bool) -> Doc {
        let head = match &self.fields {
            Some(fields) => format!("STRUCT<{}>(", struct_fields_sql(fields.as_slice())),
            None => "STRUCT(".to_owned(),
        };
        call(&head, ")", compact, |c| docs(&self.items, c))
    }
}

impl Format for CaseExpr {
    fn doc(&self, compact: bool) -> Doc {
        let head = |c: bool| match &self.operand {
            Some(operand) => Doc::line([text("CASE "), operand.doc(c)]),
            None => text("CASE"),
        };
        let arms = |c: bool| {
            let mut arms: Vec<Doc> = self
                .branches
                .iter()
                .map(|branch| {
                    Doc::line([
                        text("WHEN "),
                        branch.condition.doc(c),
                        text(" THEN "),
                        branch.result.doc(c),
                    ])
                })
                .collect();
            if let Some(otherwise) = &self.else_result {
                arms.push(Doc::line([text("ELSE "), otherwise.doc(c)]));
            }
            arms
        };
        let mut line = vec![head(true)];
        line.extend(arms(true));
        line.push(text("END"));
        choice(compact, spaced(line), || {
            Doc::stack([head(false), Doc::indent(Doc::Stack(arms(false))), text("END")])
        })
    }
}
