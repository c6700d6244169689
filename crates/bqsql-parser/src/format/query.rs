use bqsql_core::Doc;

use super::expr::list_clause;
use super::{Format, choice, clause, comma_line, docs, enclosed, spaced, text};
use crate::ast::{
    Cte, JoinConstraint, JoinKind, Query, ReplaceItem, Select, SelectAs, SelectItem, SetExpr,
    TableExpr, With,
};

impl Format for Query {
    fn doc(&self, compact: bool) -> Doc {
        let parts = |c: bool| {
            let mut parts = Vec::new();
            parts.extend(self.with.as_ref().map(|with| with.doc(c)));
            parts.push(self.body.doc(c));
            parts.extend(self.order_limit_offset.as_ref().map(|olo| olo.doc(c)));
            parts
        };
        choice(compact, spaced(parts(true)), || Doc::Stack(parts(false)))
    }
}

impl Format for With {
    fn doc(&self, compact: bool) -> Doc {
        let keyword = if self.recursive { "WITH RECURSIVE" } else { "WITH" };
        let line = Doc::line([text(format!("{keyword} ")), comma_line(docs(&self.ctes, true))]);
        choice(compact, line, || {
            let ctes = super::with_commas(docs(&self.ctes, false), "");
            Doc::stack([text(keyword), Doc::indent(Doc::Stack(ctes))])
        })
    }
}

impl Format for Cte {
    fn doc(&self, compact: bool) -> Doc {
        let head = format!("{} AS (", self.name.as_str());
        enclosed(&head, &self.query, text(")"), compact)
    }
}

impl Format for SetExpr {
    fn doc(&self, compact: bool) -> Doc {
        match self {
            SetExpr::Select(select) => select.doc(compact),
            SetExpr::Paren(query) => enclosed("(", query, text(")"), compact),
            SetExpr::SetOperation {
                op,
                quantifier,
                left,
                right,
            } => {
                let operator = match quantifier {
                    Some(quantifier) => format!("{} {}", op.as_str(), quantifier.as_str()),
                    None => op.as_str().to_owned(),
                };
                let line = Doc::line([
                    left.doc(true),
                    text(format!(" {operator} ")),
                    right.doc(true),
                ]);
                choice(compact, line, || {
                    Doc::stack([left.doc(false), text(operator.clone()), right.doc(false)])
                })
            }
        }
    }
}

impl Format for Select {
    fn doc(&self, compact: bool) -> Doc {
        let mut head = "SELECT".to_owned();
        if self.distinct {
            head.push_str(" DISTINCT");
        }
        match self.select_as {
            Some(SelectAs::Struct) => head.push_str(" AS STRUCT"),
            Some(SelectAs::Value) => head.push_str(" AS VALUE"),
            None => {}
        }
        let clauses = |c: bool| {
            let mut parts = vec![list_clause(&head, self.items.as_slice(), c)];
            if let Some(from) = &self.from {
                parts.push(clause("FROM", c, |c| from.doc(c)));
            }
            if let Some(condition) = &self.where_clause {
                parts.push(clause("WHERE", c, |c| condition.doc(c)));
            }
            if !self.group_by.is_empty() {
                parts.push(list_clause("GROUP BY", self.group_by.as_slice(), c));
            }
            if let Some(condition) = &self.having {
                parts.push(clause("HAVING", c, |c| condition.doc(c)));
            }
            if let Some(condition) = &self.qualify {
                parts.push(clause("QUALIFY", c, |c| condition.doc(c)));
            }
            parts
        };
        choice(compact, spaced(clauses(true)), || Doc::Stack(clauses(false)))
    }
}

impl Format for SelectItem {
    fn doc(&self, compact: bool) -> Doc {
        match self {
            SelectItem::Wildcard {
                qualifier,
                except,
                replace,
            } => {
                let mut parts = vec![match qualifier {
                    Some(path) => text(format!("{}.*", path.dotted())),
                    None => text("*"),
                }];
                if !except.is_empty() {
                    parts.push(text(" EXCEPT ("));
                    parts.push(comma_line(docs(except, compact)));
                    parts.push(text(")"));
                }
                if !replace.is_empty() {
                    parts.push(text(" REPLACE ("));
                    parts.push(comma_line(docs(replace, compact)));
                    parts.push(text(")"));
                }
                Doc::Line(parts)
            }
            SelectItem::Expr { expr, alias } => match alias {
                Some(alias) => expr.doc(compact).append(text(format!(" AS {}", alias.as_str()))),
                None => expr.doc(compact),
            },
        }
    }
}

impl Format for ReplaceItem {
    fn doc(&self, compact: bool) -> Doc {
        self.expr
            .doc(compact)
            .append(text(format!(" AS {}", self.alias.as_str())))
    }
}

fn alias_suffix(alias: Option<&crate::ast::Identifier>) -> String {
    alias
        .map(|alias| format!(" AS {}", alias.as_str()))
        .unwrap_or_default()
}

impl Format for TableExpr {
    fn doc(&self, compact: bool) -> Doc {
        match self {
            TableExpr::Table { name, alias } => {
                text(format!("{}{}", name.dotted(), alias_suffix(alias.as_ref())))
            }
            TableExpr::Subquery { query, alias } => {
                let tail = text(format!("){}", alias_suffix(alias.as_ref())));
                enclosed("(", query, tail, compact)
            }
            TableExpr::Unnest {
                expr,
                alias,
                with_offset,
            } => {
                let mut tail = format!("){}", alias_suffix(alias.as_ref()));
                if let Some(offset_alias) = with_offset {
                    tail.push_str(" WITH OFFSET");
                    tail.push_str(&alias_suffix(offset_alias.as_ref()));
                }
                Doc::line([text("UNNEST("), expr.doc(compact), text(tail)])
            }
            TableExpr::Join {
                left,
                kind,
                right,
                constraint,
            } => join(left, *kind, right, constraint.as_ref(), compact),
        }
    }
}

fn join(
    left: &TableExpr,
    kind: JoinKind,
    right: &TableExpr,
    constraint: Option<&JoinConstraint>,
    compact: bool,
) -> Doc {
    let constraint_doc = |c: bool| match constraint {
        Some(JoinConstraint::On(condition)) => Doc::line([text(" ON "), condition.doc(c)]),
        Some(JoinConstraint::Using(columns)) => {
            Doc::line([text(" USING ("), comma_line(docs(columns, c)), text(")")])
        }
        None => Doc::empty(),
    };
    let line = match kind {
        JoinKind::Comma => Doc::line([left.doc(true), text(", "), right.doc(true)]),
        _ => Doc::line([
            left.doc(true),
            text(format!(" {} ", kind.as_str())),
            right.doc(true),
            constraint_doc(true),
        ]),
    };
    choice(compact, line, || match kind {
        JoinKind::Comma => Doc::stack([left.doc(false).append(text(",")), right.doc(false)]),
        _ => Doc::stack([
            left.doc(false),
            Doc::line([
                text(format!("{} ", kind.as_str())),
                right.doc(false),
                constraint_doc(false),
            ]),
        ]),
    })
}
