//! AST Visitor pattern.
//!
//! # Usage
//!
//! Implement `Visitor` for your struct. Override `visit_*` methods to add logic.
//! Call `walk_*` within your override to continue recursion (or omit it to stop).
//!
//! ```
//! use bqsql_parser::ast::Expr;
//! use bqsql_parser::visitor::{Visitor, walk_expr};
//!
//! #[derive(Default)]
//! struct CountCalls(usize);
//!
//! impl Visitor for CountCalls {
//!     fn visit_expr(&mut self, expr: &Expr) {
//!         if matches!(expr, Expr::Function(_)) {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//!
//! let script = bqsql_parser::parse("SELECT f(g(x)) FROM t").unwrap();
//! let mut counter = CountCalls::default();
//! counter.visit_script(&script);
//! assert_eq!(counter.0, 2);
//! ```

use crate::ast::{
    Analytic, CaseExpr, Cte, Expr, FunctionBody, FunctionDef, InTarget, InsertSource,
    OrderLimitOffset, Query, Script, Select, SelectItem, SetExpr, Statement, TableExpr,
};

pub trait Visitor: Sized {
    fn visit_script(&mut self, script: &Script) {
        walk_script(self, script);
    }

    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    fn visit_function_def(&mut self, def: &FunctionDef) {
        walk_function_def(self, def);
    }

    fn visit_query(&mut self, query: &Query) {
        walk_query(self, query);
    }

    fn visit_cte(&mut self, cte: &Cte) {
        walk_cte(self, cte);
    }

    fn visit_set_expr(&mut self, set: &SetExpr) {
        walk_set_expr(self, set);
    }

    fn visit_select(&mut self, select: &Select) {
        walk_select(self, select);
    }

    fn visit_select_item(&mut self, item: &SelectItem) {
        walk_select_item(self, item);
    }

    fn visit_table_expr(&mut self, table: &TableExpr) {
        walk_table_expr(self, table);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_script<V: Visitor>(visitor: &mut V, script: &Script) {
    for statement in &script.statements {
        visitor.visit_statement(statement);
    }
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, statement: &Statement) {
    match statement {
        Statement::Query(stmt) => visitor.visit_query(&stmt.query),
        Statement::CreateFunction(def) => visitor.visit_function_def(def),
        Statement::CreateTable(stmt) => {
            for option in &stmt.options {
                visitor.visit_expr(&option.value);
            }
            if let Some(query) = &stmt.query {
                visitor.visit_query(query);
            }
        }
        Statement::CreateView(stmt) => {
            for option in &stmt.options {
                visitor.visit_expr(&option.value);
            }
            visitor.visit_query(&stmt.query);
        }
        Statement::Insert(stmt) => match &stmt.source {
            InsertSource::Query(query) => visitor.visit_query(query),
            InsertSource::Values(rows) => {
                for row in rows {
                    for expr in row {
                        visitor.visit_expr(expr);
                    }
                }
            }
        },
    }
}

pub fn walk_function_def<V: Visitor>(visitor: &mut V, def: &FunctionDef) {
    match &def.body {
        FunctionBody::Sql(expr) => visitor.visit_expr(expr),
        FunctionBody::Foreign { options, .. } => {
            for option in options {
                visitor.visit_expr(&option.value);
            }
        }
    }
}

pub fn walk_query<V: Visitor>(visitor: &mut V, query: &Query) {
    if let Some(with) = &query.with {
        for cte in &with.ctes {
            visitor.visit_cte(cte);
        }
    }
    visitor.visit_set_expr(&query.body);
    if let Some(olo) = &query.order_limit_offset {
        walk_order_limit_offset(visitor, olo);
    }
}

pub fn walk_cte<V: Visitor>(visitor: &mut V, cte: &Cte) {
    visitor.visit_query(&cte.query);
}

pub fn walk_set_expr<V: Visitor>(visitor: &mut V, set: &SetExpr) {
    match set {
        SetExpr::Select(select) => visitor.visit_select(select),
        SetExpr::Paren(query) => visitor.visit_query(query),
        SetExpr::SetOperation { left, right, .. } => {
            visitor.visit_set_expr(left);
            visitor.visit_set_expr(right);
        }
    }
}

pub fn walk_select<V: Visitor>(visitor: &mut V, select: &Select) {
    for item in &select.items {
        visitor.visit_select_item(item);
    }
    if let Some(from) = &select.from {
        visitor.visit_table_expr(from);
    }
    let clauses = [&select.where_clause, &select.having, &select.qualify];
    for expr in clauses.into_iter().flatten() {
        visitor.visit_expr(expr);
    }
    for expr in &select.group_by {
        visitor.visit_expr(expr);
    }
}

pub fn walk_select_item<V: Visitor>(visitor: &mut V, item: &SelectItem) {
    match item {
        SelectItem::Wildcard { replace, .. } => {
            for item in replace {
                visitor.visit_expr(&item.expr);
            }
        }
        SelectItem::Expr { expr, .. } => visitor.visit_expr(expr),
    }
}

pub fn walk_table_expr<V: Visitor>(visitor: &mut V, table: &TableExpr) {
    match table {
        TableExpr::Table { .. } => {}
        TableExpr::Subquery { query, .. } => visitor.visit_query(query),
        TableExpr::Unnest { expr, .. } => visitor.visit_expr(expr),
        TableExpr::Join {
            left,
            right,
            constraint,
            ..
        } => {
            visitor.visit_table_expr(left);
            visitor.visit_table_expr(right);
            if let Some(crate::ast::JoinConstraint::On(condition)) = constraint {
                visitor.visit_expr(condition);
            }
        }
    }
}

pub fn walk_order_limit_offset<V: Visitor>(visitor: &mut V, olo: &OrderLimitOffset) {
    for item in &olo.order_by {
        visitor.visit_expr(&item.expr);
    }
    for expr in [&olo.limit, &olo.offset].into_iter().flatten() {
        visitor.visit_expr(expr);
    }
}

fn walk_analytic<V: Visitor>(visitor: &mut V, analytic: &Analytic) {
    for expr in &analytic.partition_by {
        visitor.visit_expr(expr);
    }
    for item in &analytic.order_by {
        visitor.visit_expr(&item.expr);
    }
}

fn walk_case<V: Visitor>(visitor: &mut V, case: &CaseExpr) {
    if let Some(operand) = &case.operand {
        visitor.visit_expr(operand);
    }
    for branch in &case.branches {
        visitor.visit_expr(&branch.condition);
        visitor.visit_expr(&branch.result);
    }
    if let Some(otherwise) = &case.else_result {
        visitor.visit_expr(otherwise);
    }
}

pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Constant(_) | Expr::Path(_) | Expr::Star => {}
        Expr::Function(call) => {
            for arg in &call.args {
                visitor.visit_expr(arg);
            }
        }
        Expr::ArrayLiteral(array) => {
            for item in &array.items {
                visitor.visit_expr(item);
            }
        }
        Expr::ArraySelect(query) | Expr::Subquery(query) | Expr::Exists(query) => {
            visitor.visit_query(query)
        }
        Expr::ArrayAgg(agg) => {
            visitor.visit_expr(&agg.expr);
            if let Some(olo) = &agg.order_limit_offset {
                walk_order_limit_offset(visitor, olo);
            }
            if let Some(analytic) = &agg.analytic {
                walk_analytic(visitor, analytic);
            }
            if let Some(offset) = &agg.offset {
                visitor.visit_expr(offset);
            }
        }
        Expr::StringAgg(agg) => {
            visitor.visit_expr(&agg.expr);
            if let Some(olo) = &agg.order_limit_offset {
                walk_order_limit_offset(visitor, olo);
            }
            if let Some(analytic) = &agg.analytic {
                walk_analytic(visitor, analytic);
            }
            if let Some(accessor) = &agg.accessor {
                visitor.visit_expr(&accessor.index);
            }
        }
        Expr::WithAnalytic { expr, analytic } => {
            visitor.visit_expr(expr);
            walk_analytic(visitor, analytic);
        }
        Expr::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Unary { expr, .. }
        | Expr::Paren(expr)
        | Expr::Cast { expr, .. }
        | Expr::Is { expr, .. }
        | Expr::Field { expr, .. } => visitor.visit_expr(expr),
        Expr::Interval { value, .. } => visitor.visit_expr(value),
        Expr::Struct(st) => {
            for item in &st.items {
                visitor.visit_expr(&item.expr);
            }
        }
        Expr::Extract {
            part,
            expr,
            time_zone,
        } => {
            visitor.visit_expr(part);
            visitor.visit_expr(expr);
            if let Some(tz) = time_zone {
                visitor.visit_expr(tz);
            }
        }
        Expr::Case(case) => walk_case(visitor, case),
        Expr::In { expr, target, .. } => {
            visitor.visit_expr(expr);
            match target {
                InTarget::List(items) => {
                    for item in items {
                        visitor.visit_expr(item);
                    }
                }
                InTarget::Query(query) => visitor.visit_query(query),
                InTarget::Unnest(expr) => visitor.visit_expr(expr),
            }
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            visitor.visit_expr(expr);
            visitor.visit_expr(low);
            visitor.visit_expr(high);
        }
        Expr::Index { expr, index, .. } => {
            visitor.visit_expr(expr);
            visitor.visit_expr(index);
        }
    }
}
