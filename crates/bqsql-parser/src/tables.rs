//! Tables a statement reads from and writes to.
//!
//! Names are dotted with backquotes stripped, so `` `p.d.t` `` and `p.d.t`
//! are the same table. A single-segment name that matches a CTE in scope is
//! a reference to that CTE and is never reported.

use indexmap::IndexSet;

use crate::ast::{Query, Script, Statement, TableExpr};
use crate::visitor::{
    Visitor, walk_order_limit_offset, walk_query, walk_statement, walk_table_expr,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRefs {
    reads: IndexSet<String>,
    writes: IndexSet<String>,
}

impl TableRefs {
    pub fn from_statement(statement: &Statement) -> Self {
        let mut collector = Collector::default();
        collector.visit_statement(statement);
        collector.refs
    }

    /// One entry per statement, in script order.
    pub fn from_script(script: &Script) -> Vec<Self> {
        script.statements.iter().map(Self::from_statement).collect()
    }

    pub fn reads(&self) -> impl Iterator<Item = &str> {
        self.reads.iter().map(String::as_str)
    }

    pub fn writes(&self) -> impl Iterator<Item = &str> {
        self.writes.iter().map(String::as_str)
    }

    /// `(dest, src)` for every written table paired with every read table.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.writes()
            .flat_map(move |dest| self.reads().map(move |src| (dest, src)))
    }
}

/// Dependency edges of a whole script, deduplicated in first-seen order.
pub fn script_edges(script: &Script) -> IndexSet<(String, String)> {
    TableRefs::from_script(script)
        .iter()
        .flat_map(|refs| {
            refs.edges()
                .map(|(dest, src)| (dest.to_owned(), src.to_owned()))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[derive(Default)]
struct Collector {
    refs: TableRefs,
    /// CTE names visible at the current point, innermost scope last.
    scopes: Vec<Vec<String>>,
}

impl Collector {
    fn is_cte(&self, name: &str) -> bool {
        self.scopes
            .iter()
            .flatten()
            .any(|cte| cte.eq_ignore_ascii_case(name))
    }

    fn declare(&mut self, cte: String) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(cte);
        }
    }
}

impl Visitor for Collector {
    fn visit_statement(&mut self, statement: &Statement) {
        let written = match statement {
            Statement::CreateTable(stmt) => Some(&stmt.name),
            Statement::CreateView(stmt) => Some(&stmt.name),
            Statement::Insert(stmt) => Some(&stmt.table),
            Statement::Query(_) | Statement::CreateFunction(_) => None,
        };
        if let Some(name) = written {
            self.refs.writes.insert(name.unquoted_name());
        }
        walk_statement(self, statement);
    }

    /// A CTE sees the CTEs before it, and itself under `WITH RECURSIVE`.
    /// The body sees them all.
    fn visit_query(&mut self, query: &Query) {
        let Some(with) = &query.with else {
            walk_query(self, query);
            return;
        };
        self.scopes.push(Vec::new());
        for cte in &with.ctes {
            let name = cte.name.unquoted().to_owned();
            if with.recursive {
                self.declare(name);
                self.visit_cte(cte);
            } else {
                self.visit_cte(cte);
                self.declare(name);
            }
        }
        self.visit_set_expr(&query.body);
        if let Some(olo) = &query.order_limit_offset {
            walk_order_limit_offset(self, olo);
        }
        self.scopes.pop();
    }

    fn visit_table_expr(&mut self, table: &TableExpr) {
        if let TableExpr::Table { name, .. } = table
            && !(name.is_single() && self.is_cte(name.first().unquoted()))
        {
            self.refs.reads.insert(name.unquoted_name());
        }
        walk_table_expr(self, table);
    }
}
