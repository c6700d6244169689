use crate::ast::{Expr, Query};
use crate::test_utils::script;
use crate::visitor::{Visitor, walk_expr};

#[derive(Default)]
struct Paths(Vec<String>);

impl Visitor for Paths {
    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::Path(path) = expr {
            self.0.push(path.dotted());
        }
        walk_expr(self, expr);
    }
}

fn paths(sql: &str) -> Vec<String> {
    let mut visitor = Paths::default();
    visitor.visit_script(&script(sql));
    visitor.0
}

#[test]
fn walks_into_nested_queries() {
    assert_eq!(
        paths("SELECT a + b FROM t WHERE c IN (SELECT d FROM u)"),
        ["a", "b", "c", "d"]
    );
}

#[test]
fn walks_aggregate_modifiers() {
    assert_eq!(
        paths("SELECT ARRAY_AGG(a ORDER BY b) OVER (PARTITION BY c), STRING_AGG(d, ',')[OFFSET(e)]"),
        ["a", "b", "c", "d", "e"]
    );
}

#[test]
fn walks_statement_bodies() {
    assert_eq!(paths("CREATE FUNCTION f(x INT64) AS (x + y)"), ["x", "y"]);
    assert_eq!(paths("INSERT INTO t VALUES (a, b.c)"), ["a", "b.c"]);
    assert_eq!(
        paths("CREATE TABLE t OPTIONS(o = p) AS SELECT q"),
        ["p", "q"]
    );
}

#[test]
fn skipping_the_walk_prunes_the_subtree() {
    #[derive(Default)]
    struct Queries(usize);

    impl Visitor for Queries {
        fn visit_query(&mut self, _query: &Query) {
            self.0 += 1;
        }
    }

    let mut visitor = Queries::default();
    visitor.visit_script(&script("SELECT (SELECT 1) FROM (SELECT 2); SELECT 3"));

    assert_eq!(visitor.0, 2);
}
