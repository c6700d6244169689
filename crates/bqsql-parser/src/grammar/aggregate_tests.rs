use crate::ast::{Analytic, Expr, NodeList};
use crate::parse_expr;
use crate::test_utils::{compact, error, expr_compact, expr_tree};

#[test]
fn array_agg_keeps_modifier_order() {
    let sql = "ARRAY_AGG(DISTINCT x IGNORE NULLS ORDER BY y DESC LIMIT 1)";

    insta::assert_snapshot!(expr_tree(sql), @r"
    ArrayAgg DISTINCT IGNORE NULLS
      Path x
      OrderBy
        OrderItem DESC
          Path y
      Limit
        Constant Number 1
    ");
    assert_eq!(expr_compact(sql), sql);
}

#[test]
fn array_agg_modifiers_out_of_order() {
    assert_eq!(
        error("SELECT ARRAY_AGG(x ORDER BY y IGNORE NULLS)"),
        "syntax error at 30..36: expected `)`, found `IGNORE`"
    );
}

#[test]
fn array_agg_offset() {
    insta::assert_snapshot!(expr_tree("ARRAY_AGG(x)[OFFSET(0)]"), @r"
    ArrayAgg
      Path x
      Offset
        Constant Number 0
    ");
    assert_eq!(
        expr_compact("array_agg(x order by t)[offset(0)]"),
        "ARRAY_AGG(x ORDER BY t)[OFFSET(0)]"
    );
}

#[test]
fn array_agg_as_window_function() {
    assert_eq!(
        expr_compact("ARRAY_AGG(x) OVER (PARTITION BY k)"),
        "ARRAY_AGG(x) OVER (PARTITION BY k)"
    );
}

#[test]
fn string_agg_with_delimiter() {
    let sql = "STRING_AGG(DISTINCT name, ', ' ORDER BY name)";

    insta::assert_snapshot!(expr_tree(sql), @r"
    StringAgg STRING_AGG DISTINCT
      Path name
      Delimiter ', '
      OrderBy
        OrderItem
          Path name
    ");
    assert_eq!(expr_compact(sql), sql);
}

#[test]
fn split_with_accessor() {
    insta::assert_snapshot!(expr_tree("SPLIT(s, ',')[SAFE_OFFSET(1)]"), @r"
    StringAgg SPLIT
      Path s
      Delimiter ','
      Accessor SAFE_OFFSET
        Constant Number 1
    ");
    assert_eq!(expr_compact("SPLIT(s)[0]"), "SPLIT(s)[0]");
}

#[test]
fn string_agg_delimiter_must_be_a_literal() {
    assert_eq!(
        error("SELECT STRING_AGG(a, b)"),
        "syntax error at 21..22: expected a literal, found `b`"
    );
}

#[test]
fn analytic_clauses() {
    for sql in [
        "ROW_NUMBER() OVER ()",
        "COUNT(*) OVER (ROWS 3 PRECEDING)",
        "RANK() OVER (PARTITION BY a, b ORDER BY c ASC NULLS LAST)",
        "AVG(x) OVER (ORDER BY t RANGE BETWEEN 1 PRECEDING AND 1 FOLLOWING)",
        "LAST_VALUE(x IGNORE NULLS) OVER (ORDER BY t ROWS BETWEEN CURRENT ROW AND UNBOUNDED FOLLOWING)",
    ] {
        assert_eq!(expr_compact(sql), sql);
    }
}

#[test]
fn frame_boundary_needs_a_direction() {
    assert_eq!(
        error("SELECT SUM(x) OVER (ORDER BY y ROWS BETWEEN 1 AND CURRENT ROW)"),
        "syntax error at 46..49: expected `PRECEDING` or `FOLLOWING`, found `AND`"
    );
}

#[test]
fn frame_boundary_must_be_a_number() {
    assert_eq!(
        error("SELECT SUM(x) OVER (ROWS 'a' PRECEDING)"),
        "syntax error at 25..28: expected a frame boundary, found `'a'`"
    );
}

#[test]
fn nulls_order_needs_first_or_last() {
    let err = error("SELECT x FROM t ORDER BY x NULLS");

    assert_eq!(
        err,
        "syntax error at 32..32: expected `FIRST` or `LAST`, found end of input"
    );
}

#[test]
fn query_order_limit_offset() {
    assert_eq!(
        compact("select x from t order by x desc, y limit 10 offset 5"),
        "SELECT x FROM t ORDER BY x DESC, y LIMIT 10 OFFSET 5"
    );
}

#[test]
fn empty_over_clause_is_the_default_analytic() {
    let Ok(Expr::WithAnalytic { analytic, .. }) = parse_expr("ROW_NUMBER() OVER ()") else {
        panic!("expected an analytic call");
    };

    assert_eq!(*analytic, Analytic::default());
    assert!(NodeList::<Expr>::default().is_empty());
}
