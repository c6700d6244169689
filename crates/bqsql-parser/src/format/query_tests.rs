use crate::test_utils::{compact, pretty};

#[test]
fn fitting_query_stays_on_one_line() {
    assert_eq!(
        pretty("select a,b from t where x=1", 80),
        "SELECT a, b FROM t WHERE x = 1"
    );
}

#[test]
fn clauses_go_one_per_line() {
    insta::assert_snapshot!(pretty("SELECT a, b, c FROM t WHERE x = 1 AND y = 2", 40), @r"
    SELECT a, b, c
    FROM t
    WHERE x = 1 AND y = 2
    ");
}

#[test]
fn select_items_stack_when_the_list_is_too_wide() {
    insta::assert_snapshot!(pretty("SELECT alpha, beta FROM t", 12), @r"
    SELECT
      alpha,
      beta
    FROM t
    ");
}

#[test]
fn long_condition_moves_under_its_keyword() {
    let sql = "SELECT a FROM t WHERE x = 1 AND y = 2 AND z = 3";

    insta::assert_snapshot!(pretty(sql, 30), @r"
    SELECT a
    FROM t
    WHERE
      x = 1 AND y = 2 AND z = 3
    ");
    insta::assert_snapshot!(pretty(sql, 20), @r"
    SELECT a
    FROM t
    WHERE
      x = 1
      AND y = 2
      AND z = 3
    ");
}

#[test]
fn subquery_in_from_expands() {
    insta::assert_snapshot!(pretty("SELECT * FROM (SELECT a, b FROM t WHERE c) AS s", 30), @r"
    SELECT *
    FROM
      (
        SELECT a, b FROM t WHERE c
      ) AS s
    ");
}

#[test]
fn ctes_one_per_line() {
    let sql = "WITH a AS (SELECT x FROM t), b AS (SELECT y FROM u) SELECT * FROM a, b";

    insta::assert_snapshot!(pretty(sql, 30), @r"
    WITH
      a AS (SELECT x FROM t),
      b AS (SELECT y FROM u)
    SELECT * FROM a, b
    ");
}

#[test]
fn join_starts_its_own_line() {
    let sql = "SELECT * FROM orders o LEFT JOIN customers c ON o.cid = c.id";

    insta::assert_snapshot!(pretty(sql, 44), @r"
    SELECT *
    FROM
      orders AS o
      LEFT JOIN customers AS c ON o.cid = c.id
    ");
}

#[test]
fn set_operator_between_operands() {
    insta::assert_snapshot!(pretty("SELECT a FROM t UNION ALL SELECT b FROM u", 20), @r"
    SELECT a FROM t
    UNION ALL
    SELECT b FROM u
    ");
}

#[test]
fn multi_line_literal_is_verbatim() {
    let sql = "SELECT '''a\n  b''' AS s";

    assert_eq!(pretty(sql, 80), sql);
    assert_eq!(compact(sql), sql);
}

#[test]
fn compact_is_a_single_line() {
    let sql = "SELECT a, b, c FROM t WHERE x = 1 AND y = 2 GROUP BY a ORDER BY b LIMIT 5";

    assert_eq!(compact(sql), sql);
    assert!(!compact(sql).contains('\n'));
}
