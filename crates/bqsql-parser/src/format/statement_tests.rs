use indoc::indoc;

use crate::test_utils::{compact, pretty};
use crate::{FormatOptions, format_source, parse, render, render_with};

#[test]
fn statements_are_separated_by_a_blank_line() {
    assert_eq!(pretty("SELECT 1; SELECT 2;", 80), "SELECT 1;\n\nSELECT 2");
    assert_eq!(compact("SELECT 1; SELECT 2;"), "SELECT 1;\nSELECT 2");
}

#[test]
fn trailing_comments_keep_the_last_semicolon() {
    assert_eq!(pretty("SELECT 1; -- end", 80), "SELECT 1;\n\n-- end");
    assert_eq!(compact("SELECT 1; -- end"), "SELECT 1;\n-- end");
}

#[test]
fn leading_comments_precede_their_statement() {
    let sql = indoc! {"
        -- totals
        select sum(x) from t;
        /* rows */ select count(*) from t
    "};

    insta::assert_snapshot!(pretty(sql, 80), @r"
    -- totals
    SELECT sum(x) FROM t;

    /* rows */
    SELECT count(*) FROM t
    ");
}

#[test]
fn comment_only_script() {
    assert_eq!(pretty("-- a\n-- b\n", 80), "-- a\n-- b");
}

#[test]
fn empty_script_renders_nothing() {
    assert_eq!(pretty("", 80), "");
    assert_eq!(pretty(" ; ;", 80), "");
}

#[test]
fn insert_values_move_under_the_head() {
    insta::assert_snapshot!(pretty("INSERT INTO t (a, b) VALUES (1, 2), (3, 4)", 30), @r"
    INSERT INTO t (a, b)
    VALUES (1, 2), (3, 4)
    ");
}

#[test]
fn insert_query_below_the_head() {
    insta::assert_snapshot!(pretty("INSERT INTO t SELECT a, b FROM s WHERE c", 30), @r"
    INSERT INTO t
    SELECT a, b FROM s WHERE c
    ");
}

#[test]
fn create_table_parts_one_per_line() {
    let sql = "CREATE TABLE d.t OPTIONS(description = 'daily') AS SELECT a FROM s";

    insta::assert_snapshot!(pretty(sql, 40), @r"
    CREATE TABLE d.t
    OPTIONS(description = 'daily')
    AS SELECT a FROM s
    ");
}

#[test]
fn create_table_columns_wrap() {
    insta::assert_snapshot!(pretty("CREATE TABLE t (id INT64, name STRING, tags ARRAY<STRING>)", 30), @r"
    CREATE TABLE t (id INT64,
                    name STRING,
                    tags ARRAY<STRING>)
    ");
}

#[test]
fn function_signature_above_the_body() {
    let sql = "CREATE TEMP FUNCTION f(x INT64, y INT64) RETURNS INT64 AS (x * y + 1)";

    insta::assert_snapshot!(pretty(sql, 40), @r"
    CREATE TEMP FUNCTION f(x INT64, y INT64)
    RETURNS INT64
    AS (x * y + 1)
    ");
}

#[test]
fn foreign_function_keeps_its_code() {
    let sql = indoc! {r#"
        CREATE FUNCTION f(s STRING) RETURNS STRING LANGUAGE js AS r"""
          return s.toUpperCase();
        """ OPTIONS(library = ['gs://b/lib.js'])
    "#};

    insta::assert_snapshot!(pretty(sql, 40), @r#"
    CREATE FUNCTION f(s STRING)
    RETURNS STRING
    LANGUAGE js
    AS r"""
      return s.toUpperCase();
    """
    OPTIONS(library = ['gs://b/lib.js'])
    "#);
}

#[test]
fn view_body_indents_when_long() {
    let sql = "CREATE VIEW v AS SELECT id, name FROM users WHERE active";

    insta::assert_snapshot!(pretty(sql, 30), @r"
    CREATE VIEW v
    AS
      SELECT id, name
      FROM users
      WHERE active
    ");
}

#[test]
fn indent_width_is_configurable() {
    let script = parse("SELECT alpha, beta FROM t").unwrap();
    let options = FormatOptions::new().with_width(12).with_indent(4);

    insta::assert_snapshot!(render_with(&script, &options), @r"
    SELECT
        alpha,
        beta
    FROM t
    ");
}

#[test]
fn render_defaults_to_eighty_columns() {
    let script = parse("select 1").unwrap();

    assert_eq!(render(&script, false), "SELECT 1");
    assert_eq!(render(&script, true), "SELECT 1");
}

#[test]
fn format_source_reports_parse_errors() {
    let err = format_source("SELECT FROM", &FormatOptions::default()).unwrap_err();

    assert_eq!(
        err.to_string(),
        "syntax error at 7..11: expected a select item, found `FROM`"
    );
}
