use indoc::indoc;

use crate::test_utils::{compact, error, script, tree};

#[test]
fn sql_function() {
    insta::assert_snapshot!(tree("CREATE TEMP FUNCTION add(a INT64, b INT64) RETURNS INT64 AS (a + b)"), @r"
    Script
      CreateFunction add TEMP
        Param a INT64
        Param b INT64
        Returns INT64
        Body
          Paren
            Binary +
              Path a
              Path b
    ");
}

#[test]
fn javascript_function_with_options() {
    let sql = indoc! {r#"
        CREATE OR REPLACE FUNCTION f(x ANY TYPE) RETURNS FLOAT64
        LANGUAGE js AS """return x * 2;""" OPTIONS(a=1)
    "#};

    insta::assert_snapshot!(tree(sql), @r#"
    Script
      CreateFunction f OR REPLACE
        Param x ANY TYPE
        Returns FLOAT64
        Language js
        Code "\"\"\"return x * 2;\"\"\""
        Option a
          Constant Number 1
    "#);
    assert_eq!(
        compact(sql),
        r#"CREATE OR REPLACE FUNCTION f(x ANY TYPE) RETURNS FLOAT64 LANGUAGE js AS """return x * 2;""" OPTIONS(a = 1)"#
    );
}

#[test]
fn function_without_parameters() {
    assert_eq!(
        compact("create function ds.pi() as (3.14)"),
        "CREATE FUNCTION ds.pi() AS (3.14)"
    );
}

#[test]
fn foreign_function_needs_string_body() {
    assert_eq!(
        error("CREATE FUNCTION f() LANGUAGE js AS 1"),
        "syntax error at 35..36: expected a string literal, found `1`"
    );
}

#[test]
fn create_table_variants() {
    insta::assert_snapshot!(tree("CREATE TABLE IF NOT EXISTS d.t (a INT64, b STRING) OPTIONS(description = 'x')"), @r"
    Script
      CreateTable d.t IF NOT EXISTS
        Column a INT64
        Column b STRING
        Option description
          Constant String 'x'
    ");
    assert_eq!(
        compact("create or replace temporary table t as select 1"),
        "CREATE OR REPLACE TEMPORARY TABLE t AS SELECT 1"
    );
}

#[test]
fn create_view() {
    assert_eq!(
        compact("CREATE VIEW IF NOT EXISTS `p.d.v` OPTIONS(x = 1) AS SELECT * FROM t"),
        "CREATE VIEW IF NOT EXISTS `p.d.v` OPTIONS(x = 1) AS SELECT * FROM t"
    );
}

#[test]
fn temporary_views_do_not_exist() {
    assert_eq!(
        error("CREATE TEMP VIEW v AS SELECT 1"),
        "syntax error at 0..6: expected a statement, found `CREATE`"
    );
}

#[test]
fn insert_values() {
    insta::assert_snapshot!(tree("INSERT INTO t (a, b) VALUES (1, 2), (3, 4)"), @r"
    Script
      Insert t
        Columns a, b
        Values
          Row
            Constant Number 1
            Constant Number 2
          Row
            Constant Number 3
            Constant Number 4
    ");
}

#[test]
fn insert_query() {
    assert_eq!(
        compact("insert t (select * from s)"),
        "INSERT INTO t (SELECT * FROM s)"
    );
    assert_eq!(
        compact("INSERT INTO t (a) WITH s AS (SELECT 1) SELECT * FROM s"),
        "INSERT INTO t (a) WITH s AS (SELECT 1) SELECT * FROM s"
    );
}

#[test]
fn statements_and_semicolons() {
    let parsed = script(";;SELECT 1;; SELECT 2;");

    assert_eq!(parsed.statements.len(), 2);
    assert!(parsed.trailing_comments.is_empty());
}

#[test]
fn empty_script() {
    let parsed = script("  -- nothing here\n");

    assert!(parsed.statements.is_empty());
    assert_eq!(parsed.trailing_comments, vec!["-- nothing here"]);
}

#[test]
fn comments_attach_to_the_statement_they_precede() {
    let sql = indoc! {"
        -- first
        SELECT 1; /* second */ SELECT 2;
        # trailing
    "};

    insta::assert_snapshot!(tree(sql), @r##"
    Script
      QueryStatement
        Comment "-- first"
        Query
          Select
            Item
              Constant Number 1
      QueryStatement
        Comment "/* second */"
        Query
          Select
            Item
              Constant Number 2
      Comment "# trailing"
    "##);
}

#[test]
fn comment_after_an_unterminated_statement_belongs_to_it() {
    let parsed = script("SELECT 1 -- one");

    assert_eq!(parsed.statements[0].comments(), ["-- one"]);
    assert!(parsed.trailing_comments.is_empty());
}

#[test]
fn statements_need_separators() {
    assert_eq!(
        error("SELECT 1 SELECT 2"),
        "syntax error at 9..15: expected `;` or end of input, found `SELECT`"
    );
}

#[test]
fn unknown_statement() {
    assert_eq!(
        error("DROP TABLE t"),
        "syntax error at 0..4: expected a statement, found `DROP`"
    );
}
