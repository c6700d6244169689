use crate::printer::TreePrinter;
use crate::test_utils::{script, tree};

#[test]
fn special_forms() {
    let sql = "SELECT EXTRACT(YEAR FROM ts AT TIME ZONE 'UTC') AS y, SAFE_CAST(x AS INT64), \
               INTERVAL 1 DAY FROM UNNEST(a) AS e WITH OFFSET AS i";

    insta::assert_snapshot!(tree(sql), @r"
    Script
      QueryStatement
        Query
          Select
            Item AS y
              Extract
                Path YEAR
                Path ts
                TimeZone
                  Constant String 'UTC'
            Item
              SafeCast INT64
                Path x
            Item
              Interval DAY
                Constant Number 1
            From
              Unnest AS e WITH OFFSET AS i
                Path a
    ");
}

#[test]
fn constants_by_kind() {
    insta::assert_snapshot!(tree("SELECT 'a', b'b', 1.5, true, NULL"), @r"
    Script
      QueryStatement
        Query
          Select
            Item
              Constant String 'a'
            Item
              Constant Bytes b'b'
            Item
              Constant Number 1.5
            Item
              Constant Boolean TRUE
            Item
              Constant Null NULL
    ");
}

#[test]
fn comments_can_be_left_out() {
    let parsed = script("-- note\nSELECT 1; -- end");

    insta::assert_snapshot!(TreePrinter::new(&parsed).with_comments(false).dump(), @r"
    Script
      QueryStatement
        Query
          Select
            Item
              Constant Number 1
    ");
}

#[test]
fn format_writes_into_any_writer() {
    let parsed = script("SELECT 1 INTERSECT DISTINCT SELECT 2");
    let mut out = String::new();

    TreePrinter::new(&parsed).format(&mut out).unwrap();

    insta::assert_snapshot!(out, @r"
    Script
      QueryStatement
        Query
          SetOperation INTERSECT DISTINCT
            Select
              Item
                Constant Number 1
            Select
              Item
                Constant Number 2
    ");
}

#[test]
fn create_view_label() {
    insta::assert_snapshot!(tree("CREATE OR REPLACE VIEW v AS SELECT a FROM t"), @r"
    Script
      CreateView v OR REPLACE
        Query
          Select
            Item
              Path a
            From
              Table t
    ");
}
