//! Printing never changes meaning: whatever layout is chosen, reparsing the
//! output yields the same tree, and formatting is idempotent.

use crate::ast::Script;
use crate::test_utils::script;
use crate::{FormatOptions, render_with};

const CORPUS: &[&str] = &[
    "SELECT 1",
    "select a, b from t where x = 1 and not y or z",
    "SELECT DISTINCT AS STRUCT a, b AS c FROM `proj.ds.t` AS x",
    "SELECT t.* EXCEPT (a) REPLACE (b * 2 AS b) FROM t",
    "WITH a AS (SELECT 1 AS x), b AS (SELECT x FROM a) SELECT * FROM b ORDER BY x DESC NULLS LAST LIMIT 10 OFFSET 2",
    "WITH RECURSIVE r AS (SELECT 1 AS n UNION ALL SELECT n + 1 FROM r WHERE n < 10) SELECT n FROM r",
    "(SELECT 1) UNION ALL (SELECT 2) EXCEPT DISTINCT SELECT 3",
    "SELECT * FROM a LEFT JOIN b USING (id) JOIN c ON b.k = c.k CROSS JOIN d, e",
    "SELECT x, o FROM UNNEST([1, 2, 3]) AS x WITH OFFSET AS o",
    "SELECT * FROM (SELECT a FROM t) s WHERE EXISTS(SELECT 1 FROM u WHERE u.a = s.a)",
    "SELECT a, COUNT(DISTINCT b) FROM t GROUP BY a HAVING COUNT(*) > 1 QUALIFY ROW_NUMBER() OVER (PARTITION BY a ORDER BY b) = 1",
    "SELECT SUM(x) OVER (PARTITION BY y ORDER BY z ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) FROM t",
    "SELECT AVG(x) OVER (ORDER BY t RANGE BETWEEN 2 PRECEDING AND 2 FOLLOWING) FROM t",
    "SELECT ARRAY_AGG(DISTINCT x IGNORE NULLS ORDER BY y LIMIT 1)[OFFSET(0)] FROM t",
    "SELECT STRING_AGG(name, ', ' ORDER BY name), SPLIT(s, ',')[SAFE_OFFSET(1)] FROM t",
    "SELECT CASE WHEN a THEN 1 WHEN b THEN 2 ELSE 3 END, CASE x WHEN 1 THEN 'a' END FROM t",
    "SELECT CAST(x AS NUMERIC(10, 2)), SAFE_CAST(y AS STRING), EXTRACT(DAY FROM ts AT TIME ZONE 'UTC')",
    "SELECT DATE '2024-01-01', DATE_ADD(d, INTERVAL -1 DAY), TIMESTAMP('2024-01-01')",
    "SELECT STRUCT(1 AS a, 'x'), STRUCT<a INT64, b ARRAY<STRING>>(1, ['x']), ARRAY<INT64>[1, 2]",
    "SELECT ARRAY(SELECT AS VALUE x FROM UNNEST(xs) AS x), [STRUCT(1 AS a)][OFFSET(0)].a",
    "SELECT x IN (1, 2), x NOT IN UNNEST(arr), x IN (SELECT y FROM u), x NOT BETWEEN 1 AND 2",
    "SELECT x IS NOT NULL, y IS TRUE, a LIKE 'b%', a NOT LIKE 'c%', a || b, a >> 2, a << 1 & 3 | 4 ^ 5",
    "SELECT - -x, -(-x), NOT NOT a, ~1, (a + b) * c, a - (b - c), a / b * c",
    "SELECT '''multi\n  line''' AS s, r'\\d+' AS re, b'bytes' AS b, 1.5e3, .5, 0x1F, TRUE, NULL",
    "CREATE TEMP FUNCTION add(a INT64, b INT64) RETURNS INT64 AS (a + b)",
    "CREATE OR REPLACE FUNCTION ds.f(x ANY TYPE) RETURNS FLOAT64 LANGUAGE js AS \"\"\"return x * 2;\"\"\" OPTIONS(library = ['gs://b/lib.js'])",
    "CREATE TABLE IF NOT EXISTS d.t (id INT64, tags ARRAY<STRING>, s STRUCT<a INT64, b STRING>) OPTIONS(description = 'x')",
    "CREATE OR REPLACE TEMPORARY TABLE t AS SELECT * FROM s",
    "CREATE VIEW `p.d.v` OPTIONS(expiration_timestamp = TIMESTAMP '2030-01-01') AS SELECT id FROM users WHERE active",
    "INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y')",
    "INSERT t WITH s AS (SELECT 1 AS a) SELECT a FROM s",
    "-- leading\nSELECT 1; /* between */ SELECT 2; -- trailing",
    "SELECT 1 -- attached\n",
];

const WIDTHS: &[usize] = &[1, 20, 40, 80, 200];

fn render(script: &Script, width: Option<usize>) -> String {
    let options = match width {
        Some(width) => FormatOptions::new().with_width(width),
        None => FormatOptions::new().with_compact(true),
    };
    render_with(script, &options)
}

fn layouts() -> impl Iterator<Item = Option<usize>> {
    WIDTHS.iter().copied().map(Some).chain([None])
}

#[test]
fn reparsing_output_gives_the_same_tree() {
    for sql in CORPUS {
        let original = script(sql);
        for width in layouts() {
            let printed = render(&original, width);
            let reparsed = script(&printed);
            assert_eq!(reparsed, original, "width {width:?} changed {sql:?}:\n{printed}");
        }
    }
}

#[test]
fn formatting_is_idempotent() {
    for sql in CORPUS {
        for width in layouts() {
            let once = render(&script(sql), width);
            let twice = render(&script(&once), width);
            assert_eq!(twice, once, "width {width:?} is not stable for {sql:?}");
        }
    }
}

#[test]
fn compact_and_expanded_differ_only_in_whitespace() {
    let tokens = |text: &str| -> String { text.chars().filter(|c| !c.is_whitespace()).collect() };
    for sql in CORPUS {
        let parsed = script(sql);
        let compact = render(&parsed, None);
        for width in WIDTHS {
            let expanded = render(&parsed, Some(*width));
            assert_eq!(
                tokens(&expanded),
                tokens(&compact),
                "width {width} differs from compact for {sql:?}"
            );
        }
    }
}

#[test]
fn fitting_statements_render_compactly() {
    for sql in CORPUS {
        let parsed = script(sql);
        let compact = render(&parsed, None);
        let widest = compact.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        if parsed.statements.len() == 1 && !compact.contains("'''") {
            assert_eq!(render(&parsed, Some(widest)), compact, "{sql:?}");
        }
    }
}
