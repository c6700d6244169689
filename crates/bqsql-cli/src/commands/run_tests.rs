use std::fs;
use std::path::{Path, PathBuf};

use bqsql_parser::FormatOptions;
use indoc::indoc;

use super::input::{Input, load_input};
use super::run::{OutputKind, RunArgs, process, run};

fn args(kind: OutputKind) -> RunArgs {
    RunArgs {
        inputs: Vec::new(),
        kind,
        options: FormatOptions::new(),
        graph_minimise: false,
        output: None,
        color: false,
    }
}

fn input(name: &str, text: &str) -> Input {
    Input {
        name: name.to_owned(),
        text: text.to_owned(),
    }
}

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn loads_files_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "q.sql", "select 1");

    let loaded = load_input(&path).unwrap();

    assert_eq!(loaded.name, path.to_string_lossy());
    assert_eq!(loaded.text, "select 1");
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sql");

    let err = load_input(&path).unwrap_err();

    assert!(err.to_string().starts_with("failed to read '"), "{err}");
    assert!(err.to_string().contains("missing.sql"), "{err}");
}

#[test]
fn format_each_input() {
    let inputs = [
        input("a.sql", "select a,b from t where x=1"),
        input("b.sql", "select 1; select 2"),
    ];

    let outcome = process(&inputs, &args(OutputKind::Format));

    assert_eq!(outcome.failures, 0);
    assert_eq!(outcome.diagnostics, "");
    assert_eq!(
        outcome.output,
        "SELECT a, b FROM t WHERE x = 1\nSELECT 1;\n\nSELECT 2\n"
    );
}

#[test]
fn compact_format() {
    let mut run_args = args(OutputKind::Format);
    run_args.options = FormatOptions::new().with_compact(true).with_width(10);

    let outcome = process(&[input("a.sql", "select a, b, c from t")], &run_args);

    assert_eq!(outcome.output, "SELECT a, b, c FROM t\n");
}

#[test]
fn tree_output() {
    let outcome = process(&[input("a.sql", "SELECT 1")], &args(OutputKind::Tree));

    insta::assert_snapshot!(outcome.output, @r"
    Script
      QueryStatement
        Query
          Select
            Item
              Constant Number 1
    ");
}

#[test]
fn graph_accumulates_across_inputs() {
    let inputs = [
        input("a.sql", "CREATE TABLE a AS SELECT * FROM x JOIN y ON x.k = y.k"),
        input(
            "b.sql",
            indoc! {"
                INSERT INTO b SELECT * FROM a;
                CREATE VIEW c AS SELECT * FROM a JOIN b USING (id);
            "},
        ),
    ];

    let outcome = process(&inputs, &args(OutputKind::Graph));

    insta::assert_snapshot!(outcome.output, @r#"
    digraph connections {
    "a" -> "x";
    "a" -> "y";
    "b" -> "a";
    "c" -> "a";
    "c" -> "b";
    }
    "#);
}

#[test]
fn graph_minimise() {
    let inputs = [input(
        "etl.sql",
        indoc! {"
            INSERT INTO b SELECT * FROM a;
            CREATE VIEW c AS SELECT * FROM a JOIN b USING (id);
        "},
    )];
    let mut run_args = args(OutputKind::Graph);
    run_args.graph_minimise = true;

    let outcome = process(&inputs, &run_args);

    insta::assert_snapshot!(outcome.output, @r#"
    digraph connections {
    "b" -> "a";
    "c" -> "b";
    }
    "#);
}

#[test]
fn failed_unit_is_reported_and_skipped() {
    let inputs = [
        input("bad.sql", "SELECT FROM t"),
        input("good.sql", "select 1"),
    ];

    let outcome = process(&inputs, &args(OutputKind::Format));

    assert_eq!(outcome.failures, 1);
    assert_eq!(outcome.output, "SELECT 1\n");
    assert!(outcome.diagnostics.contains("bad.sql"), "{}", outcome.diagnostics);
    assert!(
        outcome.diagnostics.contains("expected a select item"),
        "{}",
        outcome.diagnostics
    );
}

#[test]
fn failed_unit_adds_no_graph_edges() {
    let inputs = [
        input("a.sql", "INSERT INTO a SELECT * FROM s"),
        input("bad.sql", "INSERT INTO b SELECT * FROM a WHERE"),
    ];

    let outcome = process(&inputs, &args(OutputKind::Graph));

    assert_eq!(outcome.failures, 1);
    assert_eq!(outcome.output, "digraph connections {\n\"a\" -> \"s\";\n}\n");
}

#[test]
fn run_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let query = write(dir.path(), "q.sql", "select x from t");
    let out = dir.path().join("out.sql");
    let mut run_args = args(OutputKind::Format);
    run_args.inputs = vec![query];
    run_args.output = Some(out.clone());

    assert_eq!(run(run_args), 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "SELECT x FROM t\n");
}

#[test]
fn run_continues_past_failures_and_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write(dir.path(), "bad.sql", "SELECT (1");
    let good = write(dir.path(), "good.sql", "select 2");
    let out = dir.path().join("out.sql");
    let mut run_args = args(OutputKind::Format);
    run_args.inputs = vec![dir.path().join("missing.sql"), bad, good];
    run_args.output = Some(out.clone());

    assert_eq!(run(run_args), 1);
    assert_eq!(fs::read_to_string(&out).unwrap(), "SELECT 2\n");
}
