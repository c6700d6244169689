use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use bqsql_parser::parser::render_errors;
use bqsql_parser::tables::script_edges;
use bqsql_parser::{FormatOptions, parse, render_tree, render_with};

use super::error::CliError;
use super::graph::DependencyGraph;
use super::input::{Input, load_input};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputKind {
    #[default]
    Format,
    Tree,
    Graph,
}

pub struct RunArgs {
    pub inputs: Vec<PathBuf>,
    pub kind: OutputKind,
    pub options: FormatOptions,
    pub graph_minimise: bool,
    pub output: Option<PathBuf>,
    pub color: bool,
}

/// What a run produced. Failed units contribute diagnostics only.
#[derive(Debug, Default)]
pub struct Outcome {
    pub output: String,
    pub diagnostics: String,
    pub failures: usize,
}

impl Outcome {
    fn fail(&mut self, report: &str) {
        self.failures += 1;
        self.diagnostics.push_str(report);
        if !report.ends_with('\n') {
            self.diagnostics.push('\n');
        }
    }
}

/// Read, process and write; returns the process exit code.
pub fn run(args: RunArgs) -> i32 {
    let mut outcome = Outcome::default();
    let mut inputs = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        match load_input(path) {
            Ok(input) => inputs.push(input),
            Err(err) => outcome.fail(&format!("error: {err}")),
        }
    }

    let processed = process(&inputs, &args);
    outcome.output = processed.output;
    outcome.diagnostics.push_str(&processed.diagnostics);
    outcome.failures += processed.failures;

    eprint!("{}", outcome.diagnostics);
    if let Err(err) = write_output(args.output.as_ref(), &outcome.output) {
        eprintln!("error: {err}");
        return 1;
    }

    if outcome.failures > 0 { 1 } else { 0 }
}

/// Parse every input and render the requested output kind.
///
/// A unit that fails to parse adds nothing to the output; the others are
/// still processed. Graph edges accumulate across all units.
pub fn process(inputs: &[Input], args: &RunArgs) -> Outcome {
    let mut outcome = Outcome::default();
    let mut graph = DependencyGraph::new();

    for input in inputs {
        let script = match parse(&input.text) {
            Ok(script) => script,
            Err(err) => {
                tracing::debug!(input = %input.name, %err, "parse failed");
                let report = render_errors(
                    &input.text,
                    std::slice::from_ref(err.syntax_error()),
                    Some(input.name.as_str()),
                    args.color,
                );
                outcome.fail(&report);
                continue;
            }
        };
        tracing::debug!(
            input = %input.name,
            statements = script.statements.len(),
            "parsed"
        );

        match args.kind {
            OutputKind::Format => {
                outcome.output.push_str(&render_with(&script, &args.options));
                outcome.output.push('\n');
            }
            OutputKind::Tree => outcome.output.push_str(&render_tree(&script)),
            OutputKind::Graph => graph.extend(script_edges(&script)),
        }
    }

    if args.kind == OutputKind::Graph {
        if args.graph_minimise && !graph.is_empty() {
            let before = graph.len();
            graph.minimise();
            tracing::debug!(before, after = graph.len(), "minimised graph");
        }
        outcome.output = graph.to_dot();
    }

    outcome
}

fn write_output(path: Option<&PathBuf>, output: &str) -> Result<(), CliError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), bytes = output.len(), "writing output");
            fs::write(path, output).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(CliError::Stdout)
        }
    }
}
