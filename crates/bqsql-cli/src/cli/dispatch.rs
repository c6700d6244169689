//! Extract params from `ArgMatches` and convert them to command args.

use std::path::PathBuf;

use bqsql_parser::FormatOptions;
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::run::{OutputKind, RunArgs};

pub struct RunParams {
    pub inputs: Vec<PathBuf>,
    pub kind: OutputKind,
    pub compact: bool,
    pub width: usize,
    pub indent: usize,
    pub graph_minimise: bool,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
    pub verbosity: u8,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            inputs: m
                .get_many::<PathBuf>("inputs")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            kind: parse_kind(m),
            compact: m.get_flag("compact"),
            width: m.get_one::<usize>("width").copied().unwrap_or(80),
            indent: m.get_one::<usize>("indent").copied().unwrap_or(2),
            graph_minimise: m.get_flag("graph_minimise"),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
            verbosity: m.get_count("verbose"),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            inputs: p.inputs,
            kind: p.kind,
            options: FormatOptions::new()
                .with_compact(p.compact)
                .with_width(p.width)
                .with_indent(p.indent),
            graph_minimise: p.graph_minimise,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_kind(m: &ArgMatches) -> OutputKind {
    match m.get_one::<String>("type").map(|s| s.as_str()) {
        Some("tree") => OutputKind::Tree,
        Some("graph") => OutputKind::Graph,
        _ => OutputKind::Format,
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
