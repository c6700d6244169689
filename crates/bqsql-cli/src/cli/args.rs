//! Argument builders for the `bqsql` command.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// SQL input files (positional, `-` reads stdin).
pub fn inputs_arg() -> Arg {
    Arg::new("inputs")
        .value_name("SQL")
        .value_parser(value_parser!(PathBuf))
        .num_args(1..)
        .required(true)
        .help("SQL input files (`-` for stdin)")
}

/// Output kind (--type).
pub fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .default_value("format")
        .value_parser(["format", "tree", "graph"])
        .help("Output type")
}

/// Print statements on as few lines as possible (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Compact formatted SQL")
}

/// Target line width (--width).
pub fn width_arg() -> Arg {
    Arg::new("width")
        .long("width")
        .value_name("N")
        .default_value("80")
        .value_parser(value_parser!(usize))
        .help("Maximum line width for formatted SQL")
}

/// Indentation step (--indent).
pub fn indent_arg() -> Arg {
    Arg::new("indent")
        .long("indent")
        .value_name("N")
        .default_value("2")
        .value_parser(value_parser!(usize))
        .help("Spaces per indentation level")
}

/// Drop implied dependency edges (--graph-minimise).
pub fn graph_minimise_arg() -> Arg {
    Arg::new("graph_minimise")
        .long("graph-minimise")
        .action(ArgAction::SetTrue)
        .help("Minimise the dependency graph (transitive reduction)")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file (default: stdout)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}
