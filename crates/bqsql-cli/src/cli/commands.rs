use clap::Command;

use super::args::*;

/// Build the `bqsql` command.
pub fn build_cli() -> Command {
    Command::new("bqsql")
        .about("Format, dump and analyse BigQuery Standard SQL")
        .arg_required_else_help(true)
        .after_help(
            r#"EXAMPLES:
  bqsql query.sql                        # pretty-print at 80 columns
  bqsql query.sql --compact              # one line per statement
  bqsql query.sql --width 120 --indent 4
  bqsql query.sql --type tree            # syntax tree dump
  bqsql etl/*.sql --type graph -o deps.dot
  cat query.sql | bqsql -                # read stdin"#,
        )
        .arg(inputs_arg())
        .arg(type_arg())
        .arg(compact_arg())
        .arg(width_arg())
        .arg(indent_arg())
        .arg(graph_minimise_arg())
        .arg(output_file_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
