mod cli;
mod commands;

use cli::{RunParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let params = RunParams::from_matches(&matches);

    commands::logging::init(params.verbosity);

    let code = commands::run::run(params.into());
    std::process::exit(code);
}
