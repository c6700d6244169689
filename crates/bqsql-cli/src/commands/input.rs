use std::fs;
use std::io::{self, Read};
use std::path::Path;

use super::error::CliError;

/// One SQL unit: parsed, reported and rendered independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    /// Path as given on the command line, or `<stdin>`.
    pub name: String,
    pub text: String,
}

pub fn load_input(path: &Path) -> Result<Input, CliError> {
    if path.as_os_str() == "-" {
        return load_stdin();
    }
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Input {
        name: path.to_string_lossy().into_owned(),
        text,
    })
}

fn load_stdin() -> Result<Input, CliError> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(CliError::Stdin)?;
    Ok(Input {
        name: "<stdin>".to_owned(),
        text,
    })
}
