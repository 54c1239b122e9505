use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Print `label` and read one line from stdin. `None` at end of input.
pub(crate) fn ask(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Read a password without echoing it. `None` at end of input.
pub(crate) fn ask_password(label: &str) -> Result<Option<String>> {
    match rpassword::prompt_password(label) {
        Ok(password) => Ok(Some(password)),
        Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(error) => Err(error).context("Could not read password from stdin"),
    }
}

/// Yes/no question, defaulting to no.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    let answer = ask(&format!("{question} [y/N] "))?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
