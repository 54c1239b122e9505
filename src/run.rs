mod cli;
mod shell;

pub(crate) use cli::as_cli;
pub(crate) use shell::as_shell;

use crate::error::Error;

/// Print a command failure. Mistakes in what the user typed get a one-line message;
/// anything else is logged with its full cause chain.
pub(crate) fn report(err: &anyhow::Error) {
    if err.downcast_ref::<Error>().is_some_and(Error::is_user_facing) {
        eprintln!("Error: {err}");
    } else {
        tracing::error!("{err:#}");
        eprintln!("Error: {err:#}");
    }
}
