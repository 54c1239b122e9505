use anyhow::{Context, Result};

use crate::db::Database;
use crate::error::Error;
use crate::ui::commands::{self, COMMANDS};
use crate::ui::prompt::{ask, ask_password};
use crate::ui::util::{flag, positional, without_flag};

pub(crate) fn as_cli(args: &[String], db: &Database) -> Result<()> {
    dispatch(args, db, read_password)
}

fn dispatch(
    args: &[String],
    db: &Database,
    password: impl FnOnce() -> Result<String>,
) -> Result<()> {
    match args[1].as_str() {
        "signup" => cli_signup(&args[2..], db, password),
        "login" => cli_login(&args[2..], db, password),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expense-tracker {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        name if COMMANDS.contains_key(name) => {
            let words = sign_in(&args[1..], db, password)?;
            commands::handle_command(&words, db)
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("expense-tracker: personal expense tracker");
    println!();
    println!("Usage: expense-tracker [command] [--user <name>]");
    println!();
    println!("  (none)                       Start the interactive shell");
    println!("  signup <user>                Register a user (password is prompted)");
    println!("  login <user>                 Check a username and password");
    println!("  --help, -h                   Show this help");
    println!("  --version, -V                Show version");
    println!();
    println!("Every other command needs --user <name> and prompts for the password.");
    println!();
    print!("{}", commands::help_text());
}

/// Check `--user` and its password, then return the command words without `--user`.
fn sign_in(
    words: &[String],
    db: &Database,
    password: impl FnOnce() -> Result<String>,
) -> Result<Vec<String>> {
    let Some(username) = flag(words, "--user") else {
        return Err(Error::Validation(format!("`{}` needs --user <name>", words[0])).into());
    };
    if !db.authenticate(username, &password()?)? {
        return Err(Error::Validation("invalid username or password".into()).into());
    }
    tracing::info!(user = %username, "signed in");
    Ok(without_flag(words, "--user"))
}

fn cli_signup(
    args: &[String],
    db: &Database,
    password: impl FnOnce() -> Result<String>,
) -> Result<()> {
    let username = username_arg(args)?;
    db.signup(&username, &password()?)?;
    println!("Account created for {username}.");
    Ok(())
}

fn cli_login(
    args: &[String],
    db: &Database,
    password: impl FnOnce() -> Result<String>,
) -> Result<()> {
    let username = username_arg(args)?;
    if !db.authenticate(&username, &password()?)? {
        return Err(Error::Validation("invalid username or password".into()).into());
    }
    println!("Login successful.");
    Ok(())
}

fn username_arg(args: &[String]) -> Result<String> {
    if let Some(name) = positional(args) {
        return Ok(name.to_string());
    }
    ask("Username: ")?.context("No username given")
}

fn read_password() -> Result<String> {
    ask_password("Password: ")?.context("No password given")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn argv(s: &[&str]) -> Vec<String> {
        std::iter::once("expense-tracker")
            .chain(s.iter().copied())
            .map(String::from)
            .collect()
    }

    fn secret() -> Result<String> {
        Ok("hunter2".to_string())
    }

    fn open_with_user() -> (tempfile::TempDir, Database) {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::open(dir.path()).unwrap();
        dispatch(&argv(&["signup", "sam"]), &db, secret).unwrap();
        (dir, db)
    }

    fn is_user_facing(err: &anyhow::Error) -> bool {
        err.downcast_ref::<Error>().is_some_and(Error::is_user_facing)
    }

    #[test]
    fn test_unknown_command_fails() {
        let (_dir, db) = open_with_user();
        let err = dispatch(&argv(&["frobnicate"]), &db, secret).unwrap_err();
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn test_registry_commands_are_reachable() {
        let (_dir, db) = open_with_user();
        dispatch(
            &argv(&[
                "add", "--user", "sam", "--date", "2024-02-01", "--category", "Rent",
                "--amount", "900", "--desc", "february",
            ]),
            &db,
            secret,
        )
        .unwrap();
        dispatch(&argv(&["add-category", "--user", "sam", "Pets"]), &db, secret).unwrap();

        let expenses = db.load_expenses().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].description, "february");
        assert!(db.load_categories().unwrap().iter().any(|c| c.name == "Pets"));
    }

    #[test]
    fn test_commands_require_user() {
        let (_dir, db) = open_with_user();
        let err = dispatch(
            &argv(&["add", "--category", "Food", "--amount", "1"]),
            &db,
            secret,
        )
        .unwrap_err();
        assert!(is_user_facing(&err));
        assert!(err.to_string().contains("--user"));
        assert!(db.load_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_commands_reject_wrong_password() {
        let (_dir, db) = open_with_user();
        let err = dispatch(
            &argv(&["add", "--user", "sam", "--category", "Food", "--amount", "1"]),
            &db,
            || Ok("wrong".to_string()),
        )
        .unwrap_err();
        assert!(is_user_facing(&err));
        assert!(db.load_expenses().unwrap().is_empty());
    }

    #[test]
    fn test_help_needs_no_user() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::open(dir.path()).unwrap();
        dispatch(&argv(&["help"]), &db, || Err(anyhow::anyhow!("no prompt expected"))).unwrap();
    }

    #[test]
    fn test_user_errors_propagate_as_typed() {
        let (_dir, db) = open_with_user();
        let err = dispatch(
            &argv(&["add", "--user", "sam", "--category", "Food", "--amount", "lots"]),
            &db,
            secret,
        )
        .unwrap_err();
        assert!(is_user_facing(&err));
    }

    #[test]
    fn test_login_checks_password() {
        let (_dir, db) = open_with_user();
        dispatch(&argv(&["login", "sam"]), &db, secret).unwrap();
        assert!(dispatch(&argv(&["login", "sam"]), &db, || Ok("nope".into())).is_err());
    }

    #[test]
    fn test_username_from_args() {
        assert_eq!(username_arg(&argv(&["alice"])[1..]).unwrap(), "alice");
    }
}
