use anyhow::Result;

use crate::db::Database;
use crate::ui::commands;
use crate::ui::prompt::{ask, ask_password};
use crate::ui::render;
use crate::ui::util::split_line;

use super::report;

pub(crate) fn as_shell(db: &Database) -> Result<()> {
    println!("Personal Expense Tracker");
    println!();

    let Some(username) = sign_in(db)? else {
        return Ok(());
    };
    tracing::info!(user = %username, "signed in");
    println!("Welcome, {username}! Type `help` for commands, `quit` to leave.");
    println!();
    print!("{}", render::dashboard(&db.load_expenses()?));

    loop {
        let Some(line) = ask("> ")? else {
            println!();
            break;
        };
        let words = split_line(&line);
        match words.first().map(String::as_str) {
            None => continue,
            Some("quit" | "exit" | "q") => break,
            Some(_) => {}
        }
        // A failed command never ends the session.
        if let Err(err) = commands::handle_command(&words, db) {
            report(&err);
        }
    }
    Ok(())
}

/// Loop on the login screen until a login succeeds. `None` if the user quits.
fn sign_in(db: &Database) -> Result<Option<String>> {
    loop {
        let Some(choice) = ask("[l]ogin, [s]ignup or [q]uit: ")? else {
            println!();
            return Ok(None);
        };
        match choice.trim() {
            "l" | "login" => {
                let Some((username, password)) = read_credentials()? else {
                    continue;
                };
                if db.authenticate(&username, &password)? {
                    return Ok(Some(username));
                }
                println!("Invalid username or password.");
            }
            "s" | "signup" => {
                let Some((username, password)) = read_credentials()? else {
                    continue;
                };
                match db.signup(&username, &password) {
                    Ok(()) => println!("Account created. You can log in now."),
                    Err(err) => report(&err.into()),
                }
            }
            "q" | "quit" => return Ok(None),
            "" => {}
            other => println!("Unknown choice: {other}"),
        }
    }
}

fn read_credentials() -> Result<Option<(String, String)>> {
    let Some(username) = ask("Username: ")? else {
        return Ok(None);
    };
    let Some(password) = ask_password("Password: ")? else {
        return Ok(None);
    };
    Ok(Some((username, password)))
}
