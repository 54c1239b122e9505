use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::Result;

use super::prompt::{ask, confirm};
use super::render;
use super::util::{flag, has_switch, positional};
use crate::db::Database;
use crate::error::Error;
use crate::models::{Category, ExpenseInput};
use crate::query::ExpenseFilter;

pub(crate) struct Command {
    pub(crate) usage: &'static str,
    pub(crate) description: &'static str,
    pub(crate) run: fn(&[String], &Database) -> Result<()>,
}

macro_rules! register_command {
    ($name:expr, $usage:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                usage: $usage,
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("dashboard", "dashboard", "Show totals and per-category quick totals", cmd_dashboard, r);
    register_command!("d", "d", "Show totals and per-category quick totals", cmd_dashboard, r);
    register_command!(
        "add",
        "add [--date YYYY-MM-DD] --category <name> --amount <n> [--desc <text>]",
        "Record an expense (prompts for each field when given no flags)",
        cmd_add,
        r
    );
    register_command!("a", "a", "Record an expense", cmd_add, r);
    register_command!("history", "history", "List every expense in the order recorded", cmd_history, r);
    register_command!("list", "list", "List every expense in the order recorded", cmd_history, r);
    register_command!(
        "filter",
        "filter [--category <name>|All] [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--search <text>]",
        "Show expenses matching every given filter",
        cmd_filter,
        r
    );
    register_command!("f", "f", "Show expenses matching every given filter", cmd_filter, r);
    register_command!(
        "update",
        "update <id> [--date ..] [--category ..] [--amount ..] [--desc ..]",
        "Change an expense (prompts with the stored values when given no flags)",
        cmd_update,
        r
    );
    register_command!("u", "u <id>", "Change an expense", cmd_update, r);
    register_command!("delete", "delete <id> [--yes]", "Delete an expense after confirming", cmd_delete, r);
    register_command!("summary", "summary", "Total and a bar chart by category", cmd_summary, r);
    register_command!("s", "s", "Total and a bar chart by category", cmd_summary, r);
    register_command!("categories", "categories", "List categories", cmd_categories, r);
    register_command!("c", "c", "List categories", cmd_categories, r);
    register_command!("category", "category <name>", "Add a category", cmd_add_category, r);
    register_command!("add-category", "add-category <name>", "Add a category", cmd_add_category, r);
    register_command!("next-id", "next-id", "Show the id the next expense will get", cmd_next_id, r);
    register_command!("help", "help", "Show available commands", cmd_help, r);
    register_command!("h", "h", "Show available commands", cmd_help, r);

    r
});

/// Run the command named by `words[0]` with the remaining words as its arguments.
pub(crate) fn handle_command(words: &[String], db: &Database) -> Result<()> {
    let Some((name, args)) = words.split_first() else {
        return Ok(());
    };

    if let Some(cmd) = COMMANDS.get(name.as_str()) {
        (cmd.run)(args, db)?;
    } else {
        let suggestion = find_closest(name);
        println!("Unknown command: {name}. Did you mean {suggestion}?");
    }
    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Every registered command with its description, single-letter aliases left out.
pub(crate) fn help_text() -> String {
    let mut names: Vec<&&str> = COMMANDS.keys().filter(|k| k.len() > 1).collect();
    names.sort();

    let mut out = String::from("Commands:\n");
    for name in names {
        if let Some(cmd) = COMMANDS.get(*name) {
            out.push_str(&format!("  {:<28} {}\n", cmd.usage, cmd.description));
        }
    }
    out
}

// ── Command implementations ──────────────────────────────────

fn cmd_dashboard(_args: &[String], db: &Database) -> Result<()> {
    let expenses = db.load_expenses()?;
    print!("{}", render::dashboard(&expenses));
    Ok(())
}

fn cmd_history(_args: &[String], db: &Database) -> Result<()> {
    let loaded = db.load_expenses_checked()?;
    print!("{}", render::expense_table(&loaded.expenses));
    if let Some(note) = render::malformed_note(&loaded.warnings) {
        print!("{note}");
    }
    Ok(())
}

fn cmd_add(args: &[String], db: &Database) -> Result<()> {
    let categories = db.load_categories()?;

    let input = if args.is_empty() {
        match ask_expense_fields(&ExpenseInput::new(&today(), "", "", ""), &categories)? {
            Some(input) => input,
            None => return Ok(()),
        }
    } else {
        ExpenseInput::new(
            flag(args, "--date").map_or_else(today, str::to_string).as_str(),
            flag(args, "--category").unwrap_or_default(),
            flag(args, "--amount").unwrap_or_default(),
            flag(args, "--desc").unwrap_or_default(),
        )
    };

    check_known_category(&categories, &input.category)?;
    let expense = db.create_expense(&input)?;
    println!("Expense added (id {}).", expense.id);
    Ok(())
}

fn cmd_filter(args: &[String], db: &Database) -> Result<()> {
    let category = flag(args, "--category").filter(|c| *c != "All");
    let filter = ExpenseFilter::from_inputs(
        category,
        flag(args, "--from"),
        flag(args, "--to"),
        flag(args, "--search"),
    );

    let expenses = db.load_expenses()?;
    let matched = filter.apply(&expenses);
    print!("{}", render::expense_table(&matched));
    if !filter.is_empty() {
        println!("{} of {} expenses match.", matched.len(), expenses.len());
    }
    Ok(())
}

fn cmd_update(args: &[String], db: &Database) -> Result<()> {
    let id = parse_id(args)?;
    let current = db
        .load_expenses()?
        .into_iter()
        .find(|e| e.id == id)
        .ok_or(Error::NotFound(id))?;
    let categories = db.load_categories()?;

    let stored = current.to_input();
    let has_fields = ["--date", "--category", "--amount", "--desc"]
        .iter()
        .any(|f| flag(args, f).is_some());
    let input = if has_fields {
        ExpenseInput::new(
            flag(args, "--date").unwrap_or(stored.date.as_str()),
            flag(args, "--category").unwrap_or(stored.category.as_str()),
            flag(args, "--amount").unwrap_or(stored.amount.as_str()),
            flag(args, "--desc").unwrap_or(stored.description.as_str()),
        )
    } else {
        match ask_expense_fields(&stored, &categories)? {
            Some(input) => input,
            None => return Ok(()),
        }
    };

    // A stored category may predate the category table; only a new one is checked.
    if input.category.trim() != stored.category {
        check_known_category(&categories, &input.category)?;
    }
    db.update_expense(id, &input)?;
    println!("Expense {id} updated.");
    Ok(())
}

fn cmd_delete(args: &[String], db: &Database) -> Result<()> {
    let id = parse_id(args)?;
    if !has_switch(args, "--yes") && !confirm(&format!("Delete expense {id}?"))? {
        println!("Cancelled.");
        return Ok(());
    }

    if db.delete_expense(id)? {
        println!("Expense {id} deleted.");
    } else {
        println!("No expense with id {id}; nothing deleted.");
    }
    Ok(())
}

fn cmd_summary(_args: &[String], db: &Database) -> Result<()> {
    let expenses = db.load_expenses()?;
    print!("{}", render::summary_chart(&expenses));
    Ok(())
}

fn cmd_categories(_args: &[String], db: &Database) -> Result<()> {
    print!("{}", render::category_list(&db.load_categories()?));
    Ok(())
}

fn cmd_add_category(args: &[String], db: &Database) -> Result<()> {
    // Allow unquoted names with spaces: `category Eating Out`
    let name = args.join(" ");
    let category = db.add_category(&name)?;
    println!("Category added: {category}");
    Ok(())
}

fn cmd_next_id(_args: &[String], db: &Database) -> Result<()> {
    println!("{}", db.next_expense_id()?);
    Ok(())
}

fn cmd_help(_args: &[String], _db: &Database) -> Result<()> {
    print!("{}", help_text());
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn parse_id(args: &[String]) -> Result<i64> {
    let raw = positional(args).ok_or_else(|| Error::Validation("an expense id is required".into()))?;
    let id = raw
        .parse::<i64>()
        .map_err(|_| Error::Validation(format!("'{raw}' is not a valid expense id")))?;
    Ok(id)
}

/// Expenses may only be filed under a category from the category table.
fn check_known_category(categories: &[Category], name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() || Category::find_by_name(categories, name).is_some() {
        return Ok(());
    }
    Err(Error::Validation(format!(
        "unknown category '{name}'; add it first with `category {name}`"
    ))
    .into())
}

/// Interactive form, one prompt per field. An empty answer keeps the value from
/// `defaults`. Returns `None` if input ends before the form is complete.
fn ask_expense_fields(defaults: &ExpenseInput, categories: &[Category]) -> Result<Option<ExpenseInput>> {
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    println!("Categories: {}", names.join(", "));

    let fields = [
        ("Date (YYYY-MM-DD)", &defaults.date),
        ("Category", &defaults.category),
        ("Amount", &defaults.amount),
        ("Description", &defaults.description),
    ];
    let mut answers = Vec::with_capacity(fields.len());
    for (label, default) in fields {
        let prompt = if default.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{default}]: ")
        };
        let Some(answer) = ask(&prompt)? else {
            println!();
            return Ok(None);
        };
        let answer = answer.trim();
        answers.push(if answer.is_empty() {
            default.clone()
        } else {
            answer.to_string()
        });
    }

    Ok(Some(ExpenseInput::new(
        &answers[0],
        &answers[1],
        &answers[2],
        &answers[3],
    )))
}
