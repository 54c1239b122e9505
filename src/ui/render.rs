//! Plain-text views of the expense data.

use crate::db::MalformedField;
use crate::models::{Category, Expense};
use crate::query;

use super::util::{bar, format_amount, pad, truncate};

const DESCRIPTION_WIDTH: usize = 40;
const CHART_WIDTH: usize = 30;

pub(crate) fn expense_table(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.\n".into();
    }

    let cat_width = expenses
        .iter()
        .map(|e| e.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());
    let amounts: Vec<String> = expenses.iter().map(|e| format_amount(e.amount)).collect();
    let amt_width = amounts
        .iter()
        .map(|a| a.len())
        .max()
        .unwrap_or(0)
        .max("Amount".len());

    let mut out = format!(
        "{:>5}  {:<10}  {}  {:>amt_width$}  Description\n",
        "ID",
        "Date",
        pad("Category", cat_width),
        "Amount",
    );
    out.push_str(&format!(
        "{}\n",
        "─".repeat(5 + 2 + 10 + 2 + cat_width + 2 + amt_width + 2 + "Description".len())
    ));
    for (expense, amount) in expenses.iter().zip(&amounts) {
        out.push_str(&format!(
            "{:>5}  {:<10}  {}  {:>amt_width$}  {}\n",
            expense.id,
            truncate(&expense.date, 10),
            pad(&expense.category, cat_width),
            amount,
            truncate(&expense.description, DESCRIPTION_WIDTH),
        ));
    }
    out
}

/// Total, record count and per-category quick totals, largest first.
pub(crate) fn dashboard(expenses: &[Expense]) -> String {
    let mut out = String::from("Dashboard Overview\n");
    out.push_str(&format!(
        "  Total Expenses: {}\n",
        format_amount(query::grand_total(expenses))
    ));
    out.push_str(&format!("  Records:        {}\n", expenses.len()));

    let ranked = query::ranked_totals(expenses);
    if !ranked.is_empty() {
        let line = ranked
            .iter()
            .map(|(name, total)| format!("[{name}: {}]", format_amount(*total)))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("\n  {line}\n"));
    }
    out
}

/// Total plus a bar per category, categories in alphabetical order.
pub(crate) fn summary_chart(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.\n".into();
    }

    let (labels, values) = query::chart_series(expenses);
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max = values.iter().copied().fold(0.0_f64, f64::max);

    let mut out = format!(
        "Total Expenses: {}\n\nExpenses by Category\n",
        format_amount(query::grand_total(expenses))
    );
    for (label, value) in labels.iter().zip(&values) {
        out.push_str(&format!(
            "  {} {:<CHART_WIDTH$} {}\n",
            pad(label, label_width),
            bar(*value, max, CHART_WIDTH),
            format_amount(*value),
        ));
    }
    out
}

pub(crate) fn category_list(categories: &[Category]) -> String {
    let mut out = String::from("Categories\n");
    for category in categories {
        out.push_str(&format!("  {category}\n"));
    }
    out
}

pub(crate) fn malformed_note(warnings: &[MalformedField]) -> Option<String> {
    if warnings.is_empty() {
        return None;
    }
    let mut out = format!(
        "Note: {} stored value(s) could not be read and are shown as 0:\n",
        warnings.len()
    );
    for w in warnings {
        out.push_str(&format!("  {w}\n"));
    }
    Some(out)
}
