//! Category totals for the dashboard and the summary chart.

use std::collections::BTreeMap;

use crate::models::Expense;

/// Sum of amounts per category. Categories without expenses do not appear.
pub(crate) fn totals_by_category(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Category totals, largest first. Equal totals keep alphabetical order.
pub(crate) fn ranked_totals(expenses: &[Expense]) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = totals_by_category(expenses).into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Labels and values for a bar chart with category on the x axis, in alphabetical
/// order.
pub(crate) fn chart_series(expenses: &[Expense]) -> (Vec<String>, Vec<f64>) {
    totals_by_category(expenses).into_iter().unzip()
}

pub(crate) fn grand_total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}
