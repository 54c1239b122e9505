#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::Expense;

fn make_expense(id: i64, date: &str, category: &str, amount: f64, description: &str) -> Expense {
    Expense {
        id,
        date: date.into(),
        category: category.into(),
        amount,
        description: description.into(),
    }
}

fn two_expenses() -> Vec<Expense> {
    vec![
        make_expense(1, "2024-01-05", "Food", 12.0, "Lunch with Sam"),
        make_expense(2, "2024-02-01", "Rent", 900.0, "February rent"),
    ]
}

// ── ExpenseFilter ─────────────────────────────────────────────

#[test]
fn test_empty_filter_keeps_everything() {
    let expenses = two_expenses();
    let filter = ExpenseFilter::default();
    assert!(filter.is_empty());
    assert_eq!(filter.apply(&expenses), expenses);
}

#[test]
fn test_filter_by_category() {
    let filter = ExpenseFilter::from_inputs(Some("Food"), None, None, None);
    let result = filter.apply(&two_expenses());
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
}

#[test]
fn test_category_match_is_exact() {
    let filter = ExpenseFilter::from_inputs(Some("food"), None, None, None);
    assert!(filter.apply(&two_expenses()).is_empty());
}

#[test]
fn test_filter_date_from_is_inclusive() {
    let filter = ExpenseFilter::from_inputs(None, Some("2024-02-01"), None, None);
    let result = filter.apply(&two_expenses());
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 2);
}

#[test]
fn test_filter_date_to_is_inclusive() {
    let filter = ExpenseFilter::from_inputs(None, None, Some("2024-01-05"), None);
    let result = filter.apply(&two_expenses());
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
}

#[test]
fn test_filter_combined_predicates_and() {
    let filter = ExpenseFilter::from_inputs(Some("Food"), Some("2024-02-01"), None, None);
    assert!(filter.apply(&two_expenses()).is_empty());
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let expenses = two_expenses();

    let by_description = ExpenseFilter::from_inputs(None, None, None, Some("SAM"));
    assert_eq!(by_description.apply(&expenses)[0].id, 1);

    let by_category = ExpenseFilter::from_inputs(None, None, None, Some("rEnT"));
    let result = by_category.apply(&expenses);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 2);

    let by_date = ExpenseFilter::from_inputs(None, None, None, Some("2024-02"));
    assert_eq!(by_date.apply(&expenses)[0].id, 2);

    let none = ExpenseFilter::from_inputs(None, None, None, Some("groceries"));
    assert!(none.apply(&expenses).is_empty());
}

#[test]
fn test_blank_inputs_are_unset() {
    let filter = ExpenseFilter::from_inputs(Some("  "), Some(""), None, Some(" "));
    assert!(filter.is_empty());
}

#[test]
fn test_filter_preserves_order() {
    let expenses = vec![
        make_expense(5, "2024-03-01", "Food", 1.0, ""),
        make_expense(2, "2024-01-01", "Food", 2.0, ""),
        make_expense(9, "2024-02-01", "Food", 3.0, ""),
    ];
    let filter = ExpenseFilter::from_inputs(Some("Food"), None, None, None);
    let ids: Vec<i64> = filter.apply(&expenses).iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![5, 2, 9]);
}

// ── Aggregation ───────────────────────────────────────────────

fn sample_for_totals() -> Vec<Expense> {
    vec![
        make_expense(1, "2024-01-01", "Food", 10.0, ""),
        make_expense(2, "2024-01-02", "Food", 5.0, ""),
        make_expense(3, "2024-01-03", "Rent", 20.0, ""),
    ]
}

#[test]
fn test_totals_by_category() {
    let totals = totals_by_category(&sample_for_totals());
    assert_eq!(totals.len(), 2);
    assert_eq!(totals["Food"], 15.0);
    assert_eq!(totals["Rent"], 20.0);
    assert!(!totals.contains_key("Travel"));
}

#[test]
fn test_totals_empty() {
    assert!(totals_by_category(&[]).is_empty());
    assert_eq!(grand_total(&[]), 0.0);
}

#[test]
fn test_ranked_totals_descending() {
    let ranked = ranked_totals(&sample_for_totals());
    assert_eq!(
        ranked,
        vec![("Rent".to_string(), 20.0), ("Food".to_string(), 15.0)]
    );
}

#[test]
fn test_ranked_totals_ties_alphabetical() {
    let expenses = vec![
        make_expense(1, "2024-01-01", "Travel", 7.0, ""),
        make_expense(2, "2024-01-01", "Books", 7.0, ""),
    ];
    let names: Vec<String> = ranked_totals(&expenses).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Books", "Travel"]);
}

#[test]
fn test_chart_series_alphabetical() {
    let (labels, values) = chart_series(&sample_for_totals());
    assert_eq!(labels, vec!["Food", "Rent"]);
    assert_eq!(values, vec![15.0, 20.0]);
}

#[test]
fn test_grand_total() {
    assert_eq!(grand_total(&sample_for_totals()), 35.0);
}
