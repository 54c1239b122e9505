//! Coerces stored expense fields to their semantic types.
//!
//! Values that cannot be read are replaced by zero rather than failing the load; each
//! replacement is reported as a [`MalformedField`] so callers can tell the user.

use crate::models::{format_stored_amount, Expense};

use super::table::RawTable;

/// One expense row exactly as stored.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawExpense {
    pub(crate) id: String,
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) amount: String,
    pub(crate) description: String,
}

impl RawExpense {
    pub(crate) fn into_row(self) -> Vec<String> {
        vec![
            self.id,
            self.date,
            self.category,
            self.amount,
            self.description,
        ]
    }
}

impl From<&Expense> for RawExpense {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id.to_string(),
            date: e.date.clone(),
            category: e.category.clone(),
            amount: format_stored_amount(e.amount),
            description: e.description.clone(),
        }
    }
}

/// A stored id or amount that could not be read and was replaced by zero.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MalformedField {
    /// 1-based data row, not counting the header.
    pub(crate) row: usize,
    pub(crate) column: &'static str,
    pub(crate) value: String,
}

impl std::fmt::Display for MalformedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {}: {} '{}' is not a number, read as 0",
            self.row, self.column, self.value
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Normalized {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) warnings: Vec<MalformedField>,
}

pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integers parse directly; a whole float such as `3.0` is accepted, anything with a
/// fractional part is malformed.
pub(crate) fn parse_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i64)
}

pub(crate) fn normalize_record(row: usize, raw: RawExpense) -> (Expense, Vec<MalformedField>) {
    let mut warnings = Vec::new();

    let id = parse_id(&raw.id).unwrap_or_else(|| {
        warnings.push(MalformedField {
            row,
            column: "id",
            value: raw.id.clone(),
        });
        0
    });
    let amount = parse_amount(&raw.amount).unwrap_or_else(|| {
        warnings.push(MalformedField {
            row,
            column: "amount",
            value: raw.amount.clone(),
        });
        0.0
    });

    let expense = Expense {
        id,
        date: raw.date,
        category: raw.category,
        amount,
        description: raw.description,
    };
    (expense, warnings)
}

pub(crate) fn normalize_all<I>(rows: I) -> Normalized
where
    I: IntoIterator<Item = RawExpense>,
{
    let mut out = Normalized::default();
    for (i, raw) in rows.into_iter().enumerate() {
        let (expense, warnings) = normalize_record(i + 1, raw);
        for w in &warnings {
            tracing::warn!("malformed expense field: {w}");
        }
        out.expenses.push(expense);
        out.warnings.extend(warnings);
    }
    out
}

/// Pull expense fields out of a table by column name.
pub(crate) fn raw_expenses(table: &RawTable) -> Vec<RawExpense> {
    let id = table.column("id");
    let date = table.column("date");
    let category = table.column("category");
    let amount = table.column("amount");
    let description = table.column("description");

    table
        .rows
        .iter()
        .map(|row| RawExpense {
            id: table.field(row, id).to_string(),
            date: table.field(row, date).to_string(),
            category: table.field(row, category).to_string(),
            amount: table.field(row, amount).to_string(),
            description: table.field(row, description).to_string(),
        })
        .collect()
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
