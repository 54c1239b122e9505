use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static DATE_SHAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").ok());

/// One persisted expense row, after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub description: String,
}

/// Raw field values as collected from the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct ExpenseInput {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

/// Validated, trimmed field values ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub description: String,
}

impl ExpenseInput {
    pub fn new(date: &str, category: &str, amount: &str, description: &str) -> Self {
        Self {
            date: date.to_string(),
            category: category.to_string(),
            amount: amount.to_string(),
            description: description.to_string(),
        }
    }

    pub fn validate(&self) -> Result<ExpenseFields> {
        let date = self.date.trim();
        let category = self.category.trim();
        let amount = self.amount.trim();

        if date.is_empty() || category.is_empty() || amount.is_empty() {
            return Err(Error::Validation(
                "date, category and amount are required".into(),
            ));
        }
        if !is_iso_date(date) {
            return Err(Error::Validation(format!(
                "date '{date}' is not in YYYY-MM-DD form"
            )));
        }
        let amount = match amount.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                return Err(Error::Validation(format!(
                    "amount '{amount}' is not a number"
                )))
            }
        };

        Ok(ExpenseFields {
            date: date.to_string(),
            category: category.to_string(),
            amount,
            description: self.description.trim().to_string(),
        })
    }
}

impl Expense {
    pub fn from_fields(id: i64, fields: ExpenseFields) -> Self {
        Self {
            id,
            date: fields.date,
            category: fields.category,
            amount: fields.amount,
            description: fields.description,
        }
    }

    /// Replace every field except the id.
    pub fn apply(&mut self, fields: ExpenseFields) {
        self.date = fields.date;
        self.category = fields.category;
        self.amount = fields.amount;
        self.description = fields.description;
    }

    /// Lexical form used when the row is written back to disk.
    pub fn to_input(&self) -> ExpenseInput {
        ExpenseInput {
            date: self.date.clone(),
            category: self.category.clone(),
            amount: format_stored_amount(self.amount),
            description: self.description.clone(),
        }
    }
}

/// Checks the lexical `YYYY-MM-DD` shape only; `2024-02-31` passes.
pub fn is_iso_date(s: &str) -> bool {
    DATE_SHAPE.as_ref().is_some_and(|re| re.is_match(s))
}

/// Amounts are stored with at least one decimal place, so `10` is written as `10.0`.
pub fn format_stored_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{amount:.1}")
    } else {
        amount.to_string()
    }
}
