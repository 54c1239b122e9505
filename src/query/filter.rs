use crate::models::Expense;

/// Optional predicates over expenses. Every clause that is set must match.
///
/// Dates compare as strings, which orders correctly because they are stored as
/// zero-padded `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExpenseFilter {
    pub(crate) category: Option<String>,
    pub(crate) date_from: Option<String>,
    pub(crate) date_to: Option<String>,
    pub(crate) search: Option<String>,
}

impl ExpenseFilter {
    /// Build a filter from raw text fields. Blank fields are treated as unset.
    pub(crate) fn from_inputs(
        category: Option<&str>,
        date_from: Option<&str>,
        date_to: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        Self {
            category: non_blank(category),
            date_from: non_blank(date_from),
            date_to: non_blank(date_to),
            search: non_blank(search),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn matches(&self, expense: &Expense) -> bool {
        if let Some(cat) = &self.category {
            if expense.category != *cat {
                return false;
            }
        }
        if let Some(from) = &self.date_from {
            if expense.date.as_str() < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.date_to {
            if expense.date.as_str() > to.as_str() {
                return false;
            }
        }
        if let Some(q) = &self.search {
            let q = q.to_lowercase();
            let hit = [&expense.description, &expense.category, &expense.date]
                .iter()
                .any(|field| field.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        true
    }

    /// The matching expenses, in their original order.
    pub(crate) fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
