mod aggregate;
mod filter;

pub(crate) use aggregate::{chart_series, grand_total, ranked_totals, totals_by_category};
pub(crate) use filter::ExpenseFilter;

#[cfg(test)]
mod tests;
