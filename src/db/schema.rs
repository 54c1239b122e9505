use super::table::RawTable;

pub(crate) const EXPENSES_FILE: &str = "expenses.csv";
pub(crate) const CATEGORIES_FILE: &str = "categories.csv";
pub(crate) const USERS_FILE: &str = "users.csv";

/// Canonical field order of the expense table.
pub(crate) const EXPENSE_COLUMNS: [&str; 5] = ["id", "date", "category", "amount", "description"];
pub(crate) const CATEGORY_COLUMNS: [&str; 1] = ["category"];
pub(crate) const USER_COLUMNS: [&str; 2] = ["username", "password_hash"];

/// Column name older credential files used for the digest.
pub(crate) const LEGACY_PASSWORD_COLUMN: &str = "password";

/// Shape of an expense table as found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpenseSchema {
    /// Zero-length file, or no file at all.
    Missing,
    /// Rows written before expenses carried an id.
    Legacy,
    /// Has an id column, but the canonical columns are not the leading ones in order.
    Reordered,
    /// Starts with the canonical columns. Anything after them is left alone.
    Canonical,
}

impl ExpenseSchema {
    pub(crate) fn detect(table: &RawTable) -> Self {
        if table.headers.is_empty() {
            Self::Missing
        } else if table.column("id").is_none() {
            Self::Legacy
        } else if table.headers.len() >= EXPENSE_COLUMNS.len()
            && table
                .headers
                .iter()
                .zip(EXPENSE_COLUMNS)
                .all(|(h, c)| h.eq_ignore_ascii_case(c))
        {
            Self::Canonical
        } else {
            Self::Reordered
        }
    }
}

/// Rebuild `table` with the canonical columns first.
///
/// Legacy tables get sequential ids `1..=N` in row order; tables that already carry
/// ids keep them. Columns are matched by name, and a column missing from the file
/// comes out empty. Columns that are not part of the canonical set follow in their
/// original order, values untouched.
pub(crate) fn to_canonical(table: &RawTable, schema: ExpenseSchema) -> RawTable {
    let extra: Vec<usize> = (0..table.headers.len())
        .filter(|&i| {
            !EXPENSE_COLUMNS
                .iter()
                .any(|c| table.headers[i].trim().eq_ignore_ascii_case(c))
        })
        .collect();
    let cols: Vec<Option<usize>> = EXPENSE_COLUMNS
        .iter()
        .map(|name| table.column(name))
        .chain(extra.iter().map(|&i| Some(i)))
        .collect();

    let headers = EXPENSE_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(extra.iter().map(|&i| table.headers[i].clone()))
        .collect();
    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            cols.iter()
                .enumerate()
                .map(|(pos, col)| {
                    if pos == 0 && schema == ExpenseSchema::Legacy {
                        (i + 1).to_string()
                    } else {
                        table.field(row, *col).to_string()
                    }
                })
                .collect()
        })
        .collect();

    RawTable { headers, rows }
}
