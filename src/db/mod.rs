mod normalize;
mod schema;
mod table;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::models::*;

pub(crate) use normalize::{MalformedField, Normalized};
use normalize::RawExpense;
use schema::{ExpenseSchema, CATEGORY_COLUMNS, EXPENSE_COLUMNS, USER_COLUMNS};
use table::RawTable;

/// The three CSV tables that make up a data directory.
///
/// Every call re-reads the backing file. Sequences that read a table and then write it
/// hold `lock` for their whole duration.
pub(crate) struct Database {
    expenses_path: PathBuf,
    categories_path: PathBuf,
    users_path: PathBuf,
    lock: Mutex<()>,
}

impl Database {
    /// Open the tables in `dir`, creating any that are missing and migrating an old
    /// expense table.
    pub(crate) fn open(dir: &Path) -> Result<Self> {
        let db = Self {
            expenses_path: dir.join(schema::EXPENSES_FILE),
            categories_path: dir.join(schema::CATEGORIES_FILE),
            users_path: dir.join(schema::USERS_FILE),
            lock: Mutex::new(()),
        };
        db.ensure_initialized()?;
        db.seed_default_categories()?;
        db.ensure_users_table()?;
        tracing::debug!(dir = %dir.display(), "opened data directory");
        Ok(db)
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| Error::LockPoisoned)
    }

    // ── Expenses ──────────────────────────────────────────────

    /// Create the expense table if needed and bring an existing one to the canonical
    /// schema. Safe to call any number of times.
    pub(crate) fn ensure_initialized(&self) -> Result<()> {
        let _guard = self.guard()?;
        self.init_expenses()?;
        Ok(())
    }

    /// Returns the table as it stands after any migration.
    fn init_expenses(&self) -> Result<RawTable> {
        let path = &self.expenses_path;
        if table::is_blank(path) {
            table::rewrite(path, &EXPENSE_COLUMNS, Vec::new())?;
            tracing::info!(path = %path.display(), "created expense table");
            return Ok(canonical_empty());
        }

        let current = table::read(path)?;
        match ExpenseSchema::detect(&current) {
            ExpenseSchema::Canonical => Ok(current),
            ExpenseSchema::Missing => {
                table::rewrite(path, &EXPENSE_COLUMNS, Vec::new())?;
                Ok(canonical_empty())
            }
            schema @ (ExpenseSchema::Legacy | ExpenseSchema::Reordered) => {
                let migrated = schema::to_canonical(&current, schema);
                table::rewrite(path, &migrated.headers, migrated.rows.clone())?;
                tracing::info!(
                    ?schema,
                    rows = migrated.rows.len(),
                    extra_columns = migrated.headers.len() - EXPENSE_COLUMNS.len(),
                    "migrated expense table"
                );
                Ok(migrated)
            }
        }
    }

    fn read_expenses(&self) -> Result<Normalized> {
        let table = self.init_expenses()?;
        Ok(normalize::normalize_all(normalize::raw_expenses(&table)))
    }

    /// All expenses in storage order.
    pub(crate) fn load_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.load_expenses_checked()?.expenses)
    }

    /// Like [`Database::load_expenses`], but also returns the stored values that had
    /// to be replaced by zero.
    pub(crate) fn load_expenses_checked(&self) -> Result<Normalized> {
        let _guard = self.guard()?;
        self.read_expenses()
    }

    /// The id the next created expense will get. Nothing is reserved.
    pub(crate) fn next_expense_id(&self) -> Result<i64> {
        let _guard = self.guard()?;
        next_id(&self.read_expenses()?.expenses)
    }

    pub(crate) fn create_expense(&self, input: &ExpenseInput) -> Result<Expense> {
        let fields = input.validate()?;

        let _guard = self.guard()?;
        let table = self.init_expenses()?;
        let id = next_id(&normalize::normalize_all(normalize::raw_expenses(&table)).expenses)?;
        let expense = Expense::from_fields(id, fields);

        let mut row = RawExpense::from(&expense).into_row();
        row.resize(row.len().max(table.headers.len()), String::new());
        table::append(&self.expenses_path, &table.headers, &row)?;

        tracing::info!(id, category = %expense.category, "created expense");
        Ok(expense)
    }

    /// Rewrites the matching row in place. Other rows, and any columns beyond the
    /// canonical five, are written back exactly as read.
    pub(crate) fn update_expense(&self, id: i64, input: &ExpenseInput) -> Result<Expense> {
        let fields = input.validate()?;

        let _guard = self.guard()?;
        let mut table = self.init_expenses()?;
        let expenses = normalize::normalize_all(normalize::raw_expenses(&table)).expenses;
        let pos = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(Error::NotFound(id))?;

        let mut updated = expenses[pos].clone();
        updated.apply(fields);
        replace_canonical(&mut table.rows[pos], RawExpense::from(&updated));

        table::rewrite(&self.expenses_path, &table.headers, table.rows)?;
        tracing::info!(id, "updated expense");
        Ok(updated)
    }

    /// Returns whether a row was removed. An unknown id leaves the file untouched.
    pub(crate) fn delete_expense(&self, id: i64) -> Result<bool> {
        let _guard = self.guard()?;
        let table = self.init_expenses()?;
        let expenses = normalize::normalize_all(normalize::raw_expenses(&table)).expenses;
        if !expenses.iter().any(|e| e.id == id) {
            tracing::debug!(id, "delete skipped, no such expense");
            return Ok(false);
        }

        let kept = table
            .rows
            .into_iter()
            .zip(&expenses)
            .filter(|(_, e)| e.id != id)
            .map(|(row, _)| row);
        table::rewrite(&self.expenses_path, &table.headers, kept)?;
        tracing::info!(id, "deleted expense");
        Ok(true)
    }

    // ── Categories ────────────────────────────────────────────

    fn seed_default_categories(&self) -> Result<()> {
        let _guard = self.guard()?;
        self.init_categories()
    }

    fn init_categories(&self) -> Result<()> {
        if !table::is_blank(&self.categories_path) {
            return Ok(());
        }
        table::rewrite(
            &self.categories_path,
            &CATEGORY_COLUMNS,
            DEFAULT_CATEGORIES.iter().map(|c| vec![c.to_string()]),
        )?;
        tracing::info!("seeded default categories");
        Ok(())
    }

    fn read_categories(&self) -> Result<Vec<Category>> {
        self.init_categories()?;
        let table = table::read(&self.categories_path)?;
        let col = table.column("category").or(Some(0));
        Ok(table
            .rows
            .iter()
            .filter_map(|row| Category::new(table.field(row, col)).ok())
            .collect())
    }

    /// Categories in insertion order.
    pub(crate) fn load_categories(&self) -> Result<Vec<Category>> {
        let _guard = self.guard()?;
        self.read_categories()
    }

    pub(crate) fn add_category(&self, name: &str) -> Result<Category> {
        let category = Category::new(name)?;

        let _guard = self.guard()?;
        let existing = self.read_categories()?;
        if Category::find_by_name(&existing, &category.name).is_some() {
            return Err(Error::CategoryExists(category.name));
        }
        table::append(
            &self.categories_path,
            &CATEGORY_COLUMNS,
            std::slice::from_ref(&category.name),
        )?;

        tracing::info!(name = %category.name, "added category");
        Ok(category)
    }

    // ── Users ─────────────────────────────────────────────────

    fn ensure_users_table(&self) -> Result<()> {
        let _guard = self.guard()?;
        if table::is_blank(&self.users_path) {
            table::rewrite(&self.users_path, &USER_COLUMNS, Vec::new())?;
            tracing::info!("created credentials table");
        }
        Ok(())
    }

    fn read_credentials(&self) -> Result<Vec<Credential>> {
        if table::is_blank(&self.users_path) {
            return Ok(Vec::new());
        }
        let table = table::read(&self.users_path)?;
        let user_col = table.column("username");
        let hash_col = table
            .column("password_hash")
            .or_else(|| table.column(schema::LEGACY_PASSWORD_COLUMN));

        Ok(table
            .rows
            .iter()
            .map(|row| Credential {
                username: table.field(row, user_col).to_string(),
                password_hash: PasswordHash::from_stored(table.field(row, hash_col)),
            })
            .collect())
    }

    pub(crate) fn signup(&self, username: &str, password: &str) -> Result<()> {
        let credential = Credential::new(username, password)?;

        let _guard = self.guard()?;
        if self
            .read_credentials()?
            .iter()
            .any(|c| c.username == credential.username)
        {
            return Err(Error::UserExists(credential.username));
        }
        table::append(
            &self.users_path,
            &USER_COLUMNS,
            &[
                credential.username.clone(),
                credential.password_hash.to_string(),
            ],
        )?;

        tracing::info!(username = %credential.username, "registered user");
        Ok(())
    }

    /// One-shot check of `password` against the stored digest for `username`.
    pub(crate) fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let _guard = self.guard()?;
        let ok = self
            .read_credentials()?
            .iter()
            .any(|c| c.username == username && c.password_hash.verify(password));
        tracing::debug!(username, ok, "authentication attempt");
        Ok(ok)
    }
}

fn canonical_empty() -> RawTable {
    RawTable {
        headers: EXPENSE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: Vec::new(),
    }
}

/// `max(id) + 1`, or 1 for an empty table. Never below 1, so stray non-positive ids
/// in the file cannot produce one.
pub(crate) fn next_id(expenses: &[Expense]) -> Result<i64> {
    match expenses.iter().map(|e| e.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .map(|id| id.max(1))
            .ok_or_else(|| Error::Validation("expense id space exhausted".into())),
    }
}

/// Overwrite the canonical leading cells of a stored row, keeping any trailing cells.
fn replace_canonical(row: &mut Vec<String>, raw: RawExpense) {
    let canonical = raw.into_row();
    if row.len() < canonical.len() {
        row.resize(canonical.len(), String::new());
    }
    for (cell, value) in row.iter_mut().zip(canonical) {
        *cell = value;
    }
}
