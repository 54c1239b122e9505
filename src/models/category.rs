use crate::error::{Error, Result};

/// Seeded into a fresh category table.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Shopping",
    "Travel",
    "Rent",
    "Entertainment",
    "Others",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
}

impl Category {
    /// Trims `name` and rejects it if nothing is left.
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("category name cannot be empty".into()));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Find a category by exact name in a slice.
    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.name == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
