/// The errors the storage layer reports back to the interface.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// A required field was blank or could not be interpreted.
    #[error("{0}")]
    Validation(String),

    /// An update targeted an id that is not in the expense table.
    #[error("no expense with id {0}")]
    NotFound(i64),

    #[error("the category \"{0}\" already exists")]
    CategoryExists(String),

    #[error("the username \"{0}\" is already taken")]
    UserExists(String),

    #[error("could not read or write a table: {0}")]
    Csv(#[from] csv::Error),

    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not acquire the table lock")]
    LockPoisoned,
}

impl Error {
    /// Errors caused by what the user typed, as opposed to a broken data directory.
    pub(crate) fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::CategoryExists(_) | Self::UserExists(_)
        )
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
