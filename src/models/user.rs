use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Lowercase hex SHA-256 digest of a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn from_raw_password(raw: &str) -> Self {
        Self(format!("{:x}", Sha256::digest(raw.as_bytes())))
    }

    /// Wrap a digest read back from the credentials table.
    pub fn from_stored(digest: &str) -> Self {
        Self(digest.trim().to_string())
    }

    pub fn verify(&self, raw: &str) -> bool {
        *self == Self::from_raw_password(raw)
    }
}

impl std::fmt::Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password_hash: PasswordHash,
}

impl Credential {
    /// Both fields must contain something other than whitespace. The username is
    /// stored exactly as given.
    pub fn new(username: &str, password: &str) -> Result<Self> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(Error::Validation(
                "username and password cannot be empty".into(),
            ));
        }
        Ok(Self {
            username: username.to_string(),
            password_hash: PasswordHash::from_raw_password(password),
        })
    }
}
