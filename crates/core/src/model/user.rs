use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Minimum number of characters in a trimmed display name.
pub const MIN_USERNAME_LEN: usize = 3;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum UsernameError {
    #[error("Please enter your name")]
    EmptyName,
    #[error("Name must be at least 3 characters")]
    NameTooShort,
}

/// A trimmed display name of at least [`MIN_USERNAME_LEN`] characters.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate a freeform name as typed on the login screen.
    ///
    /// # Errors
    ///
    /// Returns `UsernameError::EmptyName` when the input is blank after trimming
    /// and `UsernameError::NameTooShort` when fewer than three characters remain.
    pub fn parse(raw: &str) -> Result<Self, UsernameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UsernameError::EmptyName);
        }
        if trimmed.chars().count() < MIN_USERNAME_LEN {
            return Err(UsernameError::NameTooShort);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased first character, used for the avatar badge.
    #[must_use]
    pub fn initial(&self) -> String {
        self.0
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username({:?})", self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The person taking the quiz, held from login to logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    login_time: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn new(username: Username, login_time: DateTime<Utc>) -> Self {
        Self {
            username,
            login_time,
        }
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn login_time(&self) -> DateTime<Utc> {
        self.login_time
    }
}
