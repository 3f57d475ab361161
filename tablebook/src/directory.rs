//! Resolution of the acting user.
//!
//! Authentication happens outside the library. Front ends implement
//! [`UserDirectory`] to tell the allocator who is making a request.

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::user::UserId;

/// Identifies the user on whose behalf an operation runs.
#[cfg_attr(test, mockall::automock)]
pub trait UserDirectory {
    /// Returns the id of the current user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] if no current user can be determined.
    fn resolve_current_user_id(&self) -> Result<UserId>;
}

/// A reference to a user as typed by a person: a numeric id or an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserReference {
    /// A numeric user id.
    Id(UserId),
    /// An email address, matched case-insensitively.
    Email(String),
}

impl UserReference {
    /// Parses a reference. All-digit input is an id; anything else is an
    /// email.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::{UserId, UserReference};
    ///
    /// assert_eq!(UserReference::parse("42"), UserReference::Id(UserId::new(42)));
    /// assert_eq!(
    ///     UserReference::parse("ada@example.com"),
    ///     UserReference::Email("ada@example.com".into())
    /// );
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(id) if !trimmed.starts_with(['+', '-']) => Self::Id(UserId::new(id)),
            _ => Self::Email(trimmed.to_string()),
        }
    }

    /// Looks the reference up in the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] if no such user exists.
    pub fn resolve(&self, conn: &Connection) -> Result<UserId> {
        let found = match self {
            Self::Id(id) => Database::get_user(conn, *id)?,
            Self::Email(email) => Database::get_user_by_email(conn, email)?,
        };
        found.map(|user| user.id()).ok_or_else(|| Error::UserNotFound {
            reference: self.to_string(),
        })
    }
}

impl std::fmt::Display for UserReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Email(email) => f.write_str(email),
        }
    }
}

/// A directory that always answers with the same, already resolved user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticDirectory {
    user_id: UserId,
}

impl StaticDirectory {
    /// Creates a directory answering with `user_id`.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl UserDirectory for StaticDirectory {
    fn resolve_current_user_id(&self) -> Result<UserId> {
        Ok(self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, seed_user};

    #[test]
    fn test_parse_reference() {
        assert_eq!(UserReference::parse(" 7 "), UserReference::Id(UserId::new(7)));
        assert_eq!(
            UserReference::parse("-7"),
            UserReference::Email("-7".into())
        );
        assert!(matches!(
            UserReference::parse("a@b.io"),
            UserReference::Email(_)
        ));
    }

    #[test]
    fn test_resolve_by_id_and_email() {
        let mut db = create_test_database();
        let id = seed_user(&mut db, "ada@example.com");

        assert_eq!(
            UserReference::Id(id).resolve(db.connection()).unwrap(),
            id
        );
        assert_eq!(
            UserReference::parse("ADA@example.com")
                .resolve(db.connection())
                .unwrap(),
            id
        );
    }

    #[test]
    fn test_resolve_unknown_user() {
        let db = create_test_database();
        let err = UserReference::parse("ghost@example.com")
            .resolve(db.connection())
            .unwrap_err();
        assert!(matches!(err, Error::UserNotFound { ref reference } if reference == "ghost@example.com"));
    }

    #[test]
    fn test_static_directory() {
        let directory = StaticDirectory::new(UserId::new(3));
        assert_eq!(directory.resolve_current_user_id().unwrap(), UserId::new(3));
    }
}
