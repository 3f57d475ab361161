//! User profiles.
//!
//! Credentials live elsewhere; this module only stores the profile a
//! reservation is attached to.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum length of a name field, in characters.
const MAX_NAME_LEN: usize = 100;

/// Store-generated identity of a user.
///
/// # Examples
///
/// ```
/// use tablebook::UserId;
///
/// assert_eq!(UserId::new(5).value(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a user account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A guest making reservations.
    #[default]
    Customer,
    /// Staff managing restaurants and tables.
    Administrator,
}

impl UserRole {
    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Administrator => "administrator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "administrator" | "admin" => Ok(Self::Administrator),
            other => Err(ValidationError::new(
                "role",
                format!("unknown role '{other}'"),
            )),
        }
    }
}

/// A validated user profile that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) phone: Option<String>,
    pub(crate) role: UserRole,
}

impl NewUser {
    /// Returns the normalized email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    role: UserRole,
    created_at: DateTime<Utc>,
}

impl User {
    /// Starts building a new user profile.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::{User, UserRole};
    ///
    /// let user = User::builder("Ada@Example.com", "Ada", "Lovelace")
    ///     .role(UserRole::Administrator)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(user.email(), "ada@example.com");
    /// ```
    #[must_use]
    pub fn builder(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> UserBuilder {
        UserBuilder {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            role: UserRole::default(),
        }
    }

    pub(crate) fn from_parts(id: UserId, draft: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: draft.email,
            first_name: draft.first_name,
            last_name: draft.last_name,
            phone: draft.phone,
            role: draft.role,
            created_at,
        }
    }

    /// Returns the id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns "first last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the phone number, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns when the profile was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Builder for [`NewUser`] values.
#[derive(Debug)]
pub struct UserBuilder {
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    role: UserRole,
}

impl UserBuilder {
    /// Sets the phone number. Blank values are dropped.
    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }

    /// Sets the role.
    #[must_use]
    pub const fn role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Validates and builds the profile.
    ///
    /// The email is trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is not of the form `local@domain`, or a
    /// name is empty or longer than 100 characters.
    pub fn build(self) -> Result<NewUser, ValidationError> {
        let email = self.email.trim().to_lowercase();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => {
                return Err(ValidationError::new(
                    "email",
                    format!("'{email}' is not a valid email address"),
                ))
            }
        }

        let first_name = name_field("first_name", &self.first_name)?;
        let last_name = name_field("last_name", &self.last_name)?;

        Ok(NewUser {
            email,
            first_name,
            last_name,
            phone: self.phone,
            role: self.role,
        })
    }
}

fn name_field(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "cannot be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            field,
            format!("cannot exceed {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}
