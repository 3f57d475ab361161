//! User profile storage.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::user::{NewUser, User, UserId, UserRole};

use super::connection::Database;
use super::convert::{map_unique, parse_stored, unix_secs_to_utc, utc_to_unix_secs};
use super::schema::USER_COLUMNS;

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let id: i64 = row.get(0)?;
    let role: String = row.get(5)?;
    let created_at: i64 = row.get(6)?;

    Ok(User::from_parts(
        UserId::new(id),
        NewUser {
            email: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            phone: row.get(4)?,
            role: parse_stored::<UserRole>(&role)?,
        },
        unix_secs_to_utc(created_at)?,
    ))
}

impl Database {
    /// Registers a user profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if the email is already registered
    /// (compared case-insensitively).
    pub fn create_user(&mut self, draft: &NewUser) -> Result<User> {
        self.conn
            .execute(
                r"INSERT INTO users (email, first_name, last_name, phone, role, created_at)
                  VALUES (?, ?, ?, ?, ?, ?)",
                params![
                    draft.email,
                    draft.first_name,
                    draft.last_name,
                    draft.phone,
                    draft.role.as_str(),
                    utc_to_unix_secs(Utc::now()),
                ],
            )
            .map_err(|e| map_unique(e, || format!("user {}", draft.email)))?;

        let id = UserId::new(self.conn.last_insert_rowid());
        log::info!("registered user {id} <{}>", draft.email);
        Self::require_user(&self.conn, id)
    }

    /// Deletes a user together with their reservations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] if the user does not exist.
    pub fn delete_user(&mut self, id: UserId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM users WHERE id = ?", [id.value()])?;
        if deleted == 0 {
            return Err(Error::UserNotFound {
                reference: id.to_string(),
            });
        }
        log::info!("deleted user {id}");
        Ok(())
    }

    /// Gets a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        Ok(conn.query_row(&sql, [id.value()], row_to_user).optional()?)
    }

    /// Gets a user by id, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UserNotFound`] if the user does not exist.
    pub fn require_user(conn: &Connection, id: UserId) -> Result<User> {
        Self::get_user(conn, id)?.ok_or_else(|| Error::UserNotFound {
            reference: id.to_string(),
        })
    }

    /// Gets a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        Ok(conn
            .query_row(&sql, [email.trim()], row_to_user)
            .optional()?)
    }

    /// Lists all users ordered by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY email");
        let mut stmt = conn.prepare(&sql)?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }
}
