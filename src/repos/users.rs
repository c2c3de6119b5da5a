use rusqlite::{params, Connection, Error, OptionalExtension, Row};

use super::timestamp;
use crate::models::user::{SessionUser, UserSummary};

/// Row used by the login flow; never serialized.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub hashed_password: String,
}

impl UserRecord {
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
        }
    }

    fn from_row(row: &Row<'_>) -> Result<Self, Error> {
        Ok(UserRecord {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            username: row.get(4)?,
            hashed_password: row.get(5)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub username: &'a str,
    pub hashed_password: &'a str,
}

pub struct UsersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> UsersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, user: &NewUser<'_>) -> Result<i64, Error> {
        let now = timestamp();
        self.conn.execute(
            "INSERT INTO users (first_name, last_name, email, username, hashed_password, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                user.first_name,
                user.last_name,
                user.email,
                user.username,
                user.hashed_password,
                now,
                now
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Looks a user up by username or email.
    pub fn find_by_credential(&self, credential: &str) -> Result<Option<UserRecord>, Error> {
        self.conn
            .query_row(
                "SELECT id, first_name, last_name, email, username, hashed_password
                 FROM users WHERE username = ?1 OR email = ?1",
                [credential],
                UserRecord::from_row,
            )
            .optional()
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<UserRecord>, Error> {
        self.conn
            .query_row(
                "SELECT id, first_name, last_name, email, username, hashed_password
                 FROM users WHERE id = ?",
                [id],
                UserRecord::from_row,
            )
            .optional()
    }

    pub fn summary(&self, id: i64) -> Result<Option<UserSummary>, Error> {
        self.conn
            .query_row(
                "SELECT id, first_name, last_name FROM users WHERE id = ?",
                [id],
                |row| {
                    Ok(UserSummary {
                        id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                    })
                },
            )
            .optional()
    }

    pub fn count(&self) -> Result<i64, Error> {
        self.conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
    }
}
