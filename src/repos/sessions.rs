use rusqlite::{params, Connection, Error, OptionalExtension};
use uuid::Uuid;

use super::timestamp;

pub struct SessionsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SessionsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Opens a session for `user_id` and returns its token.
    pub fn create(&self, user_id: i64) -> Result<String, Error> {
        let token = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)",
            params![token, user_id, timestamp()],
        )?;
        Ok(token)
    }

    pub fn user_id_for(&self, token: &str) -> Result<Option<i64>, Error> {
        self.conn
            .query_row(
                "SELECT user_id FROM sessions WHERE token = ?",
                [token],
                |row| row.get(0),
            )
            .optional()
    }

    pub fn delete(&self, token: &str) -> Result<bool, Error> {
        let removed = self
            .conn
            .execute("DELETE FROM sessions WHERE token = ?", [token])?;
        Ok(removed > 0)
    }
}
